//! Flat folder/leaf catalog with parent pointers and a derived children
//! index. Catalogs are fetched and edited as flat lists of nodes; the index
//! is rebuilt on every mutation so lookups stay cheap between edits.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;


/// Display label for the synthetic root breadcrumb. Screens relabel it
/// ("Library", "Project Root") since the label is presentation.
pub const ROOT_LABEL: &str = "Root";

/// Stable string identifier of a catalog node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh id for nodes created locally (new folders, uploads).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Folder,
    Leaf,
}

/// Leaf metadata carried through the selector unchanged. Folders leave all
/// fields empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<chrono::NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// One entry of the flat catalog: a folder or a selectable leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// Containing folder, or `None` at top level.
    pub parent: Option<NodeId>,
    #[serde(default)]
    pub info: LeafInfo,
}

impl Node {
    pub fn folder(id: impl Into<NodeId>, name: impl Into<String>, parent: Option<NodeId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: NodeKind::Folder,
            parent,
            info: LeafInfo::default(),
        }
    }

    pub fn leaf(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        parent: Option<NodeId>,
        info: LeafInfo,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: NodeKind::Leaf,
            parent,
            info,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }
}

/// One entry of a breadcrumb path. `id == None` is the synthetic root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub id: Option<NodeId>,
    pub name: String,
}

impl Breadcrumb {
    pub fn root() -> Self {
        Self {
            id: None,
            name: ROOT_LABEL.to_string(),
        }
    }
}

/// Flat node map keyed by id plus a derived parent-to-children index.
///
/// The index is rebuilt whenever the node set changes; between mutations the
/// catalog is immutable and every query is a pure function over it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Node>", from = "Vec<Node>")]
pub struct Catalog {
    nodes: HashMap<NodeId, Node>,
    children: HashMap<Option<NodeId>, Vec<NodeId>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a flat node list. A duplicate id replaces the
    /// earlier node, matching last-write-wins on flat fetches.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
        let mut map = HashMap::new();
        for node in nodes {
            if let Some(prev) = map.insert(node.id.clone(), node) {
                tracing::warn!(id = %prev.id, "duplicate node id in catalog, keeping latest");
            }
        }
        let mut catalog = Self {
            nodes: map,
            children: HashMap::new(),
        };
        catalog.rebuild_index();
        catalog
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterate over all nodes in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Direct children of a folder (or of the root when `parent` is `None`),
    /// ordered by name with id as tie-break so repeated calls are stable.
    pub fn children_of(&self, parent: Option<&NodeId>) -> Vec<&Node> {
        self.children
            .get(&parent.cloned())
            .map(|ids| ids.iter().filter_map(|id| self.nodes.get(id)).collect())
            .unwrap_or_default()
    }

    /// Ancestor path from the synthetic root down to `cursor` inclusive.
    ///
    /// The root cursor yields just the synthetic root entry. A dangling
    /// parent reference fails with `BrokenChain` rather than returning a
    /// silently truncated path, and the walk is bounded by catalog size so a
    /// malformed parent cycle fails with `CycleDetected` instead of looping.
    pub fn path_to(&self, cursor: Option<&NodeId>) -> Result<Vec<Breadcrumb>, CatalogError> {
        let mut crumbs = vec![Breadcrumb::root()];
        let Some(start) = cursor else {
            return Ok(crumbs);
        };
        let node = self.nodes.get(start).ok_or_else(|| CatalogError::NotFound {
            id: start.clone(),
        })?;
        if !node.is_folder() {
            return Err(CatalogError::NotAFolder { id: start.clone() });
        }

        let mut chain = Vec::new();
        let mut current = node;
        let mut steps = 0usize;
        loop {
            chain.push(Breadcrumb {
                id: Some(current.id.clone()),
                name: current.name.clone(),
            });
            let Some(parent_id) = &current.parent else {
                break;
            };
            steps += 1;
            if steps > self.nodes.len() {
                return Err(CatalogError::CycleDetected { id: start.clone() });
            }
            current = self
                .nodes
                .get(parent_id)
                .ok_or_else(|| CatalogError::BrokenChain {
                    id: current.id.clone(),
                    missing: parent_id.clone(),
                })?;
        }
        chain.reverse();
        crumbs.extend(chain);
        Ok(crumbs)
    }

    /// All leaf nodes nested under a folder at any depth, in stable index
    /// order. `None` collects every leaf in the catalog. The walk is bounded
    /// by catalog size (`CycleDetected` past the bound).
    pub fn leaves_under(&self, folder: Option<&NodeId>) -> Result<Vec<&Node>, CatalogError> {
        self.walk_subtree(folder)
            .map(|nodes| nodes.into_iter().filter(|n| !n.is_folder()).collect())
    }

    /// Ids of every node (folders and leaves) under a folder, excluding the
    /// folder itself. Used for recursive removal.
    pub fn descendants_of(&self, folder: &NodeId) -> Result<Vec<NodeId>, CatalogError> {
        let nodes = self.walk_subtree(Some(folder))?;
        Ok(nodes.into_iter().map(|n| n.id.clone()).collect())
    }

    // Depth-bounded walk collecting every node under `folder`, descending
    // into each folder exactly once for a well-formed catalog.
    fn walk_subtree(&self, folder: Option<&NodeId>) -> Result<Vec<&Node>, CatalogError> {
        if let Some(id) = folder {
            let node = self
                .nodes
                .get(id)
                .ok_or_else(|| CatalogError::NotFound { id: id.clone() })?;
            if !node.is_folder() {
                return Err(CatalogError::NotAFolder { id: id.clone() });
            }
        }

        let mut out = Vec::new();
        let mut stack = vec![folder.cloned()];
        let mut expanded = 0usize;
        while let Some(parent) = stack.pop() {
            expanded += 1;
            if expanded > self.nodes.len() + 1 {
                return Err(CatalogError::CycleDetected {
                    id: folder.cloned().unwrap_or_else(|| NodeId::new("<root>")),
                });
            }
            if let Some(ids) = self.children.get(&parent) {
                for id in ids {
                    let Some(child) = self.nodes.get(id) else {
                        continue;
                    };
                    out.push(child);
                    if child.is_folder() {
                        stack.push(Some(child.id.clone()));
                    }
                }
            }
        }
        Ok(out)
    }

    /// Create a folder under `parent` (root when `None`) and return its id.
    pub fn create_folder(
        &mut self,
        parent: Option<&NodeId>,
        name: impl Into<String>,
    ) -> Result<NodeId, CatalogError> {
        self.require_folder(parent)?;
        let id = NodeId::generate();
        let name = name.into();
        tracing::debug!(%id, %name, "creating folder");
        self.nodes
            .insert(id.clone(), Node::folder(id.clone(), name, parent.cloned()));
        self.rebuild_index();
        Ok(id)
    }

    /// Add a leaf under `parent` and return its id.
    pub fn add_leaf(
        &mut self,
        parent: Option<&NodeId>,
        name: impl Into<String>,
        info: LeafInfo,
    ) -> Result<NodeId, CatalogError> {
        self.require_folder(parent)?;
        let id = NodeId::generate();
        let name = name.into();
        tracing::debug!(%id, %name, "adding leaf");
        self.nodes
            .insert(id.clone(), Node::leaf(id.clone(), name, parent.cloned(), info));
        self.rebuild_index();
        Ok(id)
    }

    /// Insert a pre-built node (seed data, catalog refresh).
    pub fn insert(&mut self, node: Node) -> Result<NodeId, CatalogError> {
        self.require_folder(node.parent.as_ref())?;
        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        self.rebuild_index();
        Ok(id)
    }

    pub fn rename(&mut self, id: &NodeId, name: impl Into<String>) -> Result<(), CatalogError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| CatalogError::NotFound { id: id.clone() })?;
        node.name = name.into();
        self.rebuild_index();
        Ok(())
    }

    /// Reparent a node. Moving a folder into its own subtree is rejected
    /// with `InvalidMove` since it would orphan the subtree into a cycle.
    pub fn move_node(
        &mut self,
        id: &NodeId,
        new_parent: Option<&NodeId>,
    ) -> Result<(), CatalogError> {
        if !self.nodes.contains_key(id) {
            return Err(CatalogError::NotFound { id: id.clone() });
        }
        self.require_folder(new_parent)?;
        if let Some(target) = new_parent {
            if target == id {
                return Err(CatalogError::InvalidMove {
                    id: id.clone(),
                    target: target.clone(),
                });
            }
            // Walk up from the target; hitting `id` means the target sits
            // inside the moved folder's subtree.
            let mut current = Some(target.clone());
            let mut steps = 0usize;
            while let Some(ancestor) = current {
                steps += 1;
                if steps > self.nodes.len() {
                    return Err(CatalogError::CycleDetected { id: target.clone() });
                }
                if &ancestor == id {
                    return Err(CatalogError::InvalidMove {
                        id: id.clone(),
                        target: target.clone(),
                    });
                }
                current = self
                    .nodes
                    .get(&ancestor)
                    .and_then(|node| node.parent.clone());
            }
        }
        tracing::debug!(%id, target = ?new_parent, "moving node");
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = new_parent.cloned();
        }
        self.rebuild_index();
        Ok(())
    }

    /// Remove a node and (for folders) everything beneath it. Returns the
    /// removed ids, including `id` itself, so owners can prune selections.
    pub fn remove_recursive(&mut self, id: &NodeId) -> Result<Vec<NodeId>, CatalogError> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| CatalogError::NotFound { id: id.clone() })?;
        let mut removed = vec![id.clone()];
        if node.is_folder() {
            removed.extend(self.descendants_of(id)?);
        }
        for gone in &removed {
            self.nodes.remove(gone);
        }
        tracing::debug!(%id, count = removed.len(), "removed subtree");
        self.rebuild_index();
        Ok(removed)
    }

    fn require_folder(&self, id: Option<&NodeId>) -> Result<(), CatalogError> {
        let Some(id) = id else {
            return Ok(());
        };
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| CatalogError::NotFound { id: id.clone() })?;
        if !node.is_folder() {
            return Err(CatalogError::NotAFolder { id: id.clone() });
        }
        Ok(())
    }

    fn rebuild_index(&mut self) {
        let mut children: HashMap<Option<NodeId>, Vec<NodeId>> = HashMap::new();
        for node in self.nodes.values() {
            children
                .entry(node.parent.clone())
                .or_default()
                .push(node.id.clone());
        }
        for ids in children.values_mut() {
            ids.sort_by(|a, b| {
                let na = &self.nodes[a].name;
                let nb = &self.nodes[b].name;
                na.to_lowercase()
                    .cmp(&nb.to_lowercase())
                    .then_with(|| a.cmp(b))
            });
        }
        self.children = children;
    }
}

impl From<Vec<Node>> for Catalog {
    fn from(nodes: Vec<Node>) -> Self {
        Self::from_nodes(nodes)
    }
}

impl From<Catalog> for Vec<Node> {
    fn from(catalog: Catalog) -> Self {
        let mut nodes: Vec<Node> = catalog.nodes.into_values().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes
    }
}
