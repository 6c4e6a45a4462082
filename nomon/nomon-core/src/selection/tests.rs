use std::collections::HashSet;

use crate::catalog::{Catalog, LeafInfo, Node, NodeId};
use crate::error::CatalogError;
use crate::selection::{status_of, status_under, toggle_folder, toggle_leaf, SelectionStatus};

fn id(s: &str) -> NodeId {
    NodeId::new(s)
}

fn set(ids: &[&str]) -> HashSet<NodeId> {
    ids.iter().map(|s| id(s)).collect()
}

/// root ⊃ A{doc1, doc2}, root ⊃ B{doc3}, plus an empty
/// folder E and a folder F whose subtree holds only folders.
fn catalog() -> Catalog {
    Catalog::from_nodes(vec![
        Node::folder("a", "A", None),
        Node::folder("b", "B", None),
        Node::folder("e", "E", None),
        Node::folder("f", "F", None),
        Node::folder("f1", "F1", Some(id("f"))),
        Node::leaf("doc1", "doc1", Some(id("a")), LeafInfo::default()),
        Node::leaf("doc2", "doc2", Some(id("a")), LeafInfo::default()),
        Node::leaf("doc3", "doc3", Some(id("b")), LeafInfo::default()),
    ])
}

#[test]
fn status_partial_and_empty() {
    let catalog = catalog();
    let selection = set(&["doc1"]);
    assert_eq!(
        status_of(&catalog, &selection, &id("a")).unwrap(),
        SelectionStatus::Partial
    );
    assert_eq!(
        status_of(&catalog, &selection, &id("b")).unwrap(),
        SelectionStatus::Empty
    );
}

#[test]
fn status_full_iff_every_leaf_selected() {
    let catalog = catalog();
    assert_eq!(
        status_of(&catalog, &set(&["doc1", "doc2"]), &id("a")).unwrap(),
        SelectionStatus::Full
    );
    // extra unrelated ids do not affect the folder
    assert_eq!(
        status_of(&catalog, &set(&["doc1", "doc2", "doc3"]), &id("a")).unwrap(),
        SelectionStatus::Full
    );
}

#[test]
fn leafless_subtrees_are_always_empty() {
    let catalog = catalog();
    let everything = set(&["doc1", "doc2", "doc3"]);
    for folder in ["e", "f", "f1"] {
        assert_eq!(
            status_of(&catalog, &everything, &id(folder)).unwrap(),
            SelectionStatus::Empty,
            "folder {folder} has no leaves and must never read Full",
        );
    }
}

#[test]
fn status_under_root_aggregates_whole_catalog() {
    let catalog = catalog();
    assert_eq!(
        status_under(&catalog, &set(&["doc1"]), None).unwrap(),
        SelectionStatus::Partial
    );
    assert_eq!(
        status_under(&catalog, &set(&["doc1", "doc2", "doc3"]), None).unwrap(),
        SelectionStatus::Full
    );
}

#[test]
fn toggle_partial_fills_the_rest() {
    let catalog = catalog();
    let mut selection = set(&["doc1"]);
    let delta = toggle_folder(&catalog, &selection, &id("a")).unwrap();
    assert_eq!(delta.add, vec![id("doc2")]);
    assert!(delta.remove.is_empty());
    delta.apply(&mut selection);
    assert_eq!(
        status_of(&catalog, &selection, &id("a")).unwrap(),
        SelectionStatus::Full
    );
}

#[test]
fn toggle_full_empties_the_folder() {
    let catalog = catalog();
    let mut selection = set(&["doc1", "doc2"]);
    let delta = toggle_folder(&catalog, &selection, &id("a")).unwrap();
    assert_eq!(delta.remove, vec![id("doc1"), id("doc2")]);
    assert!(delta.add.is_empty());
    delta.apply(&mut selection);
    assert!(selection.is_empty());
    assert_eq!(
        status_of(&catalog, &selection, &id("a")).unwrap(),
        SelectionStatus::Empty
    );
}

#[test]
fn toggle_twice_round_trips_from_empty_and_full() {
    let catalog = catalog();

    for initial in [set(&[]), set(&["doc1", "doc2"])] {
        let mut selection = initial.clone();
        toggle_folder(&catalog, &selection, &id("a"))
            .unwrap()
            .apply(&mut selection);
        toggle_folder(&catalog, &selection, &id("a"))
            .unwrap()
            .apply(&mut selection);
        assert_eq!(selection, initial);
    }
}

#[test]
fn toggle_leaves_unrelated_ids_alone() {
    let catalog = catalog();
    let mut selection = set(&["doc1", "doc2", "doc3"]);
    toggle_folder(&catalog, &selection, &id("a"))
        .unwrap()
        .apply(&mut selection);
    assert_eq!(selection, set(&["doc3"]));
}

#[test]
fn toggle_leafless_folder_is_a_no_op_delta() {
    let catalog = catalog();
    let delta = toggle_folder(&catalog, &set(&[]), &id("e")).unwrap();
    assert!(delta.is_empty());
}

#[test]
fn toggle_leaf_flips_membership() {
    let mut selection = set(&[]);
    let delta = toggle_leaf(&selection, &id("doc1"));
    assert_eq!(delta.add, vec![id("doc1")]);
    delta.apply(&mut selection);

    let delta = toggle_leaf(&selection, &id("doc1"));
    assert_eq!(delta.remove, vec![id("doc1")]);
    delta.apply(&mut selection);
    assert!(selection.is_empty());
}

#[test]
fn status_propagates_catalog_errors() {
    let catalog = catalog();
    assert_eq!(
        status_of(&catalog, &set(&[]), &id("ghost")).unwrap_err(),
        CatalogError::NotFound { id: id("ghost") }
    );
    assert_eq!(
        status_of(&catalog, &set(&[]), &id("doc1")).unwrap_err(),
        CatalogError::NotAFolder { id: id("doc1") }
    );
}
