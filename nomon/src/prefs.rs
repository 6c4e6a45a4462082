//! File-backed user preferences. Every mutation persists immediately;
//! missing or corrupt files fall back to defaults so a bad disk state never
//! blocks startup.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const PREFS_FILE: &str = "preferences.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewDensity {
    Compact,
    Comfortable,
}

impl Default for ViewDensity {
    fn default() -> Self {
        Self::Comfortable
    }
}

/// Fields default individually so preferences written by an older version
/// still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub pinned_projects: Vec<u64>,
    pub pinned_documents: Vec<String>,
    pub collapsed_sections: Vec<String>,
    pub view_density: ViewDensity,
}

#[derive(Debug)]
pub struct PreferencesStore {
    path: PathBuf,
    preferences: UserPreferences,
}

impl PreferencesStore {
    /// Load preferences from `data_dir`, falling back to defaults when the
    /// file is absent or unreadable.
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(PREFS_FILE);
        let preferences = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "corrupt preferences file, using defaults");
                UserPreferences::default()
            }),
            Err(_) => UserPreferences::default(),
        };
        Self { path, preferences }
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating preferences dir {}", dir.display()))?;
        }
        let raw = serde_json::to_string_pretty(&self.preferences)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing preferences to {}", self.path.display()))?;
        Ok(())
    }

    fn toggle<T: PartialEq>(list: &mut Vec<T>, value: T) -> bool {
        if let Some(pos) = list.iter().position(|v| *v == value) {
            list.remove(pos);
            false
        } else {
            list.push(value);
            true
        }
    }

    /// Pin or unpin a project; returns the new pinned state.
    pub fn toggle_pin_project(&mut self, project_id: u64) -> Result<bool> {
        let pinned = Self::toggle(&mut self.preferences.pinned_projects, project_id);
        self.save()?;
        Ok(pinned)
    }

    pub fn toggle_pin_document(&mut self, doc_id: impl Into<String>) -> Result<bool> {
        let pinned = Self::toggle(&mut self.preferences.pinned_documents, doc_id.into());
        self.save()?;
        Ok(pinned)
    }

    /// Collapse or expand a dashboard section; returns true when collapsed.
    pub fn toggle_section(&mut self, section_id: impl Into<String>) -> Result<bool> {
        let collapsed = Self::toggle(&mut self.preferences.collapsed_sections, section_id.into());
        self.save()?;
        Ok(collapsed)
    }

    pub fn is_project_pinned(&self, project_id: u64) -> bool {
        self.preferences.pinned_projects.contains(&project_id)
    }

    pub fn is_section_collapsed(&self, section_id: &str) -> bool {
        self.preferences
            .collapsed_sections
            .iter()
            .any(|s| s == section_id)
    }

    pub fn set_view_density(&mut self, density: ViewDensity) -> Result<()> {
        self.preferences.view_density = density;
        self.save()
    }
}
