//! Layout snapshot persistence
//!
//! The host decides when to save (usually on `Cmd::PersistLayout`). Snapshots
//! are stored as pretty-printed JSON next to the config file.

use std::path::{Path, PathBuf};

use crate::model::snapshot::SNAPSHOT_FORMAT;
use crate::model::LayoutSnapshot;

/// Reads and writes layout snapshots at a fixed location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutStore {
    path: PathBuf,
}

impl LayoutStore {
    /// Store at `~/.config/dockspace/layout.json`, if a config dir exists
    pub fn default_location() -> Option<Self> {
        crate::config_paths::layout_file().map(Self::at)
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored snapshot
    ///
    /// Missing, unreadable or incompatible files yield `None`; the caller
    /// keeps its default arrangement.
    pub fn load(&self) -> Option<LayoutSnapshot> {
        if !self.path.exists() {
            tracing::debug!("No saved layout at {}", self.path.display());
            return None;
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read layout at {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<LayoutSnapshot>(&content) {
            Ok(snapshot) if snapshot.format == SNAPSHOT_FORMAT => {
                tracing::info!(
                    "Loaded layout with {} panels from {}",
                    snapshot.panels.len(),
                    self.path.display()
                );
                Some(snapshot)
            }
            Ok(snapshot) => {
                tracing::warn!(
                    "Ignoring layout at {}: format {} (expected {})",
                    self.path.display(),
                    snapshot.format,
                    SNAPSHOT_FORMAT
                );
                None
            }
            Err(e) => {
                tracing::warn!("Failed to parse layout at {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Write a snapshot, creating parent directories as needed
    pub fn save(&self, snapshot: &LayoutSnapshot) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create layout directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(snapshot)
            .map_err(|e| format!("Failed to serialize layout: {}", e))?;

        std::fs::write(&self.path, content)
            .map_err(|e| format!("Failed to write layout to {}: {}", self.path.display(), e))?;

        tracing::debug!("Saved layout to {}", self.path.display());
        Ok(())
    }

    /// Delete the stored snapshot; a missing file is not an error
    pub fn clear(&self) -> Result<(), String> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!(
                "Failed to remove layout at {}: {}",
                self.path.display(),
                e
            )),
        }
    }
}
