/**
 * Metadata Sidecar
 *
 * Each workspace keeps a single `metadata.json` mapping document filenames
 * to the ISO-8601 time of their last logical edit. Reads count as edits, so
 * the sidecar is used instead of filesystem modification times.
 *
 * Every update is a full read-modify-write of the file with no locking.
 */
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::backend::workspace::error::WorkspaceError;
use crate::shared::METADATA_FILE_NAME;

/// Filename → last-edit timestamp
pub type MetadataMap = BTreeMap<String, String>;

/// Current local time in the sidecar's timestamp format
pub fn now_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Handle to the metadata sidecar of one workspace
#[derive(Debug, Clone)]
pub struct MetadataFile {
    path: PathBuf,
}

impl MetadataFile {
    /// Sidecar of the workspace rooted at `workspace_dir`
    pub fn in_workspace(workspace_dir: &Path) -> Self {
        Self {
            path: workspace_dir.join(METADATA_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the map, treating a missing sidecar as empty
    ///
    /// A sidecar that is not a JSON object of strings is logged and treated
    /// as empty; the next write replaces it.
    pub fn load(&self) -> Result<MetadataMap, WorkspaceError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(MetadataMap::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(
                    "Discarding unreadable metadata at {}: {}",
                    self.path.display(),
                    e
                );
                Ok(MetadataMap::new())
            }
        }
    }

    pub fn save(&self, metadata: &MetadataMap) -> Result<(), WorkspaceError> {
        let json = serde_json::to_string(metadata)
            .map_err(|e| WorkspaceError::invalid_input(format!("Invalid metadata: {}", e)))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Record `file_name` as edited now
    pub fn touch(&self, file_name: &str) -> Result<String, WorkspaceError> {
        let mut metadata = self.load()?;
        let timestamp = now_timestamp();
        metadata.insert(file_name.to_string(), timestamp.clone());
        self.save(&metadata)?;
        Ok(timestamp)
    }

    /// Drop the entry for `file_name`, if any
    pub fn forget(&self, file_name: &str) -> Result<(), WorkspaceError> {
        let mut metadata = self.load()?;
        metadata.remove(file_name);
        self.save(&metadata)
    }
}
