/**
 * Workspace Store
 *
 * This module implements document CRUD inside per-identity workspace
 * directories.
 *
 * # Operations
 *
 * - `list_documents` - names and last-edit times, sorted by name
 * - `create_document` - new document, never overwrites
 * - `read_document` - parsed content, refreshes the last-edit time
 * - `update_document` - full replacement of an existing document
 * - `delete_document` - removes the file and its metadata entry
 *
 * All operations are blocking filesystem calls. Async callers should run
 * them on the blocking pool.
 */
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::backend::workspace::error::WorkspaceError;
use crate::backend::workspace::filename::{display_name, document_file_name, secure_filename};
use crate::backend::workspace::metadata::MetadataFile;
use crate::shared::{empty_graph, DocumentSummary, NEVER_EDITED};

/// Document store rooted at a single workspace directory tree
///
/// Cloning is cheap; the store only holds its root path.
#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    root: PathBuf,
}

impl WorkspaceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory owned by `user_id`, without touching the filesystem
    pub fn workspace_path(&self, user_id: &str) -> Result<PathBuf, WorkspaceError> {
        let safe = secure_filename(user_id);
        if safe.is_empty() {
            return Err(WorkspaceError::invalid_input(format!(
                "Invalid user id: {:?}",
                user_id
            )));
        }
        Ok(self.root.join(safe))
    }

    /// Directory owned by `user_id`, created if absent
    pub fn provision(&self, user_id: &str) -> Result<PathBuf, WorkspaceError> {
        let dir = self.workspace_path(user_id)?;
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// List every document in the workspace, sorted by name
    ///
    /// The metadata sidecar and any file without the `.flow.json` suffix are
    /// skipped. Documents without a metadata entry report `"Never"`.
    pub fn list_documents(&self, user_id: &str) -> Result<Vec<DocumentSummary>, WorkspaceError> {
        let dir = self.provision(user_id)?;
        let metadata = MetadataFile::in_workspace(&dir).load()?;

        let mut documents = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            let Some(name) = display_name(file_name) else {
                continue;
            };
            let last_edit = metadata
                .get(file_name)
                .cloned()
                .unwrap_or_else(|| NEVER_EDITED.to_string());
            documents.push(DocumentSummary {
                name: name.to_string(),
                last_edit,
            });
        }

        documents.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(documents)
    }

    /// Create a new document and return its stored filename
    ///
    /// Empty (or whitespace-only) content is replaced by the empty graph.
    /// Anything else must parse as JSON and is stored verbatim.
    pub fn create_document(
        &self,
        user_id: &str,
        raw_name: &str,
        raw_content: &[u8],
    ) -> Result<String, WorkspaceError> {
        if raw_name.trim().is_empty() {
            return Err(WorkspaceError::invalid_input("No selected file"));
        }
        let file_name = document_file_name(raw_name)?;
        let dir = self.provision(user_id)?;
        let path = dir.join(&file_name);
        if path.exists() {
            return Err(WorkspaceError::AlreadyExists(file_name));
        }

        let text = std::str::from_utf8(raw_content)
            .map_err(|_| WorkspaceError::malformed("Invalid JSON content"))?
            .trim();
        let content = if text.is_empty() {
            empty_graph().to_string()
        } else {
            serde_json::from_str::<Value>(text)
                .map_err(|_| WorkspaceError::malformed("Invalid JSON content"))?;
            text.to_string()
        };

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(WorkspaceError::AlreadyExists(file_name));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(content.as_bytes())?;

        MetadataFile::in_workspace(&dir).touch(&file_name)?;
        Ok(file_name)
    }

    /// Read and parse a document, refreshing its last-edit time
    ///
    /// Numbers keep their exact textual form and objects keep their key
    /// order, so serializing the result reproduces the stored text.
    pub fn read_document(&self, user_id: &str, name: &str) -> Result<Value, WorkspaceError> {
        let (dir, file_name) = self.existing_document(user_id, name)?;

        let raw = fs::read_to_string(dir.join(&file_name))?;
        let raw = raw.trim();
        let content = if raw.is_empty() {
            empty_graph()
        } else {
            serde_json::from_str(raw).map_err(|_| {
                WorkspaceError::malformed(format!("Invalid JSON content in file {}", file_name))
            })?
        };

        MetadataFile::in_workspace(&dir).touch(&file_name)?;
        Ok(content)
    }

    /// Replace the content of an existing document
    ///
    /// Never creates a document.
    pub fn update_document(
        &self,
        user_id: &str,
        name: &str,
        content: &Value,
    ) -> Result<(), WorkspaceError> {
        let (dir, file_name) = self.existing_document(user_id, name)?;

        let json = serde_json::to_string(content).map_err(|_| {
            WorkspaceError::invalid_input(format!("Invalid JSON content for file {}", file_name))
        })?;
        fs::write(dir.join(&file_name), json)?;

        MetadataFile::in_workspace(&dir).touch(&file_name)?;
        Ok(())
    }

    /// Remove a document and its metadata entry
    pub fn delete_document(&self, user_id: &str, name: &str) -> Result<(), WorkspaceError> {
        let (dir, file_name) = self.existing_document(user_id, name)?;

        match fs::remove_file(dir.join(&file_name)) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(WorkspaceError::NotFound(file_name));
            }
            Err(e) => return Err(e.into()),
        }

        MetadataFile::in_workspace(&dir).forget(&file_name)
    }

    /// Resolve `name` to its stored filename, failing if it does not exist
    fn existing_document(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<(PathBuf, String), WorkspaceError> {
        let file_name = match document_file_name(name) {
            Ok(file_name) => file_name,
            // A name that sanitizes to nothing cannot exist.
            Err(WorkspaceError::InvalidInput(_)) => {
                return Err(WorkspaceError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e),
        };
        let dir = self.provision(user_id)?;
        if !dir.join(&file_name).is_file() {
            return Err(WorkspaceError::NotFound(file_name));
        }
        Ok((dir, file_name))
    }
}
