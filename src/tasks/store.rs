use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

use super::TaskList;

pub const DEFAULT_STORE_FILE: &str = "tasks.json";

/// Task store persisted as a pretty-printed JSON array.
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the store. A missing file is an empty store; anything else that
    /// goes wrong is an error.
    pub fn load(&self) -> Result<TaskList> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no task store yet, starting empty");
                return Ok(TaskList::default());
            }
            Err(e) => return Err(Error::store(&self.path, format!("failed to read: {e}"))),
        };

        let tasks: TaskList = serde_json::from_str(&content)
            .map_err(|e| Error::store(&self.path, format!("failed to parse: {e}")))?;
        debug!(path = %self.path.display(), count = tasks.len(), "loaded task store");
        Ok(tasks)
    }

    /// Replace the store's contents. The new file is written next to the old
    /// one and renamed over it, so readers see either the old or new store.
    pub fn save(&self, tasks: &TaskList) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::store(&self.path, format!("failed to create directory: {e}")))?;

        let content = to_pretty_json(tasks)
            .map_err(|e| Error::store(&self.path, format!("failed to serialize: {e}")))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| Error::store(&self.path, format!("failed to create temp file: {e}")))?;
        tmp.write_all(&content)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| Error::store(&self.path, format!("failed to write: {e}")))?;
        tmp.persist(&self.path)
            .map_err(|e| Error::store(&self.path, format!("failed to replace: {}", e.error)))?;

        debug!(path = %self.path.display(), count = tasks.len(), "saved task store");
        Ok(())
    }
}

fn to_pretty_json(tasks: &TaskList) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    tasks.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}
