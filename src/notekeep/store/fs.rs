use super::KeyValueStore;
use crate::error::{NotesError, Result};
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const STORAGE_FILENAME: &str = "local_storage.json";

/// File-backed store: every key lives in one JSON object on disk.
///
/// The whole object is read once on open and rewritten on every write, the
/// same all-or-nothing granularity browser storage gives per origin.
pub struct FileStore {
    root: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let items = load_items(&root.join(STORAGE_FILENAME))?;
        debug!(root = %root.display(), keys = items.len(), "opened file store");
        Ok(Self { root, items })
    }

    /// Per-user data directory, e.g. `~/.local/share/notekeep` on Linux.
    pub fn default_location() -> Result<PathBuf> {
        ProjectDirs::from("com", "notekeep", "notekeep")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| NotesError::Store("Could not determine data directory".to_string()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn storage_path(&self) -> PathBuf {
        self.root.join(STORAGE_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(NotesError::Io)?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.ensure_dir()?;
        let content =
            serde_json::to_string_pretty(&self.items).map_err(NotesError::Serialization)?;

        // Write to a sibling then rename so a crash never leaves half a file.
        let tmp = self.root.join(format!("{}.tmp", STORAGE_FILENAME));
        fs::write(&tmp, content).map_err(NotesError::Io)?;
        fs::rename(&tmp, self.storage_path()).map_err(NotesError::Io)?;
        Ok(())
    }
}

fn load_items(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(path).map_err(NotesError::Io)?;
    let items = serde_json::from_str(&content).map_err(NotesError::Serialization)?;
    Ok(items)
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let previous = self.items.insert(key.to_string(), value.to_string());
        if let Err(err) = self.flush() {
            // Keep memory in step with disk.
            match previous {
                Some(old) => self.items.insert(key.to_string(), old),
                None => self.items.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let Some(old) = self.items.remove(key) else {
            return Ok(());
        };
        if let Err(err) = self.flush() {
            self.items.insert(key.to_string(), old);
            return Err(err);
        }
        Ok(())
    }
}
