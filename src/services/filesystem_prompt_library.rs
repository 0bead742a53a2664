use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use crate::domain::{AppError, LibraryEntry};
use crate::ports::PromptLibrary;

/// Prompt library storing one pretty-printed JSON file per entry.
#[derive(Debug, Clone)]
pub struct FilesystemPromptLibrary {
    root: PathBuf,
}

impl FilesystemPromptLibrary {
    /// Create a library rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn entry_path(&self, id: Uuid) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    fn read_entry(path: &PathBuf) -> Result<LibraryEntry, AppError> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|err| {
            AppError::Storage(format!("Corrupt library entry {}: {}", path.display(), err))
        })
    }
}

impl PromptLibrary for FilesystemPromptLibrary {
    fn save(&self, entry: &LibraryEntry) -> Result<(), AppError> {
        fs::create_dir_all(&self.root)?;
        let content = serde_json::to_string_pretty(entry)?;
        fs::write(self.entry_path(entry.id()), format!("{content}\n"))?;
        Ok(())
    }

    fn load(&self, id: Uuid) -> Result<Option<LibraryEntry>, AppError> {
        let path = self.entry_path(id);
        if !path.exists() {
            return Ok(None);
        }
        Self::read_entry(&path).map(Some)
    }

    fn list(&self) -> Result<Vec<LibraryEntry>, AppError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for dir_entry in fs::read_dir(&self.root)? {
            let path = dir_entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            entries.push(Self::read_entry(&path)?);
        }
        Ok(entries)
    }

    fn remove(&self, id: Uuid) -> Result<bool, AppError> {
        let path = self.entry_path(id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }
}
