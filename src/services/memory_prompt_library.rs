use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use crate::domain::{AppError, LibraryEntry};
use crate::ports::PromptLibrary;

/// In-memory prompt library.
#[derive(Debug, Clone, Default)]
pub struct MemoryPromptLibrary {
    entries: Arc<Mutex<HashMap<Uuid, LibraryEntry>>>,
}

impl MemoryPromptLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, LibraryEntry>>, AppError> {
        self.entries.lock().map_err(|_| AppError::Storage("library lock poisoned".to_string()))
    }
}

impl PromptLibrary for MemoryPromptLibrary {
    fn save(&self, entry: &LibraryEntry) -> Result<(), AppError> {
        self.lock()?.insert(entry.id(), entry.clone());
        Ok(())
    }

    fn load(&self, id: Uuid) -> Result<Option<LibraryEntry>, AppError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<LibraryEntry>, AppError> {
        Ok(self.lock()?.values().cloned().collect())
    }

    fn remove(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.lock()?.remove(&id).is_some())
    }
}
