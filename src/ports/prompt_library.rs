use uuid::Uuid;

use crate::domain::{AppError, LibraryEntry};

/// Port for persisting library entries.
///
/// Implementations store whole entries; ownership and sharing rules live in
/// the library service.
pub trait PromptLibrary {
    /// Insert or replace an entry by id.
    fn save(&self, entry: &LibraryEntry) -> Result<(), AppError>;

    fn load(&self, id: Uuid) -> Result<Option<LibraryEntry>, AppError>;

    /// All stored entries, in no particular order.
    fn list(&self) -> Result<Vec<LibraryEntry>, AppError>;

    /// Delete an entry. Returns whether it existed.
    fn remove(&self, id: Uuid) -> Result<bool, AppError>;
}
