//! Repository contract for save persistence.

use super::error::Result;
use super::save::SaveData;

/// Slot-addressed save storage.
///
/// Implementations must be safe to share across the driver task and any
/// tooling that inspects saves.
pub trait SaveRepository: Send + Sync {
    /// Write a save into a slot, replacing what was there.
    fn save(&self, slot: &str, save: &SaveData) -> Result<()>;

    /// Load a slot; `None` when the slot does not exist.
    fn load(&self, slot: &str) -> Result<Option<SaveData>>;

    /// Check if a slot exists.
    fn exists(&self, slot: &str) -> bool;

    /// Delete a slot. Deleting a missing slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List all slots with a save.
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
