//! In-memory save repository for tests and tooling.

use std::collections::HashMap;
use std::sync::RwLock;

use super::error::Result;
use super::save::SaveData;
use super::traits::SaveRepository;

/// Keeps saves in a map; nothing survives the process.
#[derive(Default)]
pub struct MemorySaveRepository {
    slots: RwLock<HashMap<String, SaveData>>,
}

impl MemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for MemorySaveRepository {
    fn save(&self, slot: &str, save: &SaveData) -> Result<()> {
        self.slots
            .write()
            .expect("save slot lock poisoned")
            .insert(slot.to_string(), save.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveData>> {
        Ok(self
            .slots
            .read()
            .expect("save slot lock poisoned")
            .get(slot)
            .cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        self.slots
            .read()
            .expect("save slot lock poisoned")
            .contains_key(slot)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        self.slots
            .write()
            .expect("save slot lock poisoned")
            .remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots: Vec<String> = self
            .slots
            .read()
            .expect("save slot lock poisoned")
            .keys()
            .cloned()
            .collect();
        slots.sort();
        Ok(slots)
    }
}
