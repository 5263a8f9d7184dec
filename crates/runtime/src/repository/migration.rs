//! Save-version migrations.
//!
//! Migrations operate on the raw save mapping, before any game state is
//! built — a migration can rename slugs, move fields, or rewrite values
//! without the core ever seeing the old shape.

use super::save::SaveData;

/// One step of save-format evolution.
pub trait SaveMigration: Send + Sync {
    /// True when this step knows how to advance the given version.
    fn applies(&self, version: &str) -> bool;

    /// Rewrites the save in place. Implementations must update
    /// `save.version` to the version they produce.
    fn migrate(&self, save: &mut SaveData);
}

/// Ordered chain of migrations, run until no step applies.
#[derive(Default)]
pub struct MigrationChain {
    migrations: Vec<Box<dyn SaveMigration>>,
}

impl MigrationChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, migration: impl SaveMigration + 'static) -> Self {
        self.migrations.push(Box::new(migration));
        self
    }

    /// Applies every matching step in order. Each step sees the output of
    /// the previous one, so chains can span several versions.
    pub fn run(&self, save: &mut SaveData) {
        loop {
            let Some(step) = self.migrations.iter().find(|m| m.applies(&save.version)) else {
                return;
            };
            let from = save.version.clone();
            step.migrate(save);
            tracing::info!(%from, to = %save.version, "migrated save");
            assert_ne!(
                save.version, from,
                "migration must advance the save version"
            );
        }
    }
}
