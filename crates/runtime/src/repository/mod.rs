//! Save persistence.
//!
//! Saves are a flat `layer-slug → field → string` mapping: tolerant to
//! read (missing fields fall back to content defaults, unknown fields are
//! ignored) and stable to diff. Two backends implement the same contract;
//! version migrations run on the raw mapping before any state is built.

mod error;
mod file;
mod memory;
mod migration;
mod save;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::MemorySaveRepository;
pub use migration::{MigrationChain, SaveMigration};
pub use save::{SAVE_VERSION, SaveData};
pub use traits::SaveRepository;

use chrono::Utc;

use crate::session::GameSession;

/// Writes the session's current state into a slot.
pub fn save_session(
    repository: &dyn SaveRepository,
    slot: &str,
    session: &GameSession,
) -> Result<()> {
    let save = SaveData::encode(session.content(), session.state(), Utc::now());
    repository.save(slot, &save)
}

/// Loads a slot into the session, running migrations first.
///
/// Returns the migrated save so callers can apply offline catch-up from
/// its timestamp. Loading a missing slot leaves the session untouched.
pub fn load_session(
    repository: &dyn SaveRepository,
    slot: &str,
    session: &mut GameSession,
    migrations: &MigrationChain,
) -> Result<Option<SaveData>> {
    let Some(mut save) = repository.load(slot)? else {
        return Ok(None);
    };
    migrations.run(&mut save);
    let state = save.decode(session.content());
    session.replace_state(state);
    Ok(Some(save))
}
