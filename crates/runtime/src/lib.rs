//! Session runtime for the progression core.
//!
//! Owns everything the pure rules crate refuses to: the tick loop and its
//! wall clock, the command channel, the event bus observers subscribe to,
//! save repositories with version migration, and offline catch-up. All
//! game state mutation still flows through the core engine — this crate
//! only decides *when* actions run and tells the world what changed.

pub mod config;
pub mod driver;
pub mod events;
pub mod offline;
pub mod repository;
pub mod session;

pub use config::RuntimeConfig;
pub use driver::{Command, DriverHandle, TickDriver};
pub use events::{Event, EventBus, ResetApplied, ResourceChanged, Topic, UpgradePurchased};
pub use offline::{OfflineReport, catch_up};
pub use repository::{
    FileSaveRepository, MemorySaveRepository, MigrationChain, RepositoryError, SaveData,
    SaveMigration, SaveRepository,
};
pub use session::GameSession;
