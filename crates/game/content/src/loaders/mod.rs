//! Content loaders for reading game data from files.
//!
//! Layer sets come from RON, configuration from TOML. File specs
//! reference layers by slug; the loaders resolve slugs to dense ids and
//! hand the result to [`crumbs_core::Content::new`] for validation, so a
//! malformed file fails at load time, never at play time.

pub mod config;
pub mod layer_set;

pub use config::ConfigLoader;
pub use layer_set::LayerSetLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
