//! Content loaders for reading combat data from files.
//!
//! Loaders convert RON/TOML files into combat-core values. Files use the
//! core types directly where they serialize cleanly; boards and timelines go
//! through small spec structs that are validated on conversion.

pub mod board;
pub mod build;
pub mod config;
pub mod factory;
pub mod spells;
pub mod timeline;

pub use board::{BoardLoader, BoardSpec, EnemySpec};
pub use build::BuildLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use spells::SpellCatalog;
pub use timeline::{StepSpec, TimelineLoader, TimelineSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
