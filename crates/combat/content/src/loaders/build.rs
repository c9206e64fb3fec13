//! Character build loader.

use std::path::Path;

use combat_core::Build;

use crate::loaders::{LoadResult, read_file};

/// Loader for character builds from RON files.
pub struct BuildLoader;

impl BuildLoader {
    pub fn load(path: &Path) -> LoadResult<Build> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Build> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse build RON: {}", e))
    }
}
