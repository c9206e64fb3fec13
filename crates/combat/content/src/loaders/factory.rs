//! Content factory for loading a whole data directory.

use std::path::{Path, PathBuf};

use combat_core::{BoardState, Build, SimConfig, Timeline};

use crate::loaders::{
    BoardLoader, BuildLoader, ConfigLoader, LoadResult, SpellCatalog, TimelineLoader,
};

/// Content factory that loads combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── spells/
/// │   └── xelor.ron
/// ├── builds/
/// │   └── xelor.ron
/// ├── boards/
/// │   └── default.ron
/// └── timelines/
///     └── dial-opener.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load `config.toml`, falling back to defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<SimConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(SimConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load `spells/{name}.ron`.
    pub fn load_spells(&self, name: &str) -> LoadResult<SpellCatalog> {
        SpellCatalog::load(&self.ron_path("spells", name))
    }

    /// Load `builds/{name}.ron`.
    pub fn load_build(&self, name: &str) -> LoadResult<Build> {
        BuildLoader::load(&self.ron_path("builds", name))
    }

    /// Load `boards/{name}.ron`.
    pub fn load_board(&self, name: &str, config: &SimConfig) -> LoadResult<BoardState> {
        BoardLoader::load(&self.ron_path("boards", name), config)
    }

    /// Load `timelines/{name}.ron`.
    pub fn load_timeline(&self, name: &str) -> LoadResult<Timeline> {
        TimelineLoader::load(&self.ron_path("timelines", name))
    }

    fn ron_path(&self, dir: &str, name: &str) -> PathBuf {
        self.data_dir.join(dir).join(format!("{}.ron", name))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
        assert_eq!(
            factory.ron_path("builds", "xelor"),
            PathBuf::from("/tmp/data/builds/xelor.ron")
        );
    }
}
