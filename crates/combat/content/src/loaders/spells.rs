//! Spell catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::{SpellOracle, SpellProfile};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Spell catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SpellCatalogRon {
    spells: Vec<SpellProfile>,
}

/// Read-only spell lookup keyed by spell id.
#[derive(Debug, Clone, Default)]
pub struct SpellCatalog {
    spells: BTreeMap<String, SpellProfile>,
}

impl SpellCatalog {
    /// Loads the catalog bundled with the crate.
    pub fn embedded() -> LoadResult<Self> {
        Self::parse(include_str!("../../data/spells/xelor.ron"))
    }

    /// Load a spell catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Self> {
        let data: SpellCatalogRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell catalog RON: {}", e))?;
        Self::from_profiles(data.spells)
    }

    /// Builds a catalog, rejecting duplicate ids.
    pub fn from_profiles(profiles: impl IntoIterator<Item = SpellProfile>) -> LoadResult<Self> {
        let mut spells = BTreeMap::new();
        for profile in profiles {
            if spells.contains_key(&profile.id) {
                anyhow::bail!("Duplicate spell id in catalog: {}", profile.id);
            }
            spells.insert(profile.id.clone(), profile);
        }
        Ok(Self { spells })
    }

    pub fn get(&self, spell_id: &str) -> Option<&SpellProfile> {
        self.spells.get(spell_id)
    }

    /// Spell ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.spells.keys().map(String::as_str)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &SpellProfile> + '_ {
        self.spells.values()
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }
}

impl SpellOracle for SpellCatalog {
    fn spell(&self, spell_id: &str) -> Option<&SpellProfile> {
        self.get(spell_id)
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{MechanismKind, ResourceKind};

    use super::*;

    #[test]
    fn embedded_catalog_loads() {
        let catalog = SpellCatalog::embedded().expect("embedded catalog parses");

        let dial = catalog.get("XEL_DIAL").expect("dial is in the catalog");
        assert_eq!(dial.mechanism, Some(MechanismKind::Dial));
        assert_eq!(catalog.mechanism_kind("XEL_ROUAGE"), Some(MechanismKind::Gear));
        assert_eq!(
            catalog.mechanism_kind("XEL_REGULATEUR"),
            Some(MechanismKind::Regulator)
        );
        assert_eq!(catalog.mechanism_kind("XEL_AIGUILLE"), None);

        let vdt = catalog.get("XEL_VDT").expect("time theft is in the catalog");
        assert!(vdt.grants.iter().any(|g| g.kind == ResourceKind::Ap));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let profiles = vec![
            SpellProfile::new("XEL_AIGUILLE", 2, 0),
            SpellProfile::new("XEL_AIGUILLE", 3, 0),
        ];
        assert!(SpellCatalog::from_profiles(profiles).is_err());
    }
}
