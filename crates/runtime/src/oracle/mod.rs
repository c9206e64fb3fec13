//! Shared handles to the read-only collaborators of a simulation.
//!
//! [`OracleManager`] keeps the spell catalog and the damage calculator behind
//! `Arc`s so the worker can build [`SimEnv`] views on demand. The data is
//! immutable at runtime; dynamic state lives in the timeline runner.
use std::sync::Arc;

use combat_content::{FlatDamage, LoadResult, SpellCatalog};
use combat_core::{DamageOracle, SimEnv, SpellOracle};

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) spells: Arc<dyn SpellOracle>,
    pub(crate) damage: Arc<dyn DamageOracle>,
}

impl OracleManager {
    /// Creates a new oracle manager
    pub fn new(spells: Arc<dyn SpellOracle>, damage: Arc<dyn DamageOracle>) -> Self {
        Self { spells, damage }
    }

    /// The embedded spell catalog with flat facing-aware damage.
    pub fn embedded() -> LoadResult<Self> {
        Ok(Self::from_catalog(SpellCatalog::embedded()?))
    }

    pub fn from_catalog(catalog: SpellCatalog) -> Self {
        Self::new(Arc::new(catalog), Arc::new(FlatDamage::new()))
    }

    /// Converts oracle manager into a SimEnv for combat-core
    pub fn as_sim_env(&self) -> SimEnv<'_> {
        SimEnv::with_all(self.spells.as_ref(), self.damage.as_ref())
    }

    pub fn spells(&self) -> &dyn SpellOracle {
        self.spells.as_ref()
    }
}

impl std::fmt::Debug for OracleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleManager").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_manager_resolves_catalog_spells() {
        let oracles = OracleManager::embedded().expect("embedded catalog parses");
        let env = oracles.as_sim_env();

        let spells = env.spells().expect("spell oracle configured");
        assert!(spells.spell("XEL_DIAL").is_some());
        assert!(env.damage().is_ok());
    }
}
