//! Traits describing read-only collaborators.
//!
//! The spell catalog and the damage calculator live outside the core. The
//! [`SimEnv`] aggregate bundles them so the executor can reach everything it
//! needs without coupling to concrete implementations.
mod damage;
mod error;
mod spells;

pub use damage::{DamageOracle, DamageRequest, DamageRoll};
pub use error::OracleError;
pub use spells::{ResourceGrant, SpellOracle, SpellProfile};

/// Aggregates read-only oracles required by the executor.
#[derive(Clone, Copy)]
pub struct SimEnv<'a> {
    spells: Option<&'a dyn SpellOracle>,
    damage: Option<&'a dyn DamageOracle>,
}

impl<'a> SimEnv<'a> {
    pub fn new(spells: Option<&'a dyn SpellOracle>, damage: Option<&'a dyn DamageOracle>) -> Self {
        Self { spells, damage }
    }

    pub fn with_all(spells: &'a dyn SpellOracle, damage: &'a dyn DamageOracle) -> Self {
        Self::new(Some(spells), Some(damage))
    }

    pub fn empty() -> Self {
        Self {
            spells: None,
            damage: None,
        }
    }

    /// Returns the SpellOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SpellsNotAvailable` if no spell oracle was provided.
    pub fn spells(&self) -> Result<&'a dyn SpellOracle, OracleError> {
        self.spells.ok_or(OracleError::SpellsNotAvailable)
    }

    /// Returns the DamageOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::DamageNotAvailable` if no damage oracle was provided.
    pub fn damage(&self) -> Result<&'a dyn DamageOracle, OracleError> {
        self.damage.ok_or(OracleError::DamageNotAvailable)
    }
}

impl std::fmt::Debug for SimEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimEnv")
            .field("spells", &self.spells.is_some())
            .field("damage", &self.damage.is_some())
            .finish()
    }
}
