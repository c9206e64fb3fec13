//! Data-driven combat content and loaders.
//!
//! This crate houses the static data a simulation run consumes and provides
//! loaders for RON/TOML files:
//! - Spell catalogs (data-driven via RON), the embedded one covering the Xelor
//! - Character builds (RON)
//! - Boards with their starting entities (RON)
//! - Timelines of steps and actions (RON)
//! - Simulation configuration (TOML)
//!
//! The catalog implements [`combat_core::SpellOracle`] and [`FlatDamage`]
//! implements [`combat_core::DamageOracle`], so loaded content can be wired
//! straight into a [`combat_core::SimEnv`].

pub mod damage;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use damage::FlatDamage;

#[cfg(feature = "loaders")]
pub use loaders::{
    BoardLoader, BoardSpec, BuildLoader, ConfigLoader, ContentFactory, EnemySpec, LoadResult,
    SpellCatalog, StepSpec, TimelineLoader, TimelineSpec,
};
