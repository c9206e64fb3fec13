use crate::resources::ResourceKind;
use crate::state::MechanismKind;

/// Resources handed back to the caster when a spell resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceGrant {
    pub kind: ResourceKind,
    pub amount: u32,
}

/// Catalog entry for a castable spell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellProfile {
    pub id: String,
    pub name: String,
    pub ap_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub wp_cost: u32,
    /// Mechanism created at the target tile, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mechanism: Option<MechanismKind>,
    /// Damage before any external modifiers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub grants: Vec<ResourceGrant>,
}

impl SpellProfile {
    pub fn new(id: impl Into<String>, ap_cost: u32, wp_cost: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            ap_cost,
            wp_cost,
            mechanism: None,
            base_damage: 0,
            grants: Vec::new(),
        }
    }

    pub fn with_mechanism(mut self, kind: MechanismKind) -> Self {
        self.mechanism = Some(kind);
        self
    }

    pub fn with_damage(mut self, base_damage: u32) -> Self {
        self.base_damage = base_damage;
        self
    }

    pub fn with_grant(mut self, kind: ResourceKind, amount: u32) -> Self {
        self.grants.push(ResourceGrant { kind, amount });
        self
    }
}

/// Read-only spell catalog.
pub trait SpellOracle: Send + Sync {
    fn spell(&self, spell_id: &str) -> Option<&SpellProfile>;

    /// Mechanism produced by `spell_id`, or `None` for unknown and
    /// non-mechanism spells.
    fn mechanism_kind(&self, spell_id: &str) -> Option<MechanismKind> {
        self.spell(spell_id).and_then(|profile| profile.mechanism)
    }
}
