use std::collections::BTreeSet;

use crate::action::Action;
use crate::resources::ResourceLedger;
use crate::state::SimulationContext;

/// Character build: the resource budget and what the character owns.
///
/// Immutable input to a run; owned by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Build {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub ap_max: u32,
    pub mp_max: u32,
    pub wp_max: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passives: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sublimations: BTreeSet<String>,
}

impl Build {
    pub fn new(id: impl Into<String>, ap_max: u32, mp_max: u32, wp_max: u32) -> Self {
        Self {
            id: id.into(),
            ap_max,
            mp_max,
            wp_max,
            ..Self::default()
        }
    }

    pub fn with_spells<I, S>(mut self, spells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spells.extend(spells.into_iter().map(Into::into));
        self
    }

    pub fn owns_spell(&self, spell_id: &str) -> bool {
        self.spells.contains(spell_id)
    }

    /// Full budget at the start of a run.
    pub fn initial_context(&self) -> SimulationContext {
        SimulationContext::new(ResourceLedger::new(self.ap_max, self.wp_max, self.mp_max))
    }
}

/// One scripted turn fragment: an ordered list of actions executed atomically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    pub actions: Vec<Action>,
}

impl Step {
    pub fn new(id: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            id: id.into(),
            description: None,
            actions,
        }
    }
}

/// Ordered script being simulated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeline {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub build_id: String,
    pub steps: Vec<Step>,
}

impl Timeline {
    pub fn new(id: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            id: id.into(),
            steps,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }
}
