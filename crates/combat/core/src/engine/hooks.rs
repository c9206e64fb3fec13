//! End-of-step hooks.
//!
//! Hooks run after every action of a step has validated and applied to the
//! scratch state, and before the step commits. Whatever they change is part
//! of the same atomic step. Registries are opt-in: an empty registry runs
//! nothing.

use std::sync::Arc;

use super::scratch::{StepEnv, StepScratch};
use crate::observer::SimEvent;
use crate::resources::{ResourceKind, sources};
use crate::state::MechanismKind;

pub trait StepHook: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging).
    fn name(&self) -> &'static str;

    /// Lower values run first.
    fn priority(&self) -> i32 {
        0
    }

    fn should_trigger(&self, scratch: &StepScratch, env: &StepEnv<'_>) -> bool;

    fn apply(&self, scratch: &mut StepScratch, env: &StepEnv<'_>);
}

/// +1 WP for every regulator standing on the board when a step completes.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegulatorHook;

impl StepHook for RegulatorHook {
    fn name(&self) -> &'static str {
        "regulator"
    }

    fn should_trigger(&self, scratch: &StepScratch, _env: &StepEnv<'_>) -> bool {
        scratch.board.count_of_kind(MechanismKind::Regulator) > 0
    }

    fn apply(&self, scratch: &mut StepScratch, env: &StepEnv<'_>) {
        let amount = scratch.board.count_of_kind(MechanismKind::Regulator) as u32;
        scratch.context.resources.regenerate(
            ResourceKind::Wp,
            amount,
            sources::REGULATOR,
            env.step,
            &mut scratch.regenerations,
        );
        scratch.emit(SimEvent::ResourceRegenerated {
            step: env.step,
            source: sources::REGULATOR.to_string(),
            kind: ResourceKind::Wp,
            amount,
        });
    }
}

/// Priority-ordered set of hooks.
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn StepHook>>,
}

impl HookRegistry {
    pub fn new(hooks: Vec<Arc<dyn StepHook>>) -> Self {
        let mut registry = Self { hooks };
        registry.sort();
        registry
    }

    /// Registry holding the built-in game rules.
    pub fn standard() -> Self {
        Self::new(vec![Arc::new(RegulatorHook)])
    }

    pub fn register(&mut self, hook: Arc<dyn StepHook>) {
        self.hooks.push(hook);
        self.sort();
    }

    fn sort(&mut self) {
        self.hooks.sort_by_key(|hook| hook.priority());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn StepHook>> {
        self.hooks.iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.hooks.iter().map(|hook| hook.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
