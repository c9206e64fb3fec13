use crate::resources::{ResourceKind, ResourceLedger};

/// Mutable per-run counters: the resource ledger plus the step cursor.
///
/// One instance per run. Reset at run start, replaced wholesale by the
/// executor when a step commits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationContext {
    pub resources: ResourceLedger,
    /// Number of steps committed so far; also the index of the next step.
    pub step: usize,
}

impl SimulationContext {
    pub const fn new(resources: ResourceLedger) -> Self {
        Self { resources, step: 0 }
    }

    pub const fn available_ap(&self) -> u32 {
        self.resources.available(ResourceKind::Ap)
    }

    pub const fn available_wp(&self) -> u32 {
        self.resources.available(ResourceKind::Wp)
    }

    pub const fn available_mp(&self) -> u32 {
        self.resources.available(ResourceKind::Mp)
    }
}
