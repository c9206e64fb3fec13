//! Deterministic combat timeline simulation.
//!
//! `combat-core` holds the canonical rules: resource accounting, atomic step
//! execution, mechanism placement with dial ring geometry, and the timeline
//! navigation state (history snapshots and the result cache). It performs no
//! I/O; the spell catalog and the damage calculator are injected through
//! [`env::SimEnv`], and diagnostics leave through [`observer::SimObserver`].
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod mechanism;
pub mod observer;
pub mod resources;
pub mod state;
pub mod timeline;

pub use action::{
    Action, ActionEffect, ActionError, ActionKind, ActionOutcome, ActionSpec, ActionTransition,
    CastSpellAction, CastSpellOutcome, ChangeFacingAction, ChangeFacingOutcome, MoveAction,
    MoveOutcome, OutcomeStatus, TransposeAction, TransposeOutcome, TransposePartner,
};
pub use config::SimConfig;
pub use engine::{
    ExecutorPhase, HookRegistry, RegulatorHook, StepEnv, StepExecutor, StepFailure, StepHook,
    StepResult, StepScratch, TransitionPhase, TransitionPhaseError,
};
pub use env::{
    DamageOracle, DamageRequest, DamageRoll, OracleError, ResourceGrant, SimEnv, SpellOracle,
    SpellProfile,
};
pub use error::{ErrorSeverity, SimError};
pub use mechanism::{
    HourSlot, MechanismError, MechanismPlacement, MechanismPlacementEngine, QuarterTurns,
    ring_positions,
};
pub use observer::{NoopObserver, RecordingObserver, SimEvent, SimObserver};
pub use resources::{
    InsufficientResource, RegenerationEvent, RegenerationSummary, RegenerationTracker,
    ResourceKind, ResourceLedger, ResourceTotals,
};
pub use state::{
    BoardState, DialHour, DialHourId, Entity, EntityId, EntityKind, Facing, Mechanism,
    MechanismId, MechanismKind, Position, SimulationContext,
};
pub use timeline::{
    BoardSnapshot, BoardStateHistory, Build, NavigationError, RunProgress, RunReport, RunStatus,
    RunSummary, SimulationCache, Step, Timeline, TimelineRunner,
};
