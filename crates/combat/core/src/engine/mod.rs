//! Step execution engine.
//!
//! [`StepExecutor`] applies one timeline step atomically. Every action runs
//! against a [`StepScratch`] copy of the live board and context; the copy is
//! committed only when all actions succeed and end-of-step hooks have run.
//! The first failing action aborts the step, marks the remaining actions as
//! skipped, and leaves the live state exactly as it was.
mod errors;
mod hooks;
mod scratch;
mod transition;

pub use errors::{StepFailure, TransitionPhase, TransitionPhaseError};
pub use hooks::{HookRegistry, RegulatorHook, StepHook};
pub use scratch::{StepEnv, StepScratch};

use crate::action::{ActionKind, ActionOutcome};
use crate::config::SimConfig;
use crate::env::SimEnv;
use crate::error::SimError;
use crate::observer::{NoopObserver, SimEvent, SimObserver};
use crate::resources::{RegenerationEvent, RegenerationTracker, ResourceTotals};
use crate::state::{BoardState, SimulationContext};
use crate::timeline::{Build, Step};

static NOOP_OBSERVER: NoopObserver = NoopObserver;
static EMPTY_HOOKS: std::sync::LazyLock<HookRegistry> =
    std::sync::LazyLock::new(HookRegistry::default);

/// Where the executor is in its state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutorPhase {
    #[default]
    Idle,
    /// Running actions against the scratch state.
    Validating,
    /// Swapping the scratch state into the live state.
    Applying,
    Completed,
    Failed,
}

/// Result of executing one step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepResult {
    pub step_index: usize,
    pub step_id: String,
    /// One entry per declared action, in order.
    pub outcomes: Vec<ActionOutcome>,
    /// Context after the step; equal to the input context on failure.
    pub context_after: SimulationContext,
    /// Regeneration recorded by this step. Empty on failure.
    pub regenerations: Vec<RegenerationEvent>,
    pub success: bool,
    pub failure: Option<StepFailure>,
}

impl StepResult {
    pub fn total_damage(&self) -> u32 {
        self.outcomes.iter().map(|outcome| outcome.damage).sum()
    }

    pub fn total_cost(&self) -> ResourceTotals {
        self.outcomes.iter().fold(ResourceTotals::default(), |mut acc, outcome| {
            acc.ap += outcome.ap_cost;
            acc.wp += outcome.wp_cost;
            acc.mp += outcome.mp_cost;
            acc
        })
    }

    pub fn error_message(&self) -> Option<&str> {
        self.failure.as_ref().map(|failure| failure.message.as_str())
    }
}

/// Applies steps atomically against caller-owned state.
pub struct StepExecutor<'a> {
    oracles: SimEnv<'a>,
    build: &'a Build,
    config: &'a SimConfig,
    hooks: &'a HookRegistry,
    observer: &'a dyn SimObserver,
    phase: ExecutorPhase,
}

impl<'a> StepExecutor<'a> {
    pub fn new(oracles: SimEnv<'a>, build: &'a Build, config: &'a SimConfig) -> Self {
        Self {
            oracles,
            build,
            config,
            hooks: &EMPTY_HOOKS,
            observer: &NOOP_OBSERVER,
            phase: ExecutorPhase::Idle,
        }
    }

    pub fn with_hooks(mut self, hooks: &'a HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_observer(mut self, observer: &'a dyn SimObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn phase(&self) -> ExecutorPhase {
        self.phase
    }

    /// Executes `step` as the step at index `context.step`.
    ///
    /// On success `board`, `context` and `tracker` are replaced by the
    /// post-step state and the step counter advances. On failure none of them
    /// is touched.
    pub fn execute(
        &mut self,
        step: &Step,
        board: &mut BoardState,
        context: &mut SimulationContext,
        tracker: &mut RegenerationTracker,
    ) -> StepResult {
        let step_index = context.step;
        self.phase = ExecutorPhase::Validating;
        self.observer.on_event(&SimEvent::StepStarted {
            step: step_index,
            step_id: step.id.clone(),
            actions: step.actions.len(),
        });

        let env = StepEnv {
            oracles: self.oracles,
            build: self.build,
            config: self.config,
            step: step_index,
        };
        let mut scratch = StepScratch::new(board.clone(), *context);
        let mut outcomes = Vec::with_capacity(step.actions.len());

        for (index, action) in step.actions.iter().enumerate() {
            let mark = scratch.regenerations.events().len();
            match transition::execute_transition(action, &mut scratch, &env) {
                Ok(effect) => {
                    let regenerated = scratch.regenerations.events()[mark..].iter().fold(
                        ResourceTotals::default(),
                        |mut totals, event| {
                            totals.add(event.kind, event.amount);
                            totals
                        },
                    );
                    outcomes.push(ActionOutcome::succeeded(
                        index,
                        action.kind(),
                        effect,
                        regenerated,
                    ));
                }
                Err(err) => {
                    let failure = StepFailure {
                        step_index,
                        step_id: step.id.clone(),
                        action_index: index,
                        kind: action.kind(),
                        phase: err.phase,
                        message: err.error.to_string(),
                        error: err.error,
                    };
                    let remaining: Vec<ActionKind> =
                        step.actions[index + 1..].iter().map(|a| a.kind()).collect();
                    return self.abort(step, failure, outcomes, remaining, *context);
                }
            }
        }

        for hook in self.hooks.iter() {
            if hook.should_trigger(&scratch, &env) {
                hook.apply(&mut scratch, &env);
            }
        }

        self.phase = ExecutorPhase::Applying;
        let StepScratch {
            board: next_board,
            context: mut next_context,
            regenerations,
            pending,
        } = scratch;
        next_context.step = step_index + 1;
        *board = next_board;
        *context = next_context;
        let regenerations = regenerations.into_events();
        tracker.extend(regenerations.iter().cloned());

        for event in &pending {
            self.observer.on_event(event);
        }
        self.observer.on_event(&SimEvent::StepCommitted {
            step: step_index,
            step_id: step.id.clone(),
            available_ap: context.available_ap(),
            available_wp: context.available_wp(),
            available_mp: context.available_mp(),
        });
        self.phase = ExecutorPhase::Completed;

        StepResult {
            step_index,
            step_id: step.id.clone(),
            outcomes,
            context_after: *context,
            regenerations,
            success: true,
            failure: None,
        }
    }

    fn abort(
        &mut self,
        step: &Step,
        failure: StepFailure,
        mut outcomes: Vec<ActionOutcome>,
        remaining: Vec<ActionKind>,
        context: SimulationContext,
    ) -> StepResult {
        self.observer.on_event(&SimEvent::ActionRejected {
            step: failure.step_index,
            action_index: failure.action_index,
            kind: failure.kind,
            phase: failure.phase,
            code: failure.error.error_code().to_string(),
            message: failure.message.clone(),
        });

        outcomes.push(ActionOutcome::failed(
            failure.action_index,
            failure.kind,
            failure.message.clone(),
        ));
        for (offset, kind) in remaining.into_iter().enumerate() {
            outcomes.push(ActionOutcome::skipped(failure.action_index + 1 + offset, kind));
        }

        self.observer.on_event(&SimEvent::StepAborted {
            step: failure.step_index,
            step_id: step.id.clone(),
            action_index: failure.action_index,
            message: failure.message.clone(),
        });
        self.phase = ExecutorPhase::Failed;

        StepResult {
            step_index: failure.step_index,
            step_id: step.id.clone(),
            outcomes,
            context_after: context,
            regenerations: Vec::new(),
            success: false,
            failure: Some(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::action::{Action, ActionError, ActionKind, OutcomeStatus};
    use crate::env::{DamageOracle, DamageRequest, DamageRoll, SpellOracle, SpellProfile};
    use crate::observer::RecordingObserver;
    use crate::resources::ResourceKind;
    use crate::state::{Entity, EntityId, Facing, MechanismKind, Position};

    struct Catalog(HashMap<String, SpellProfile>);

    impl SpellOracle for Catalog {
        fn spell(&self, id: &str) -> Option<&SpellProfile> {
            self.0.get(id)
        }
    }

    struct Flat;

    impl DamageOracle for Flat {
        fn roll(&self, request: &DamageRequest<'_>) -> DamageRoll {
            DamageRoll {
                damage: request.spell.base_damage,
                critical: false,
            }
        }
    }

    fn catalog() -> Catalog {
        let spells = [
            SpellProfile::new("XEL_HAND", 4, 0).with_damage(30),
            SpellProfile::new("XEL_DIAL", 3, 2).with_mechanism(MechanismKind::Dial),
            SpellProfile::new("XEL_REGULATOR", 2, 0).with_mechanism(MechanismKind::Regulator),
            SpellProfile::new("XEL_COG", 2, 0).with_mechanism(MechanismKind::Gear),
            SpellProfile::new("XEL_FRAPPE", 3, 0).with_damage(20),
        ];
        Catalog(spells.into_iter().map(|s| (s.id.clone(), s)).collect())
    }

    fn build() -> Build {
        Build::new("xelor", 12, 3, 6).with_spells(["XEL_HAND", "XEL_DIAL", "XEL_REGULATOR", "XEL_COG"])
    }

    fn board() -> BoardState {
        BoardState::new(vec![Entity::player("xelor", Position::new(6, 6))])
    }

    fn board_with_enemy() -> BoardState {
        BoardState::new(vec![
            Entity::player("xelor", Position::new(6, 6)),
            Entity::enemy(EntityId(1), "dummy", Position::new(8, 6)),
        ])
    }

    /// Runs a single step that must fail and checks nothing leaked out of it.
    fn run_rejected(build: &Build, board_in: BoardState, actions: Vec<Action>) -> StepFailure {
        let (spells, damage, config) = (catalog(), Flat, SimConfig::default());
        let mut executor = StepExecutor::new(SimEnv::with_all(&spells, &damage), build, &config);
        let (mut board, mut context, mut tracker) =
            (board_in, build.initial_context(), RegenerationTracker::new());
        let before = (board.clone(), context);

        let result = executor.execute(
            &Step::new("rejected", actions),
            &mut board,
            &mut context,
            &mut tracker,
        );

        assert!(!result.success);
        assert_eq!(executor.phase(), ExecutorPhase::Failed);
        assert_eq!((board, context), before);
        assert!(tracker.events().is_empty());
        result.failure.expect("failure is reported")
    }

    #[test]
    fn committed_step_advances_state() {
        let (spells, damage, build, config) = (catalog(), Flat, build(), SimConfig::default());
        let mut executor =
            StepExecutor::new(SimEnv::with_all(&spells, &damage), &build, &config);
        let (mut board, mut context, mut tracker) =
            (board(), build.initial_context(), RegenerationTracker::new());

        let step = Step::new(
            "open",
            vec![
                Action::cast_spell("XEL_DIAL", Position::new(7, 6)),
                Action::cast_spell("XEL_HAND", Position::new(8, 6)),
            ],
        );
        let result = executor.execute(&step, &mut board, &mut context, &mut tracker);

        assert!(result.success);
        assert_eq!(executor.phase(), ExecutorPhase::Completed);
        assert_eq!(result.total_damage(), 30);
        assert_eq!(context.available_ap(), 5);
        assert_eq!(context.available_wp(), 4);
        assert_eq!(context.step, 1);
        assert_eq!(board.count_of_kind(MechanismKind::Dial), 1);
        assert_eq!(board.dial_hours.len(), 12);
    }

    #[test]
    fn failing_action_rolls_back_whole_step() {
        let (spells, damage, build, config) = (catalog(), Flat, build(), SimConfig::default());
        let observer = RecordingObserver::new();
        let mut executor = StepExecutor::new(SimEnv::with_all(&spells, &damage), &build, &config)
            .with_observer(&observer);
        let (mut board, mut context, mut tracker) =
            (board(), build.initial_context(), RegenerationTracker::new());
        let before = (board.clone(), context);

        let step = Step::new(
            "greedy",
            vec![
                Action::cast_spell("XEL_DIAL", Position::new(7, 6)),
                Action::cast_spell("XEL_HAND", Position::new(8, 6)),
                Action::cast_spell("XEL_HAND", Position::new(8, 6)),
                Action::cast_spell("XEL_HAND", Position::new(8, 6)),
                Action::move_to(Position::new(6, 7)),
            ],
        );
        let result = executor.execute(&step, &mut board, &mut context, &mut tracker);

        assert!(!result.success);
        assert_eq!(executor.phase(), ExecutorPhase::Failed);
        assert_eq!((board, context), before);
        assert_eq!(result.context_after, before.1);

        let statuses: Vec<_> = result.outcomes.iter().map(|o| o.status).collect();
        assert_eq!(
            statuses,
            vec![
                OutcomeStatus::Succeeded,
                OutcomeStatus::Succeeded,
                OutcomeStatus::Succeeded,
                OutcomeStatus::Failed,
                OutcomeStatus::Skipped,
            ]
        );

        let failure = result.failure.expect("failure is reported");
        assert_eq!(failure.action_index, 3);
        assert_eq!(failure.phase, TransitionPhase::PreValidate);
        assert!(failure.message.contains("insufficient AP"));

        // Board events of an aborted step never reach the observer.
        let events = observer.events();
        assert!(
            !events
                .iter()
                .any(|event| matches!(event, SimEvent::MechanismCreated { .. }))
        );
        assert!(matches!(events.last(), Some(SimEvent::StepAborted { .. })));
    }

    #[test]
    fn regulator_hook_runs_before_commit() {
        let (spells, damage, build, config) = (catalog(), Flat, build(), SimConfig::default());
        let hooks = HookRegistry::standard();
        let mut executor = StepExecutor::new(SimEnv::with_all(&spells, &damage), &build, &config)
            .with_hooks(&hooks);
        let (mut board, mut context, mut tracker) =
            (board(), build.initial_context(), RegenerationTracker::new());

        let setup = Step::new(
            "setup",
            vec![
                Action::cast_spell("XEL_DIAL", Position::new(7, 6)),
                Action::cast_spell("XEL_REGULATOR", Position::new(10, 6)),
            ],
        );
        let result = executor.execute(&setup, &mut board, &mut context, &mut tracker);
        assert!(result.success, "{:?}", result.failure);

        // 6 WP - 2 for the dial + 1 from the regulator.
        assert_eq!(context.available_wp(), 5);
        assert_eq!(tracker.events().len(), 1);
        assert_eq!(tracker.events()[0].kind, ResourceKind::Wp);
        assert_eq!(tracker.events()[0].source, "regulator");
    }

    #[test]
    fn empty_step_commits() {
        let (build, config) = (build(), SimConfig::default());
        let mut executor = StepExecutor::new(SimEnv::empty(), &build, &config);
        let (mut board, mut context, mut tracker) =
            (board(), build.initial_context(), RegenerationTracker::new());

        let result = executor.execute(
            &Step::new("wait", Vec::new()),
            &mut board,
            &mut context,
            &mut tracker,
        );
        assert!(result.success);
        assert!(result.outcomes.is_empty());
        assert_eq!(context.step, 1);
    }

    #[test]
    fn out_of_bounds_cast_is_rejected() {
        let failure = run_rejected(
            &build(),
            board(),
            vec![Action::cast_spell("XEL_HAND", Position::new(13, 6))],
        );
        assert_eq!(
            failure.error,
            ActionError::InvalidTarget {
                position: Position::new(13, 6)
            }
        );
        assert_eq!(failure.phase, TransitionPhase::PreValidate);
    }

    #[test]
    fn spell_outside_build_is_rejected() {
        let failure = run_rejected(
            &build(),
            board(),
            vec![Action::cast_spell("XEL_FRAPPE", Position::new(8, 6))],
        );
        assert_eq!(failure.error, ActionError::SpellNotInBuild("XEL_FRAPPE".into()));
    }

    #[test]
    fn regulator_off_the_ring_undoes_the_dial_too() {
        let failure = run_rejected(
            &build(),
            board(),
            vec![
                Action::cast_spell("XEL_DIAL", Position::new(7, 6)),
                Action::cast_spell("XEL_REGULATOR", Position::new(9, 9)),
            ],
        );
        assert_eq!(failure.action_index, 1);
        assert_eq!(
            failure.error,
            ActionError::RegulatorOffDial {
                position: Position::new(9, 9)
            }
        );
    }

    #[test]
    fn mechanism_cannot_land_on_an_occupied_tile() {
        let failure = run_rejected(
            &build(),
            board_with_enemy(),
            vec![Action::cast_spell("XEL_DIAL", Position::new(8, 6))],
        );
        assert_eq!(
            failure.error,
            ActionError::Occupied {
                position: Position::new(8, 6)
            }
        );

        let failure = run_rejected(
            &build(),
            board(),
            vec![Action::cast_spell("XEL_COG", Position::new(6, 6))],
        );
        assert_eq!(
            failure.error,
            ActionError::Occupied {
                position: Position::new(6, 6)
            }
        );
    }

    #[test]
    fn move_is_charged_per_tile_and_blocked_by_entities() {
        let (spells, damage, build, config) = (catalog(), Flat, build(), SimConfig::default());
        let mut executor =
            StepExecutor::new(SimEnv::with_all(&spells, &damage), &build, &config);
        let (mut board, mut context, mut tracker) =
            (board_with_enemy(), build.initial_context(), RegenerationTracker::new());

        let result = executor.execute(
            &Step::new("walk", vec![Action::move_to(Position::new(6, 8))]),
            &mut board,
            &mut context,
            &mut tracker,
        );
        assert!(result.success, "{:?}", result.failure);
        assert_eq!(context.available_mp(), 1);
        assert_eq!(
            board.entity(EntityId::PLAYER).map(|e| e.position),
            Some(Position::new(6, 8))
        );

        let failure = run_rejected(&build, board_with_enemy(), vec![Action::move_to(Position::new(8, 6))]);
        assert_eq!(
            failure.error,
            ActionError::Occupied {
                position: Position::new(8, 6)
            }
        );

        let failure = run_rejected(&build, self::board(), vec![Action::move_to(Position::new(6, 10))]);
        assert_eq!(
            failure.error,
            ActionError::InsufficientResource {
                kind: ResourceKind::Mp,
                required: 4,
                available: 3,
            }
        );
    }

    #[test]
    fn transpose_swaps_places_with_an_entity() {
        let (spells, damage, build, config) = (catalog(), Flat, build(), SimConfig::default());
        let mut executor =
            StepExecutor::new(SimEnv::with_all(&spells, &damage), &build, &config);
        let (mut board, mut context, mut tracker) =
            (board_with_enemy(), build.initial_context(), RegenerationTracker::new());

        let result = executor.execute(
            &Step::new("swap", vec![Action::transpose(Position::new(8, 6))]),
            &mut board,
            &mut context,
            &mut tracker,
        );
        assert!(result.success, "{:?}", result.failure);
        assert_eq!(
            board.entity(EntityId::PLAYER).map(|e| e.position),
            Some(Position::new(8, 6))
        );
        assert_eq!(
            board.entity(EntityId(1)).map(|e| e.position),
            Some(Position::new(6, 6))
        );
        assert_eq!(context.available_mp(), 2);
    }

    #[test]
    fn transpose_onto_own_tile_is_rejected() {
        let failure = run_rejected(&build(), board(), vec![Action::transpose(Position::new(6, 6))]);
        assert_eq!(failure.kind, ActionKind::Transpose);
        assert_eq!(
            failure.error,
            ActionError::NothingToTranspose {
                position: Position::new(6, 6)
            }
        );

        let failure = run_rejected(&build(), board(), vec![Action::transpose(Position::new(9, 9))]);
        assert_eq!(
            failure.error,
            ActionError::NothingToTranspose {
                position: Position::new(9, 9)
            }
        );
    }

    #[test]
    fn swapping_with_a_gear_charges_it_up_to_the_cap() {
        let (spells, damage, config) = (catalog(), Flat, SimConfig::default());
        let build = Build::new("xelor", 12, 6, 6).with_spells(["XEL_COG"]);
        let mut executor =
            StepExecutor::new(SimEnv::with_all(&spells, &damage), &build, &config);
        let (mut board, mut context, mut tracker) =
            (board(), build.initial_context(), RegenerationTracker::new());

        let step = Step::new(
            "wind",
            vec![
                Action::cast_spell("XEL_COG", Position::new(7, 6)),
                Action::transpose(Position::new(7, 6)),
                Action::transpose(Position::new(6, 6)),
                Action::transpose(Position::new(7, 6)),
                Action::transpose(Position::new(6, 6)),
            ],
        );
        let result = executor.execute(&step, &mut board, &mut context, &mut tracker);
        assert!(result.success, "{:?}", result.failure);

        let gear = board.mechanism_of_kind(MechanismKind::Gear).expect("gear placed");
        assert_eq!(gear.charges, SimConfig::MAX_MECHANISM_CHARGES);
        assert_eq!(gear.position, Position::new(7, 6));
        assert_eq!(
            board.entity(EntityId::PLAYER).map(|e| e.position),
            Some(Position::new(6, 6))
        );
        assert_eq!(context.available_mp(), 2);
    }

    #[test]
    fn swapping_with_a_dial_carries_its_ring_along() {
        let (spells, damage, build, config) = (catalog(), Flat, build(), SimConfig::default());
        let mut executor =
            StepExecutor::new(SimEnv::with_all(&spells, &damage), &build, &config);
        let (mut board, mut context, mut tracker) =
            (board(), build.initial_context(), RegenerationTracker::new());

        let result = executor.execute(
            &Step::new("dial", vec![Action::cast_spell("XEL_DIAL", Position::new(7, 6))]),
            &mut board,
            &mut context,
            &mut tracker,
        );
        assert!(result.success, "{:?}", result.failure);
        let dial = board.mechanism_of_kind(MechanismKind::Dial).map(|m| m.id).expect("dial placed");
        let noon = board.dial_hour_position(dial, 12).expect("hour 12 on board");

        let result = executor.execute(
            &Step::new("swap", vec![Action::transpose(Position::new(7, 6))]),
            &mut board,
            &mut context,
            &mut tracker,
        );
        assert!(result.success, "{:?}", result.failure);

        assert_eq!(board.mechanism(dial).map(|m| m.position), Some(Position::new(6, 6)));
        assert_eq!(board.mechanism(dial).map(|m| m.charges), Some(0));
        assert_eq!(board.dial_hour_position(dial, 12), Some(noon.offset(-1, 0)));
        assert_eq!(board.dial_hours.len(), 12);
    }

    #[test]
    fn change_facing_is_free() {
        let (spells, damage, build, config) = (catalog(), Flat, build(), SimConfig::default());
        let mut executor =
            StepExecutor::new(SimEnv::with_all(&spells, &damage), &build, &config);
        let (mut board, mut context, mut tracker) =
            (board(), build.initial_context(), RegenerationTracker::new());
        let before = context;

        let result = executor.execute(
            &Step::new("turn", vec![Action::change_facing(Facing::Back)]),
            &mut board,
            &mut context,
            &mut tracker,
        );
        assert!(result.success, "{:?}", result.failure);
        assert_eq!(
            board.entity(EntityId::PLAYER).map(|e| e.facing),
            Some(Facing::Back)
        );
        assert_eq!(context.resources, before.resources);
    }
}
