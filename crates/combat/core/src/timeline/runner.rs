//! Timeline orchestration: single steps, full runs, rewind and reset.

use std::sync::Arc;

use super::{
    BoardSnapshot, BoardStateHistory, Build, NavigationError, RunSummary, SimulationCache,
    Timeline,
};
use crate::config::SimConfig;
use crate::engine::{HookRegistry, StepExecutor, StepFailure, StepResult};
use crate::env::SimEnv;
use crate::observer::{NoopObserver, SimEvent, SimObserver};
use crate::resources::RegenerationTracker;
use crate::state::{BoardState, SimulationContext};

/// How a full run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunStatus {
    /// Every remaining step committed.
    Completed,
    /// A step failed; the board sits at the last committed step.
    Halted(StepFailure),
    /// Stopped between steps before `at_step` ran.
    Cancelled { at_step: usize },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    pub status: RunStatus,
    /// Results produced by this run, including the failing step if any.
    pub results: Vec<StepResult>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }
}

/// Results collected by a full run, whoever drives its loop.
#[derive(Debug, Default)]
pub struct RunProgress {
    results: Vec<StepResult>,
}

impl RunProgress {
    /// Records an executed step. Returns `Halted` when it failed.
    pub fn record(&mut self, result: StepResult) -> Option<RunStatus> {
        let failure = result.failure.clone();
        self.results.push(result);
        failure.map(RunStatus::Halted)
    }

    pub fn finish(self, status: RunStatus, runner: &TimelineRunner) -> RunReport {
        RunReport {
            status,
            results: self.results,
            summary: runner.summary(),
        }
    }
}

/// Drives a [`StepExecutor`] over a timeline.
///
/// Owns the live board and context together with their history, cache and
/// regeneration log. All mutation flows through [`step`](Self::step),
/// [`rewind_to`](Self::rewind_to) and [`reset`](Self::reset).
pub struct TimelineRunner {
    build: Build,
    timeline: Timeline,
    config: SimConfig,
    board: BoardState,
    context: SimulationContext,
    history: BoardStateHistory,
    cache: SimulationCache,
    tracker: RegenerationTracker,
    hooks: HookRegistry,
    observer: Arc<dyn SimObserver>,
    last_failure: Option<StepResult>,
}

impl TimelineRunner {
    pub fn new(build: Build, timeline: Timeline, board: BoardState, config: SimConfig) -> Self {
        let context = build.initial_context();
        let mut history = BoardStateHistory::new();
        history.save_initial(&board, context);

        Self {
            build,
            timeline,
            config,
            board,
            context,
            history,
            cache: SimulationCache::new(),
            tracker: RegenerationTracker::new(),
            hooks: HookRegistry::default(),
            observer: Arc::new(NoopObserver),
            last_failure: None,
        }
    }

    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn SimObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn build(&self) -> &Build {
        &self.build
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn context(&self) -> &SimulationContext {
        &self.context
    }

    pub fn history(&self) -> &BoardStateHistory {
        &self.history
    }

    pub fn tracker(&self) -> &RegenerationTracker {
        &self.tracker
    }

    /// Index of the next step to execute.
    pub fn cursor(&self) -> usize {
        self.context.step
    }

    pub fn is_finished(&self) -> bool {
        self.cursor() >= self.timeline.len()
    }

    /// The most recent failed step, cleared by the next commit or rewind.
    pub fn last_failure(&self) -> Option<&StepResult> {
        self.last_failure.as_ref()
    }

    /// Cached result of an executed step. Indices at or past the cursor are
    /// never served.
    pub fn result_at(&self, index: usize) -> Option<&StepResult> {
        if index >= self.cursor() {
            return None;
        }
        self.cache.get(index)
    }

    pub fn snapshot_at(&self, index: usize) -> Option<&BoardSnapshot> {
        self.history.get(index)
    }

    /// Executes the step at the cursor.
    ///
    /// A failed step is reported through the returned result; the cursor does
    /// not move and the board is untouched.
    pub fn step(&mut self, env: SimEnv<'_>) -> Result<StepResult, NavigationError> {
        self.execute_next(env).ok_or(NavigationError::TimelineFinished {
            len: self.timeline.len(),
        })
    }

    fn execute_next(&mut self, env: SimEnv<'_>) -> Option<StepResult> {
        let index = self.cursor();
        let step = self.timeline.step(index)?;

        let mut executor = StepExecutor::new(env, &self.build, &self.config)
            .with_hooks(&self.hooks)
            .with_observer(self.observer.as_ref());
        let result = executor.execute(step, &mut self.board, &mut self.context, &mut self.tracker);

        if result.success {
            self.history.push(&self.board, self.context);
            self.cache.put(index, result.clone());
            self.last_failure = None;
        } else {
            self.last_failure = Some(result.clone());
        }
        Some(result)
    }

    /// Runs from the cursor to the end, halting on the first failed step.
    pub fn run_to_end(&mut self, env: SimEnv<'_>) -> RunReport {
        self.run_while(env, |_| true)
    }

    /// Like [`run_to_end`](Self::run_to_end), but asks `keep_going` before
    /// each step. Returning `false` cancels the run at that boundary.
    pub fn run_while<F>(&mut self, env: SimEnv<'_>, mut keep_going: F) -> RunReport
    where
        F: FnMut(usize) -> bool,
    {
        let mut progress = RunProgress::default();
        let status = loop {
            if let Some(status) = self.stop_before_next(&mut keep_going) {
                break status;
            }
            let Some(result) = self.execute_next(env) else {
                break RunStatus::Completed;
            };
            if let Some(status) = progress.record(result) {
                break status;
            }
        };
        progress.finish(status, self)
    }

    /// Step-boundary check of a full run. Returns `Completed` when no step is
    /// left and `Cancelled` when `keep_going` refuses the step at the cursor.
    pub fn stop_before_next(&self, keep_going: impl FnOnce(usize) -> bool) -> Option<RunStatus> {
        if self.is_finished() {
            return Some(RunStatus::Completed);
        }
        let index = self.cursor();
        (!keep_going(index)).then_some(RunStatus::Cancelled { at_step: index })
    }

    /// Restores the state after `index` steps and drops everything later:
    /// history, cached results and regeneration of the undone steps.
    pub fn rewind_to(&mut self, index: usize) -> Result<(), NavigationError> {
        let snapshot = self.history.restore_at_index(index)?;
        self.board = snapshot.board;
        self.context = snapshot.context;
        self.cache.trim_to_step(index);
        self.tracker.truncate_from_step(index);
        self.last_failure = None;
        self.observer.on_event(&SimEvent::Rewound { to: index });
        Ok(())
    }

    /// Back to the initial state with an empty regeneration log.
    pub fn reset(&mut self) -> Result<(), NavigationError> {
        let snapshot = self.history.restore_at_index(0)?;
        self.board = snapshot.board;
        self.context = snapshot.context;
        self.cache.clear();
        self.tracker.clear();
        self.last_failure = None;
        self.observer.on_event(&SimEvent::Reset);
        Ok(())
    }

    /// Aggregate over committed steps plus the pending failure, if any.
    pub fn summary(&self) -> RunSummary {
        RunSummary::fold(
            self.cache.results().chain(self.last_failure.as_ref()),
            &self.tracker.summary(),
            &self.context,
        )
    }
}

impl std::fmt::Debug for TimelineRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineRunner")
            .field("build", &self.build.id)
            .field("timeline", &self.timeline.id)
            .field("cursor", &self.cursor())
            .field("steps", &self.timeline.len())
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
