//! Simulation worker that owns the authoritative [`TimelineRunner`].
//!
//! Receives commands from [`crate::RuntimeHandle`], executes steps through
//! the runner, and publishes step, run and navigation events to the EventBus.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use combat_core::{
    BoardSnapshot, RunProgress, RunReport, RunStatus, RunSummary, StepResult, TimelineRunner,
};
use tracing::{debug, info, warn};

use crate::api::Result;
use crate::events::{Event, EventBus, NavigationEvent, RunEvent, StepEvent};
use crate::oracle::OracleManager;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Execute the step at the cursor.
    Step {
        reply: oneshot::Sender<Result<StepResult>>,
    },
    /// Execute every remaining step, pacing and checking for cancellation
    /// between steps.
    RunToEnd {
        reply: oneshot::Sender<Result<RunReport>>,
    },
    /// Restore the state after `index` committed steps.
    RewindTo {
        index: usize,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Back to the initial state.
    Reset { reply: oneshot::Sender<Result<()>> },
    /// Query the live board and context (read-only).
    QueryBoard {
        reply: oneshot::Sender<BoardSnapshot>,
    },
    /// Cached result of an executed step.
    QueryResult {
        index: usize,
        reply: oneshot::Sender<Option<StepResult>>,
    },
    /// Aggregate of the committed steps so far.
    QuerySummary { reply: oneshot::Sender<RunSummary> },
}

/// Run flags shared by every handle and the worker.
///
/// A handle claims the run slot before sending [`Command::RunToEnd`]; the
/// worker releases it once the run loop is over, so a run stays in flight
/// even when the caller stops waiting for its reply.
#[derive(Debug, Default)]
pub struct RunControl {
    in_flight: AtomicBool,
    cancel: AtomicBool,
}

impl RunControl {
    /// Takes the single run slot and clears any stale cancel request.
    /// Returns `false` when a run is already in flight.
    pub(crate) fn try_claim(&self) -> bool {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.cancel.store(false, Ordering::Release);
        true
    }

    pub(crate) fn release(&self) {
        self.cancel.store(false, Ordering::Release);
        self.in_flight.store(false, Ordering::Release);
    }

    pub(crate) fn request_cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    pub(crate) fn cancel_requested(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Background task that processes simulation commands.
///
/// The worker is the only owner of the board, context, history and cache;
/// every mutation arrives as a [`Command`] and runs to completion before the
/// next one is received.
pub struct SimulationWorker {
    runner: TimelineRunner,
    oracles: OracleManager,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    control: Arc<RunControl>,
    step_delay: Duration,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        runner: TimelineRunner,
        oracles: OracleManager,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        control: Arc<RunControl>,
        step_delay: Duration,
    ) -> Self {
        info!(
            "SimulationWorker initialized with timeline {:?} ({} steps), build {:?}",
            runner.timeline().id,
            runner.timeline().len(),
            runner.build().id
        );

        Self {
            runner,
            oracles,
            command_rx,
            event_bus,
            control,
            step_delay,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd).await;
                }
                else => break,
            }
        }
        debug!("SimulationWorker stopped: command channel closed");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Step { reply } => {
                let result = self.execute_step();
                if reply.send(result).is_err() {
                    debug!("Step reply channel closed (caller dropped)");
                }
            }
            Command::RunToEnd { reply } => {
                let report = self.run_to_end().await;
                self.control.release();
                if reply.send(report).is_err() {
                    debug!("RunToEnd reply channel closed (caller dropped)");
                }
            }
            Command::RewindTo { index, reply } => {
                let result = self.rewind_to(index);
                if reply.send(result).is_err() {
                    debug!("RewindTo reply channel closed (caller dropped)");
                }
            }
            Command::Reset { reply } => {
                let result = self.reset();
                if reply.send(result).is_err() {
                    debug!("Reset reply channel closed (caller dropped)");
                }
            }
            Command::QueryBoard { reply } => {
                let snapshot = BoardSnapshot {
                    index: self.runner.cursor(),
                    board: self.runner.board().clone(),
                    context: *self.runner.context(),
                };
                if reply.send(snapshot).is_err() {
                    debug!("QueryBoard reply channel closed (caller dropped)");
                }
            }
            Command::QueryResult { index, reply } => {
                let result = self.runner.result_at(index).cloned();
                if reply.send(result).is_err() {
                    debug!("QueryResult reply channel closed (caller dropped)");
                }
            }
            Command::QuerySummary { reply } => {
                if reply.send(self.runner.summary()).is_err() {
                    debug!("QuerySummary reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Executes one step and publishes its result on the Step topic.
    ///
    /// Every step the worker runs goes through here, so each one is published
    /// exactly once.
    fn execute_step(&mut self) -> Result<StepResult> {
        let result = self.runner.step(self.oracles.as_sim_env())?;

        let event = if result.success {
            StepEvent::Committed {
                result: Box::new(result.clone()),
            }
        } else {
            StepEvent::Failed {
                result: Box::new(result.clone()),
            }
        };
        self.event_bus.publish(Event::Step(event));

        Ok(result)
    }

    /// Runs from the cursor to the end of the timeline.
    ///
    /// Same loop as [`TimelineRunner::run_while`], with a pause and the cancel
    /// flag at each step boundary. A step that has started always runs to
    /// commit or abort.
    async fn run_to_end(&mut self) -> Result<RunReport> {
        let from_step = self.runner.cursor();
        self.event_bus.publish(Event::Run(RunEvent::Started {
            from_step,
            total_steps: self.runner.timeline().len(),
        }));

        let mut progress = RunProgress::default();
        let status = loop {
            let paced = self.runner.cursor() > from_step && !self.step_delay.is_zero();
            if paced && !self.runner.is_finished() {
                tokio::time::sleep(self.step_delay).await;
            }
            let control = &self.control;
            if let Some(status) = self
                .runner
                .stop_before_next(|_| !control.cancel_requested())
            {
                break status;
            }

            let result = self.execute_step()?;
            if let Some(status) = progress.record(result) {
                break status;
            }
        };

        let report = progress.finish(status, &self.runner);
        let event = match &report.status {
            RunStatus::Completed => {
                info!(
                    steps = report.summary.steps_executed,
                    damage = report.summary.total_damage,
                    "timeline run completed"
                );
                RunEvent::Completed {
                    summary: Box::new(report.summary.clone()),
                }
            }
            RunStatus::Halted(failure) => {
                warn!("timeline run halted: {}", failure);
                RunEvent::Halted {
                    failure: Box::new(failure.clone()),
                }
            }
            RunStatus::Cancelled { at_step } => {
                info!(at_step, "timeline run cancelled");
                RunEvent::Cancelled { at_step: *at_step }
            }
        };
        self.event_bus.publish(Event::Run(event));

        Ok(report)
    }

    fn rewind_to(&mut self, index: usize) -> Result<()> {
        self.runner.rewind_to(index)?;
        self.event_bus
            .publish(Event::Navigation(NavigationEvent::Rewound { to: index }));
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.runner.reset()?;
        self.event_bus
            .publish(Event::Navigation(NavigationEvent::Reset));
        Ok(())
    }
}
