//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! stepping, running and navigating the timeline, or streaming events from
//! specific topics.
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};

use combat_core::{BoardSnapshot, RunReport, RunStatus, RunSummary, StepResult};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, RunControl};

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    control: Arc<RunControl>,
}

/// Gives a claimed run slot back unless the run command reached the worker.
struct PendingClaim<'a>(Option<&'a RunControl>);

impl PendingClaim<'_> {
    fn handed_off(mut self) {
        self.0 = None;
    }
}

impl Drop for PendingClaim<'_> {
    fn drop(&mut self) {
        if let Some(control) = self.0.take() {
            control.release();
        }
    }
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        control: Arc<RunControl>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            control,
        }
    }

    /// Runs every remaining step of the timeline.
    ///
    /// Only one run may be in flight per runtime; a second call fails with
    /// [`RuntimeError::RunInProgress`]. A halted run surfaces as
    /// [`RuntimeError::StepFailed`] and a cancelled one as
    /// [`RuntimeError::Cancelled`]; in both cases the board stays at the last
    /// committed step and can be resumed.
    pub async fn run_timeline(&self) -> Result<RunReport> {
        let report = self.run_report().await?;
        match &report.status {
            RunStatus::Completed => Ok(report),
            RunStatus::Halted(failure) => Err(RuntimeError::StepFailed(Box::new(failure.clone()))),
            RunStatus::Cancelled { at_step } => Err(RuntimeError::Cancelled { at_step: *at_step }),
        }
    }

    /// Like [`run_timeline`](Self::run_timeline), but returns the report for
    /// halted and cancelled runs instead of an error.
    ///
    /// Dropping the returned future does not stop the run: it keeps going in
    /// the worker until it ends or [`cancel`](Self::cancel) is called.
    pub async fn run_report(&self) -> Result<RunReport> {
        if !self.control.try_claim() {
            return Err(RuntimeError::RunInProgress);
        }
        let claim = PendingClaim(Some(&self.control));

        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::RunToEnd { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        claim.handed_off();

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Asks the in-flight run to stop at the next step boundary.
    ///
    /// A request made while idle is cleared when the next run starts.
    pub fn cancel(&self) {
        self.control.request_cancel();
    }

    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }

    /// Execute the step at the cursor.
    ///
    /// A failed step is reported through the returned result with
    /// `success == false`; the cursor does not move.
    pub async fn step(&self) -> Result<StepResult> {
        self.ensure_idle()?;
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Step { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Restore the board and context as they were after `index` steps.
    pub async fn rewind_to(&self, index: usize) -> Result<()> {
        self.ensure_idle()?;
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::RewindTo {
                index,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Back to the initial state with empty history and cache.
    pub async fn reset(&self) -> Result<()> {
        self.ensure_idle()?;
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Reset { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the live board (read-only snapshot). `index` is the cursor.
    pub async fn query_board(&self) -> Result<BoardSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryBoard { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Cached result of step `index`, if it has been executed and not rewound.
    pub async fn result_at(&self, index: usize) -> Result<Option<StepResult>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryResult {
                index,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    pub async fn summary(&self) -> Result<RunSummary> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QuerySummary { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Step` - Committed and failed step results
    /// - `Topic::Run` - Run started, completed, halted, cancelled
    /// - `Topic::Navigation` - Rewind and reset
    /// - `Topic::Simulation` - Fine-grained core diagnostics
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut steps = handle.subscribe(Topic::Step);
    /// while let Ok(event) = steps.recv().await {
    ///     // Render the step result
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.is_running() {
            return Err(RuntimeError::RunInProgress);
        }
        Ok(())
    }
}
