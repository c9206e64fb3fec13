//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, timeline navigation, and halted
//! runs so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use combat_core::{NavigationError, StepFailure};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("a timeline run is already in flight")]
    RunInProgress,

    #[error("run cancelled before step {at_step}")]
    Cancelled { at_step: usize },

    #[error("run halted: {0}")]
    StepFailed(Box<StepFailure>),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires {0} to be configured before building")]
    MissingContent(&'static str),
}

impl RuntimeError {
    /// Index of the step the error refers to, when there is one.
    pub fn step_index(&self) -> Option<usize> {
        match self {
            RuntimeError::Cancelled { at_step } => Some(*at_step),
            RuntimeError::StepFailed(failure) => Some(failure.step_index),
            RuntimeError::Navigation(NavigationError::IndexOutOfRange { index, .. }) => {
                Some(*index)
            }
            _ => None,
        }
    }
}
