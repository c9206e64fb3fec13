//! Event payloads carried on each bus topic.

use serde::{Deserialize, Serialize};

use combat_core::{RunSummary, StepFailure, StepResult};

/// Per-step results, one event per executed step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StepEvent {
    /// The step committed; the result carries the post-step context.
    Committed { result: Box<StepResult> },
    /// The step failed and left the board untouched.
    Failed { result: Box<StepResult> },
}

impl StepEvent {
    pub fn result(&self) -> &StepResult {
        match self {
            StepEvent::Committed { result } | StepEvent::Failed { result } => result,
        }
    }
}

/// Lifecycle of a full timeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEvent {
    Started {
        from_step: usize,
        total_steps: usize,
    },
    Completed {
        summary: Box<RunSummary>,
    },
    Halted {
        failure: Box<StepFailure>,
    },
    Cancelled {
        at_step: usize,
    },
}

/// Cursor moves that did not execute a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationEvent {
    Rewound { to: usize },
    Reset,
}
