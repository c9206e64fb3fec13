use crate::error::{ErrorSeverity, SimError};

/// Errors raised while moving the timeline cursor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavigationError {
    #[error("no snapshot at index {index} (history holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("timeline finished: all {len} steps already executed")]
    TimelineFinished { len: usize },
}

impl SimError for NavigationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "NAVIGATION_INDEX_OUT_OF_RANGE",
            Self::TimelineFinished { .. } => "NAVIGATION_TIMELINE_FINISHED",
        }
    }
}
