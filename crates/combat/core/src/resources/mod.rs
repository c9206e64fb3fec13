//! Resource accounting: the ledger and the regeneration log.
mod ledger;
mod regeneration;

pub use ledger::{InsufficientResource, ResourceKind, ResourceLedger};
pub use regeneration::{
    RegenerationEvent, RegenerationSummary, RegenerationTracker, ResourceTotals, sources,
};
