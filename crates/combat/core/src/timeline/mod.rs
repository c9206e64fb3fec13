//! Timeline inputs and the orchestration that walks them.
//!
//! [`Build`] and [`Timeline`] are immutable run inputs. [`TimelineRunner`]
//! executes steps through the engine and keeps the navigation state:
//! [`BoardStateHistory`] for rewinding and [`SimulationCache`] for results.
mod cache;
mod error;
mod history;
mod model;
mod runner;
mod summary;

pub use cache::SimulationCache;
pub use error::NavigationError;
pub use history::{BoardSnapshot, BoardStateHistory};
pub use model::{Build, Step, Timeline};
pub use runner::{RunProgress, RunReport, RunStatus, TimelineRunner};
pub use summary::RunSummary;
