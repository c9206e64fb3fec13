//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the timeline runner and executes commands
//! sent through [`crate::RuntimeHandle`].

mod simulation;

pub use simulation::{Command, RunControl, SimulationWorker};
