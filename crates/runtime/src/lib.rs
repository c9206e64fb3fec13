//! Runtime orchestration for the combat timeline simulation.
//!
//! This crate wires the deterministic `combat-core` runner, the content
//! oracles, and a worker task into a cohesive async API. Consumers embed
//! [`Runtime`] to step or run a timeline, navigate its history, and subscribe
//! to events through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`observer`] bridges core diagnostics to `tracing` and the bus
//! - [`oracle`] bundles the spell catalog and damage calculator
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod observer;
pub mod oracle;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, NavigationEvent, RunEvent, StepEvent, Topic};
pub use observer::{BusObserver, FanoutObserver, TracingObserver};
pub use oracle::OracleManager;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
