//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive a timeline.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use combat_core::{
    BoardState, Build, HookRegistry, SimConfig, SimObserver, Timeline, TimelineRunner,
};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::observer::{BusObserver, FanoutObserver, TracingObserver};
use crate::oracle::OracleManager;
use crate::workers::{Command, RunControl, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub sim: SimConfig,
    /// Pause between steps of a full run. Presentation only; zero disables it.
    pub step_delay: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl RuntimeConfig {
    /// Construct runtime configuration from environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_STEP_DELAY_MS` - Pause between steps of a full run (default: 0)
    /// - `COMBAT_EVENT_BUFFER` - Per-topic event buffer (default: 100)
    /// - `COMBAT_COMMAND_BUFFER` - Worker command queue depth (default: 32)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("COMBAT_STEP_DELAY_MS") {
            config.step_delay = Duration::from_millis(ms);
        }
        if let Some(size) = read_env::<usize>("COMBAT_EVENT_BUFFER") {
            config.event_buffer_size = size.max(1);
        }
        if let Some(size) = read_env::<usize>("COMBAT_COMMAND_BUFFER") {
            config.command_buffer_size = size.max(1);
        }

        config
    }

    pub fn with_sim(mut self, sim: SimConfig) -> Self {
        self.sim = sim;
        self
    }

    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            step_delay: Duration::ZERO,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

/// Main runtime that orchestrates a timeline simulation
///
/// Runtime owns the worker task; [`RuntimeHandle`] provides a cloneable
/// façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every outstanding handle clone is dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    build: Option<Build>,
    timeline: Option<Timeline>,
    board: Option<BoardState>,
    hooks: Option<HookRegistry>,
    observer: Option<Arc<dyn SimObserver>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            build: None,
            timeline: None,
            board: None,
            hooks: None,
            observer: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set the character build whose pools seed the resource ledger
    pub fn character(mut self, build: Build) -> Self {
        self.build = Some(build);
        self
    }

    pub fn timeline(mut self, timeline: Timeline) -> Self {
        self.timeline = Some(timeline);
        self
    }

    /// Set the starting board
    pub fn board(mut self, board: BoardState) -> Self {
        self.board = Some(board);
        self
    }

    /// Set end-of-step hooks.
    ///
    /// If not provided, [`HookRegistry::standard`] is used.
    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Add an observer that receives every simulation event alongside the
    /// tracing and bus observers.
    pub fn observer(mut self, observer: Arc<dyn SimObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingContent("oracles"))?;
        let build = self.build.ok_or(RuntimeError::MissingContent("a build"))?;
        let timeline = self.timeline.ok_or(RuntimeError::MissingContent("a timeline"))?;
        let board = self.board.ok_or(RuntimeError::MissingContent("a board"))?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let control = Arc::new(RunControl::default());

        let handle = RuntimeHandle::new(command_tx, event_bus.clone(), Arc::clone(&control));

        let mut observer = FanoutObserver::new()
            .with(Arc::new(TracingObserver))
            .with(Arc::new(BusObserver::new(event_bus.clone())));
        if let Some(extra) = self.observer {
            observer.push(extra);
        }

        let runner = TimelineRunner::new(build, timeline, board, self.config.sim)
            .with_hooks(self.hooks.unwrap_or_else(HookRegistry::standard))
            .with_observer(Arc::new(observer));

        let sim_worker = SimulationWorker::new(
            runner,
            oracles,
            command_rx,
            event_bus,
            control,
            self.config.step_delay,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            sim_worker_handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_values() {
        let config = RuntimeConfig::default();
        assert_eq!(config.step_delay, Duration::ZERO);
        assert_eq!(config.event_buffer_size, 100);
        assert_eq!(config.command_buffer_size, 32);
        assert_eq!(config.sim, SimConfig::default());
    }

    #[tokio::test]
    async fn build_requires_oracles() {
        let result = Runtime::builder().build().await;
        assert!(matches!(
            result,
            Err(RuntimeError::MissingContent("oracles"))
        ));
    }
}
