//! Timeline execution.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use combat_content::ContentFactory;
use combat_core::RunStatus;
use runtime::{OracleManager, Runtime, RuntimeConfig, Topic};

use super::{DEFAULT_DATA_DIR, data_dir_exists};
use crate::render;

/// Run a timeline against a board and print the results
#[derive(Parser)]
pub struct Run {
    /// Content directory (config.toml, spells/, builds/, boards/, timelines/)
    #[arg(short, long, value_name = "DIR", env = "COMBAT_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Timeline file name under `timelines/`
    #[arg(short, long, value_name = "NAME", default_value = "dial-opener")]
    timeline: String,

    /// Build file name under `builds/`
    #[arg(short, long, value_name = "NAME", default_value = "xelor")]
    build: String,

    /// Board file name under `boards/`
    #[arg(long, value_name = "NAME", default_value = "default")]
    board: String,

    /// Catalog file name under `spells/`
    #[arg(long, value_name = "NAME", default_value = "xelor")]
    spells: String,

    /// Execute at most this many steps instead of the whole timeline
    #[arg(short = 'n', long, value_name = "STEPS")]
    steps: Option<usize>,

    /// Pause between steps, overriding COMBAT_STEP_DELAY_MS
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Per-step lines and the end-of-run summary
    Summary,
    /// Full run report as JSON
    Json,
}

impl Run {
    pub async fn execute(self) -> Result<()> {
        data_dir_exists(&self.data_dir)?;
        let factory = ContentFactory::new(&self.data_dir);

        let sim = factory.load_config()?;
        let catalog = factory.load_spells(&self.spells)?;
        let build = factory.load_build(&self.build)?;
        let board = factory.load_board(&self.board, &sim)?;
        let timeline = factory.load_timeline(&self.timeline)?;
        if timeline.build_id != build.id {
            tracing::warn!(
                "timeline {:?} was written for build {:?}, running with {:?}",
                timeline.id,
                timeline.build_id,
                build.id
            );
        }

        let mut config = RuntimeConfig::from_env().with_sim(sim);
        if let Some(ms) = self.delay_ms {
            config.step_delay = Duration::from_millis(ms);
        }

        let runtime = Runtime::builder()
            .config(config)
            .oracles(OracleManager::from_catalog(catalog))
            .character(build.clone())
            .timeline(timeline.clone())
            .board(board)
            .build()
            .await?;
        let handle = runtime.handle();

        let report = match self.steps {
            Some(limit) => {
                let mut results = Vec::new();
                for _ in 0..limit.min(timeline.len()) {
                    let result = handle.step().await?;
                    let failed = !result.success;
                    results.push(result);
                    if failed {
                        break;
                    }
                }
                let status = match results.last().and_then(|r| r.failure.clone()) {
                    Some(failure) => RunStatus::Halted(failure),
                    None => RunStatus::Completed,
                };
                combat_core::RunReport {
                    status,
                    results,
                    summary: handle.summary().await?,
                }
            }
            None => {
                let mut steps = handle.subscribe(Topic::Step);
                let printer = matches!(self.format, OutputFormat::Summary).then(|| {
                    tokio::spawn(async move {
                        while let Ok(runtime::Event::Step(event)) = steps.recv().await {
                            render::print_step(event.result());
                        }
                    })
                });

                let report = handle.run_report().await?;
                drop(handle);
                runtime.shutdown().await?;
                if let Some(printer) = printer {
                    printer.await.context("step printer task failed")?;
                }
                report
            }
        };

        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&report)
                    .context("Failed to serialize run report to JSON")?;
                println!("{}", json);
            }
            OutputFormat::Summary => {
                if self.steps.is_some() {
                    report.results.iter().for_each(render::print_step);
                }
                render::print_report(&build, &timeline, &report);
            }
        }

        if let RunStatus::Halted(failure) = report.status {
            anyhow::bail!("{}", failure);
        }
        Ok(())
    }
}
