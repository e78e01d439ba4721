use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use crosswind_core::prelude::StopHandle;
use crosswind_instruments::prelude::{HttpSampler, ReportConfig, ReportEvent, Sampler};
use crosswind_summary_model::{BenchmarkResults, ResultsStore, RunSummary, SystemOutcome};

use crate::context::RunnerContext;
use crate::definition::load_definition;
use crate::monitor::start_monitor;
use crate::progress::ProgressCollector;
use crate::scenario::run_scenario;
use crate::types::CrosswindResult;

/// Environment variable to override where results are written.
pub const OUTPUT_DIR_ENV: &str = "CROSSWIND_OUTPUT_DIR";

/// Default base directory for results.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    /// Names of the systems that were measured, in declaration order
    pub active_systems: Vec<String>,
    /// Per scenario, per system outcomes, in declaration order
    pub results: BenchmarkResults,
    pub summary: RunSummary,
}

/// Measure every scenario against the active systems.
///
/// With a `target_system` only that system is measured. If no system has that name nothing is
/// measured and every scenario ends up with an empty result.
pub async fn run<S: Sampler>(ctx: &RunnerContext<S>, target_system: Option<&str>) -> RunOutput {
    let definition = ctx.definition();
    let active_systems = definition.active_systems(target_system);
    if let Some(target) = target_system.filter(|_| active_systems.is_empty()) {
        log::warn!("No system named [{target}] in the benchmark definition, nothing to measure");
    }

    log::info!(
        "Starting benchmark of {} system(s) over {} scenario(s), {} iteration(s) per request",
        active_systems.len(),
        definition.scenarios.len(),
        definition.config.iterations
    );
    ctx.reporter().add_event(ReportEvent::RunStarted {
        systems: active_systems.keys().cloned().collect(),
        scenario_count: definition.scenarios.len(),
        iterations: definition.config.iterations,
    });

    let mut results = BenchmarkResults::with_capacity(definition.scenarios.len());
    let mut summary = RunSummary::new(active_systems.keys().cloned());

    for scenario in &definition.scenarios {
        log::info!("Running scenario: {}", scenario.name);
        ctx.reporter().add_event(ReportEvent::ScenarioStarted {
            scenario: scenario.name.clone(),
        });

        let scenario_result = run_scenario(ctx, scenario, &active_systems).await;
        for (system, outcome) in &scenario_result {
            match outcome {
                SystemOutcome::Measured(stats) => summary.record_success(system, stats.mean),
                SystemOutcome::Failed { error } => {
                    summary.record_failure(system, &scenario.name, error)
                }
                SystemOutcome::Skipped => {}
            }
        }

        results.insert(scenario.name.clone(), scenario_result);
    }

    RunOutput {
        active_systems: active_systems.keys().cloned().collect(),
        results,
        summary,
    }
}

/// Options for [start], usually taken from the command line.
#[derive(Debug, Clone)]
pub struct StartOptions {
    pub definition_path: PathBuf,
    pub target_system: Option<String>,
    /// Base directory for results. Falls back to [OUTPUT_DIR_ENV], then [DEFAULT_OUTPUT_DIR].
    pub output_dir: Option<PathBuf>,
    pub no_progress: bool,
}

impl StartOptions {
    pub fn new(definition_path: impl Into<PathBuf>) -> Self {
        Self {
            definition_path: definition_path.into(),
            target_system: None,
            output_dir: None,
            no_progress: false,
        }
    }

    fn resolve_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            std::env::var(OUTPUT_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR))
        })
    }
}

/// Load the benchmark definition, measure over HTTP, store the results and report the conclusion.
///
/// Returns the path of the stored results file.
pub async fn start(options: StartOptions) -> CrosswindResult<PathBuf> {
    let definition = load_definition(&options.definition_path)?;
    let run_timestamp = Local::now().naive_local();

    let sampler = HttpSampler::new(definition.config.timeout)?;

    let mut report_config = ReportConfig::default().enable_summary();
    if !options.no_progress {
        report_config = report_config.with_collector(ProgressCollector::new());
    }
    let reporter = Arc::new(report_config.init());

    let ctx = RunnerContext::new(definition, sampler, reporter.clone());

    // The monitor stops when this handle goes out of scope, even if the run fails.
    let stop_handle = StopHandle::new();
    start_monitor(stop_handle.new_listener());

    let output = run(&ctx, options.target_system.as_deref()).await;
    stop_handle.stop();

    let store = ResultsStore::new(options.resolve_output_dir());
    let results_path = store
        .persist(&output.results, &output.active_systems, run_timestamp)
        .context("Failed to store results")?;
    log::info!("Full raw data saved to: {}", results_path.display());

    reporter.finalize(&output.summary);

    Ok(results_path)
}
