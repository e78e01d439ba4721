use crosswind_core::prelude::{Sample, SampleError};
use crosswind_instruments::prelude::{reduce, ReportEvent, Sampler};
use crosswind_summary_model::{ScenarioResult, SystemOutcome};
use indexmap::IndexMap;
use itertools::Itertools;

use crate::context::RunnerContext;
use crate::definition::Scenario;

/// Failure label used when a target produced neither latencies nor errors, which happens when
/// the iteration count is zero.
pub const UNKNOWN_ERROR: &str = "Unknown Error";

/// The fastest system must have a mean below this fraction of the runner-up's mean to win.
pub const WINNER_MARGIN: f64 = 0.9;

/// Measure every active system against one scenario.
///
/// Systems are measured one after another, and each system's requests are made one after another.
/// Once every system has an outcome the scenario winner, if any, is marked.
pub async fn run_scenario<S: Sampler>(
    ctx: &RunnerContext<S>,
    scenario: &Scenario,
    active_systems: &IndexMap<String, String>,
) -> ScenarioResult {
    let mut result = ScenarioResult::with_capacity(active_systems.len());

    for (system, base_url) in active_systems {
        let Some(endpoint) = scenario.endpoint(system) else {
            log::debug!("Skipping [{system}] for scenario [{}], no endpoint", scenario.name);
            ctx.reporter().add_event(ReportEvent::TargetSkipped {
                scenario: scenario.name.clone(),
                system: system.clone(),
            });
            result.insert(system.clone(), SystemOutcome::Skipped);
            continue;
        };

        let url = format!("{base_url}{endpoint}");
        let outcome = measure_target(ctx, &scenario.name, system, &url).await;
        log::debug!("Scenario [{}], system [{system}]: {outcome:?}", scenario.name);

        ctx.reporter().add_event(ReportEvent::TargetCompleted {
            scenario: scenario.name.clone(),
            system: system.clone(),
            outcome: outcome.clone(),
        });
        result.insert(system.clone(), outcome);
    }

    if let Some(winner) = mark_winner(&mut result) {
        log::info!("Scenario [{}] winner: {winner}", scenario.name);
    }

    result
}

async fn measure_target<S: Sampler>(
    ctx: &RunnerContext<S>,
    scenario: &str,
    system: &str,
    url: &str,
) -> SystemOutcome {
    let iterations = ctx.config().iterations;
    ctx.reporter().add_event(ReportEvent::TargetStarted {
        scenario: scenario.to_string(),
        system: system.to_string(),
        url: url.to_string(),
        iterations,
    });

    let mut latencies = Vec::with_capacity(iterations);
    let mut errors = Vec::new();
    for _ in 0..iterations {
        let sample = ctx.sampler().sample(url).await;
        match &sample {
            Sample::Latency(elapsed) => latencies.push(elapsed.as_secs_f64()),
            Sample::Failed(e) => errors.push(e.clone()),
        }

        ctx.reporter().add_event(ReportEvent::RequestCompleted {
            scenario: scenario.to_string(),
            system: system.to_string(),
            sample,
        });
    }

    match reduce(&latencies, ctx.config().remove_outliers) {
        Some(stats) => SystemOutcome::Measured(stats),
        None => SystemOutcome::Failed {
            error: most_frequent_error(&errors),
        },
    }
}

/// The most common failure label. Ties go to the label that was seen first.
pub fn most_frequent_error(errors: &[SampleError]) -> String {
    let mut counts = IndexMap::<String, usize>::new();
    for error in errors {
        *counts.entry(error.to_string()).or_default() += 1;
    }

    counts
        .into_iter()
        // `max_by_key` would keep the last of equal counts.
        .rev()
        .max_by_key(|(_, count)| *count)
        .map(|(label, _)| label)
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

/// Flag the scenario winner, returning its name.
///
/// At least two systems need statistics, and the fastest mean must be below [WINNER_MARGIN] times
/// the second fastest.
pub fn mark_winner(result: &mut ScenarioResult) -> Option<String> {
    let ranked = result
        .iter()
        .filter_map(|(system, outcome)| outcome.stats().map(|stats| (system.clone(), stats.mean)))
        .sorted_by(|(_, a), (_, b)| a.total_cmp(b))
        .collect::<Vec<_>>();

    let [(best, best_mean), (_, second_mean), ..] = ranked.as_slice() else {
        return None;
    };
    if *best_mean >= WINNER_MARGIN * *second_mean {
        return None;
    }

    let stats = result.get_mut(best)?.stats_mut()?;
    stats.is_winner = true;
    Some(best.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosswind_summary_model::StatSummary;

    fn measured(mean: f64) -> SystemOutcome {
        SystemOutcome::Measured(StatSummary {
            count: 1,
            outliers_removed: 0,
            min: mean,
            max: mean,
            mean,
            median: mean,
            p95: mean,
            p99: mean,
            std_dev: 0.0,
            is_winner: false,
        })
    }

    fn scenario_result(outcomes: Vec<(&str, SystemOutcome)>) -> ScenarioResult {
        outcomes
            .into_iter()
            .map(|(name, outcome)| (name.to_string(), outcome))
            .collect()
    }

    fn winners(result: &ScenarioResult) -> Vec<&str> {
        result
            .iter()
            .filter(|(_, outcome)| outcome.stats().is_some_and(|stats| stats.is_winner))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    #[test]
    fn test_close_means_have_no_winner() {
        let mut result = scenario_result(vec![("a", measured(1.0)), ("b", measured(0.95))]);
        assert_eq!(mark_winner(&mut result), None);
        assert!(winners(&result).is_empty());
    }

    #[test]
    fn test_clear_margin_marks_fastest() {
        let mut result = scenario_result(vec![("a", measured(1.0)), ("b", measured(0.89))]);
        assert_eq!(mark_winner(&mut result), Some("b".to_string()));
        assert_eq!(winners(&result), vec!["b"]);
    }

    #[test]
    fn test_exact_margin_is_not_enough() {
        let mut result = scenario_result(vec![("a", measured(0.9)), ("b", measured(1.0))]);
        assert_eq!(mark_winner(&mut result), None);
    }

    #[test]
    fn test_only_runner_up_matters() {
        let mut result = scenario_result(vec![
            ("a", measured(0.5)),
            ("b", measured(0.52)),
            ("c", measured(5.0)),
        ]);
        assert_eq!(mark_winner(&mut result), None);
    }

    #[test]
    fn test_single_measured_system_never_wins() {
        let mut result = scenario_result(vec![
            ("a", measured(0.1)),
            ("b", SystemOutcome::Skipped),
            (
                "c",
                SystemOutcome::Failed {
                    error: "Timeout".to_string(),
                },
            ),
        ]);
        assert_eq!(mark_winner(&mut result), None);
        assert!(winners(&result).is_empty());
    }

    #[test]
    fn test_most_frequent_error() {
        let errors = vec![
            SampleError::Timeout,
            SampleError::HttpStatus(500),
            SampleError::HttpStatus(500),
        ];
        assert_eq!(most_frequent_error(&errors), "HTTP 500");
    }

    #[test]
    fn test_most_frequent_error_tie_goes_to_first_seen() {
        let errors = vec![
            SampleError::HttpStatus(502),
            SampleError::Timeout,
            SampleError::Timeout,
            SampleError::HttpStatus(502),
        ];
        assert_eq!(most_frequent_error(&errors), "HTTP 502");
    }

    #[test]
    fn test_no_errors_is_unknown() {
        assert_eq!(most_frequent_error(&[]), UNKNOWN_ERROR);
    }
}
