mod conclusion_table;

use crate::report::summary_report::conclusion_table::{ConclusionRow, FailureRow};
use crate::report::{ReportCollector, ReportEvent};
use crosswind_summary_model::RunSummary;
use tabled::settings::Style;
use tabled::Table;

/// Prints the final conclusion of a run: one row per system, the fastest system and the details of
/// every failed endpoint.
#[derive(Debug, Default)]
pub struct SummaryReportCollector;

impl SummaryReportCollector {
    pub fn new() -> Self {
        Self
    }

    /// Render the conclusion as text, exactly as it is printed.
    pub fn render(summary: &RunSummary) -> String {
        let conclusions = summary.conclusions();

        let rows = conclusions
            .systems
            .iter()
            .map(ConclusionRow::from)
            .collect::<Vec<_>>();
        let mut table = Table::new(rows);
        table.with(Style::modern());

        let mut out = format!("\nFinal Benchmark Conclusion\n{table}\n");

        if let Some(fastest) = &conclusions.fastest {
            out.push_str(&format!("\nFastest System: {}\n", fastest.to_uppercase()));
        }

        if conclusions.has_failures {
            let rows = summary
                .systems()
                .flat_map(|(system, tally)| {
                    tally.failures.iter().map(move |failure| FailureRow {
                        system: system.clone(),
                        scenario: failure.scenario.clone(),
                        error: failure.error.clone(),
                    })
                })
                .collect::<Vec<_>>();
            let mut table = Table::new(rows);
            table.with(Style::modern());

            out.push_str(&format!("\nFailure Details\n{table}\n"));
        }

        out
    }
}

impl ReportCollector for SummaryReportCollector {
    fn add_event(&mut self, _event: &ReportEvent) {
        // no-op, everything needed is in the run summary
    }

    fn finalize(&self, summary: &RunSummary) {
        println!("{}", Self::render(summary));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_systems_and_fastest() {
        let mut summary = RunSummary::new(["fastapi", "django", "express"]);
        summary.record_success("fastapi", 0.0123);
        summary.record_success("django", 0.0456);

        let out = SummaryReportCollector::render(&summary);

        assert!(out.contains("fastapi"));
        assert!(out.contains("0.0123s"));
        assert!(out.contains("0.0456s"));
        assert!(out.contains("Skipped"));
        assert!(out.contains("Fastest System: FASTAPI"));
        assert!(!out.contains("Failure Details"));
    }

    #[test]
    fn test_render_includes_failures() {
        let mut summary = RunSummary::new(["fastapi"]);
        summary.record_failure("fastapi", "list_users", "HTTP 500");

        let out = SummaryReportCollector::render(&summary);

        assert!(out.contains("Failure Details"));
        assert!(out.contains("list_users"));
        assert!(out.contains("HTTP 500"));
        assert!(out.contains("Degraded"));
        assert!(!out.contains("Fastest System"));
    }
}
