use crosswind_instruments::prelude::{ReportCollector, ReportEvent};
use crosswind_summary_model::{RunSummary, SystemOutcome};
use indicatif::{ProgressBar, ProgressStyle};

/// Shows a progress bar while a target is being measured and prints one line per target outcome.
#[derive(Debug, Default)]
pub struct ProgressCollector {
    bar: Option<ProgressBar>,
}

impl ProgressCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn println(&self, line: String) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => println!("{line}"),
        }
    }

    fn new_bar(system: &str, iterations: usize) -> ProgressBar {
        let bar = ProgressBar::new(iterations as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.green} {msg:<12} [{wide_bar:.cyan/blue}] {percent:>3}% [{elapsed_precise}]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
        bar.set_style(style);
        bar.set_message(system.to_string());
        bar
    }
}

impl ReportCollector for ProgressCollector {
    fn add_event(&mut self, event: &ReportEvent) {
        match event {
            ReportEvent::RunStarted { iterations, .. } => {
                self.println(format!("Starting Benchmark ({iterations} iter/req)"));
            }
            ReportEvent::ScenarioStarted { scenario } => {
                self.println(format!("\nScenario: {scenario}"));
            }
            ReportEvent::TargetSkipped { system, .. } => {
                self.println(format!("  -  {system}: SKIPPED (No endpoint)"));
            }
            ReportEvent::TargetStarted {
                system, iterations, ..
            } => {
                if let Some(previous) = self.bar.take() {
                    previous.finish_and_clear();
                }
                self.bar = Some(Self::new_bar(system, *iterations));
            }
            ReportEvent::RequestCompleted { .. } => {
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                }
            }
            ReportEvent::TargetCompleted {
                system, outcome, ..
            } => {
                if let Some(bar) = self.bar.take() {
                    bar.finish_and_clear();
                }

                let line = match outcome {
                    SystemOutcome::Measured(stats) => format!(
                        "  OK {system:<10} Avg: {:.4}s | P99: {:.4}s | Min: {:.4}s",
                        stats.mean, stats.p99, stats.min
                    ),
                    SystemOutcome::Failed { error } => {
                        format!("  !! {system:<10} FAILED: {error}")
                    }
                    SystemOutcome::Skipped => format!("  -  {system}: SKIPPED"),
                };
                self.println(line);
            }
        }
    }

    fn finalize(&self, _summary: &RunSummary) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
