mod in_memory_reporter;
mod summary_report;

use crosswind_core::prelude::Sample;
use crosswind_summary_model::{RunSummary, SystemOutcome};
use parking_lot::Mutex;

pub use in_memory_reporter::InMemoryReporter;
pub use summary_report::SummaryReportCollector;

/// Something that happened while a run was measuring.
///
/// Events arrive in order: `RunStarted`, then for each scenario a `ScenarioStarted` followed by one
/// `TargetSkipped` or one `TargetStarted`, its `RequestCompleted` events and a `TargetCompleted`
/// per active system.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    RunStarted {
        systems: Vec<String>,
        scenario_count: usize,
        iterations: usize,
    },
    ScenarioStarted {
        scenario: String,
    },
    TargetSkipped {
        scenario: String,
        system: String,
    },
    TargetStarted {
        scenario: String,
        system: String,
        url: String,
        iterations: usize,
    },
    RequestCompleted {
        scenario: String,
        system: String,
        sample: Sample,
    },
    TargetCompleted {
        scenario: String,
        system: String,
        outcome: SystemOutcome,
    },
}

pub trait ReportCollector: Send {
    fn add_event(&mut self, event: &ReportEvent);

    /// Called once, after measurement has finished and the results have been stored.
    fn finalize(&self, summary: &RunSummary);
}

/// Fans events out to every configured collector.
///
/// Collectors are the only place where run output is presented, the measuring code itself never
/// prints anything.
pub struct Reporter {
    collectors: Mutex<Vec<Box<dyn ReportCollector>>>,
}

impl Reporter {
    pub fn add_event(&self, event: ReportEvent) {
        for collector in self.collectors.lock().iter_mut() {
            collector.add_event(&event);
        }
    }

    pub fn finalize(&self, summary: &RunSummary) {
        for collector in self.collectors.lock().iter() {
            collector.finalize(summary);
        }
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("collectors", &self.collectors.lock().len())
            .finish()
    }
}

#[derive(Default)]
pub struct ReportConfig {
    enable_summary: bool,
    collectors: Vec<Box<dyn ReportCollector>>,
}

impl ReportConfig {
    /// Print the final conclusion table when the run finishes.
    pub fn enable_summary(mut self) -> Self {
        self.enable_summary = true;
        self
    }

    pub fn with_collector(mut self, collector: impl ReportCollector + 'static) -> Self {
        self.collectors.push(Box::new(collector));
        self
    }

    pub fn init(self) -> Reporter {
        let mut collectors = self.collectors;
        if self.enable_summary {
            collectors.push(Box::new(SummaryReportCollector::new()));
        }

        Reporter {
            collectors: Mutex::new(collectors),
        }
    }
}
