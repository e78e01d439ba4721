use crate::report::{ReportCollector, ReportEvent};
use crosswind_summary_model::RunSummary;
use parking_lot::Mutex;
use std::sync::Arc;

/// Keeps every event in memory. Clones share the same storage, so keep a clone around to inspect
/// what was reported after handing the collector to a [crate::report::Reporter].
#[derive(Debug, Clone, Default)]
pub struct InMemoryReporter {
    events: Arc<Mutex<Vec<ReportEvent>>>,
    final_summary: Arc<Mutex<Option<RunSummary>>>,
}

impl InMemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.lock().clone()
    }

    pub fn is_finalized(&self) -> bool {
        self.final_summary.lock().is_some()
    }

    /// The summary passed to [ReportCollector::finalize], if the run has finished.
    pub fn final_summary(&self) -> Option<RunSummary> {
        self.final_summary.lock().clone()
    }

    /// Number of request outcomes reported for one target.
    pub fn requests_for(&self, scenario: &str, system: &str) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| {
                matches!(
                    event,
                    ReportEvent::RequestCompleted { scenario: s, system: sys, .. }
                        if s == scenario && sys == system
                )
            })
            .count()
    }
}

impl ReportCollector for InMemoryReporter {
    fn add_event(&mut self, event: &ReportEvent) {
        self.events.lock().push(event.clone());
    }

    fn finalize(&self, summary: &RunSummary) {
        *self.final_summary.lock() = Some(summary.clone());
    }
}
