use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The literal stored for a system that has no endpoint in a scenario.
pub const SKIPPED_MARKER: &str = "SKIPPED";

/// Full results of a run, keyed by scenario name in the order the scenarios were declared.
pub type BenchmarkResults = IndexMap<String, ScenarioResult>;

/// Outcome of one scenario, keyed by system name in the order the systems were declared.
pub type ScenarioResult = IndexMap<String, SystemOutcome>;

/// Latency statistics for one (scenario, system) pair. All values are in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatSummary {
    /// Number of samples left after outlier removal
    pub count: usize,
    /// Number of successful samples discarded as outliers
    pub outliers_removed: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub p95: f64,
    pub p99: f64,
    /// Population standard deviation of the retained samples
    pub std_dev: f64,
    /// Set when this system beat every other measured system in the scenario by a clear margin.
    ///
    /// Only ever set by the scenario runner, after all systems in the scenario have been measured.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_winner: bool,
}

/// What happened to one system in one scenario.
///
/// Serialized as one of three shapes: the string `"SKIPPED"`, an object `{"error": "<label>"}`,
/// or a full [StatSummary] object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "OutcomeRepr", try_from = "OutcomeRepr")]
pub enum SystemOutcome {
    /// The scenario has no endpoint for this system.
    Skipped,
    /// No usable latency data was collected. Holds the most common failure label.
    Failed { error: String },
    Measured(StatSummary),
}

impl SystemOutcome {
    pub fn stats(&self) -> Option<&StatSummary> {
        match self {
            SystemOutcome::Measured(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn stats_mut(&mut self) -> Option<&mut StatSummary> {
        match self {
            SystemOutcome::Measured(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, SystemOutcome::Skipped)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum OutcomeRepr {
    Marker(String),
    Failed { error: String },
    Measured(StatSummary),
}

impl From<SystemOutcome> for OutcomeRepr {
    fn from(outcome: SystemOutcome) -> Self {
        match outcome {
            SystemOutcome::Skipped => OutcomeRepr::Marker(SKIPPED_MARKER.to_string()),
            SystemOutcome::Failed { error } => OutcomeRepr::Failed { error },
            SystemOutcome::Measured(stats) => OutcomeRepr::Measured(stats),
        }
    }
}

impl TryFrom<OutcomeRepr> for SystemOutcome {
    type Error = String;

    fn try_from(repr: OutcomeRepr) -> Result<Self, Self::Error> {
        match repr {
            OutcomeRepr::Marker(marker) if marker == SKIPPED_MARKER => Ok(SystemOutcome::Skipped),
            OutcomeRepr::Marker(other) => Err(format!("Unknown outcome marker: {other}")),
            OutcomeRepr::Failed { error } => Ok(SystemOutcome::Failed { error }),
            OutcomeRepr::Measured(stats) => Ok(SystemOutcome::Measured(stats)),
        }
    }
}
