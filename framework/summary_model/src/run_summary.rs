use indexmap::IndexMap;
use serde::Serialize;

/// A scenario in which a system produced no usable data, and the reason.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FailureRecord {
    pub scenario: String,
    pub error: String,
}

/// Everything one system accumulated over a run.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SystemTally {
    /// Mean latency of each scenario the system completed, in scenario order
    pub means: Vec<f64>,
    /// Scenarios the system failed, in scenario order
    pub failures: Vec<FailureRecord>,
}

impl SystemTally {
    /// Number of scenarios this system actually ran, successfully or not.
    pub fn scenarios_run(&self) -> usize {
        self.means.len() + self.failures.len()
    }

    /// Unweighted mean of the per-scenario means, if any scenario succeeded.
    pub fn global_average(&self) -> Option<f64> {
        if self.means.is_empty() {
            None
        } else {
            Some(self.means.iter().sum::<f64>() / self.means.len() as f64)
        }
    }
}

/// Cross-scenario bookkeeping for the final summary of a run.
///
/// This is built up while the run progresses and is only used to report on the run, it is never
/// written to the results file.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RunSummary {
    systems: IndexMap<String, SystemTally>,
}

impl RunSummary {
    /// Create an empty summary with one tally per active system, in the given order.
    pub fn new<I, S>(system_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            systems: system_names
                .into_iter()
                .map(|name| (name.into(), SystemTally::default()))
                .collect(),
        }
    }

    pub fn record_success(&mut self, system: &str, mean: f64) {
        self.tally_mut(system).means.push(mean);
    }

    pub fn record_failure(&mut self, system: &str, scenario: &str, error: &str) {
        self.tally_mut(system).failures.push(FailureRecord {
            scenario: scenario.to_string(),
            error: error.to_string(),
        });
    }

    pub fn tally(&self, system: &str) -> Option<&SystemTally> {
        self.systems.get(system)
    }

    pub fn systems(&self) -> impl Iterator<Item = (&String, &SystemTally)> {
        self.systems.iter()
    }

    pub fn has_failures(&self) -> bool {
        self.systems.values().any(|tally| !tally.failures.is_empty())
    }

    /// Reduce the tallies to the per-system conclusions and the overall fastest system.
    pub fn conclusions(&self) -> RunConclusions {
        let mut fastest: Option<(&str, f64)> = None;

        let systems = self
            .systems
            .iter()
            .map(|(name, tally)| {
                let global_average = tally.global_average();
                if let Some(average) = global_average {
                    // Strictly less, so the earlier declared system keeps a tie.
                    if fastest.map_or(true, |(_, best)| average < best) {
                        fastest = Some((name.as_str(), average));
                    }
                }

                let status = if tally.scenarios_run() == 0 {
                    SystemStatus::Skipped
                } else if tally.failures.is_empty() {
                    SystemStatus::Ok
                } else {
                    SystemStatus::Degraded
                };

                SystemConclusion {
                    name: name.clone(),
                    scenarios_run: tally.scenarios_run(),
                    global_average,
                    failed: tally.failures.len(),
                    status,
                }
            })
            .collect();

        RunConclusions {
            systems,
            fastest: fastest.map(|(name, _)| name.to_string()),
            has_failures: self.has_failures(),
        }
    }

    fn tally_mut(&mut self, system: &str) -> &mut SystemTally {
        self.systems.entry(system.to_string()).or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SystemStatus {
    /// Every scenario the system ran produced statistics
    Ok,
    /// At least one scenario failed for the system
    Degraded,
    /// The system had no endpoint in any scenario
    Skipped,
}

impl std::fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemStatus::Ok => write!(f, "Ok"),
            SystemStatus::Degraded => write!(f, "Degraded"),
            SystemStatus::Skipped => write!(f, "Skipped"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemConclusion {
    pub name: String,
    pub scenarios_run: usize,
    /// Global average latency in seconds, absent if no scenario succeeded
    pub global_average: Option<f64>,
    pub failed: usize,
    pub status: SystemStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunConclusions {
    pub systems: Vec<SystemConclusion>,
    /// The system with the lowest global average latency
    pub fastest: Option<String>,
    pub has_failures: bool,
}
