use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Failed to read benchmark definition {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed benchmark definition: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Scenario [{0}] is declared more than once")]
    DuplicateScenario(String),
}

/// How each target is measured. Fixed for the duration of a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkConfig {
    /// Number of sequential requests made to each endpoint
    #[serde(alias = "iteration_count")]
    pub iterations: usize,
    /// Per-request timeout
    #[serde(rename = "timeout_seconds", deserialize_with = "duration_from_secs")]
    pub timeout: Duration,
    /// Drop IQR outliers before computing statistics
    #[serde(default = "default_remove_outliers")]
    pub remove_outliers: bool,
}

fn default_remove_outliers() -> bool {
    true
}

fn duration_from_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs)
        .map_err(|e| serde::de::Error::custom(format!("invalid timeout_seconds {secs}: {e}")))
}

/// A logical test case, mapped to one endpoint path per system.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// System name to endpoint path. Systems without an entry are skipped for this scenario.
    #[serde(default)]
    pub endpoints: IndexMap<String, String>,
}

impl Scenario {
    /// The endpoint path for a system. An empty path counts as no endpoint.
    pub fn endpoint(&self, system: &str) -> Option<&str> {
        self.endpoints
            .get(system)
            .map(String::as_str)
            .filter(|endpoint| !endpoint.is_empty())
    }
}

/// Everything needed to run a benchmark: how to measure, what to measure and where.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkDefinition {
    pub config: BenchmarkConfig,
    /// System name to base URL, in declaration order
    pub systems: IndexMap<String, String>,
    /// Scenarios, run in declaration order
    pub scenarios: Vec<Scenario>,
}

impl BenchmarkDefinition {
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let definition: Self = serde_json::from_str(json)?;
        definition.validate()?;
        Ok(definition)
    }

    /// The systems to measure. With a target, only the system with exactly that name is active,
    /// and an unknown target leaves nothing active.
    pub fn active_systems(&self, target_system: Option<&str>) -> IndexMap<String, String> {
        self.systems
            .iter()
            .filter(|(name, _)| target_system.map_or(true, |target| target == name.as_str()))
            .map(|(name, url)| (name.clone(), url.clone()))
            .collect()
    }

    fn validate(&self) -> Result<(), DefinitionError> {
        let mut seen = HashSet::new();
        for scenario in &self.scenarios {
            if !seen.insert(scenario.name.as_str()) {
                return Err(DefinitionError::DuplicateScenario(scenario.name.clone()));
            }

            for system in scenario.endpoints.keys() {
                if !self.systems.contains_key(system) {
                    log::warn!(
                        "Scenario [{}] has an endpoint for unknown system [{}], it will be ignored",
                        scenario.name,
                        system
                    );
                }
            }
        }

        Ok(())
    }
}

/// Load a benchmark definition from a JSON file.
pub fn load_definition(path: &Path) -> Result<BenchmarkDefinition, DefinitionError> {
    let content = std::fs::read_to_string(path).map_err(|source| DefinitionError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    BenchmarkDefinition::from_json(&content)
}
