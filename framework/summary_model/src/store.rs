use anyhow::Context;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

use crate::results::BenchmarkResults;

/// Name of the canonical results file for a set of systems.
pub const RESULTS_FILE_NAME: &str = "results.json";

/// Format of the timestamp embedded in archived result file names.
pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

const ARCHIVE_DIR_NAME: &str = "archive";

/// Directory key used when a run had no active systems at all.
const EMPTY_SYSTEMS_KEY: &str = "no_systems";

/// Derive the directory key for a set of systems.
///
/// The names are sorted and joined with `_vs_` so that the same set of systems always maps to the
/// same location regardless of the order they were declared in.
pub fn results_key<S: AsRef<str>>(system_names: &[S]) -> String {
    let mut names = system_names.iter().map(AsRef::as_ref).collect::<Vec<_>>();
    if names.is_empty() {
        return EMPTY_SYSTEMS_KEY.to_string();
    }

    names.sort_unstable();
    names.join("_vs_")
}

/// Writes run results to disk, keeping the results of earlier runs in an archive.
///
/// Layout under the base directory:
///
/// ```text
/// <base>/<key>/results.json
/// <base>/<key>/archive/results_archived_<timestamp>.json
/// ```
#[derive(Debug, Clone)]
pub struct ResultsStore {
    base_dir: PathBuf,
}

impl ResultsStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn results_path<S: AsRef<str>>(&self, system_names: &[S]) -> PathBuf {
        self.results_dir(system_names).join(RESULTS_FILE_NAME)
    }

    pub fn archive_dir<S: AsRef<str>>(&self, system_names: &[S]) -> PathBuf {
        self.results_dir(system_names).join(ARCHIVE_DIR_NAME)
    }

    /// Persist the results of a run and return the path of the canonical results file.
    ///
    /// An existing results file is moved into the archive first, named after `run_timestamp`.
    /// Failing to archive is only logged: the new results are written regardless.
    pub fn persist<S: AsRef<str>>(
        &self,
        results: &BenchmarkResults,
        system_names: &[S],
        run_timestamp: NaiveDateTime,
    ) -> anyhow::Result<PathBuf> {
        let results_dir = self.results_dir(system_names);
        std::fs::create_dir_all(&results_dir).with_context(|| {
            format!(
                "Failed to create results directory {}",
                results_dir.display()
            )
        })?;

        let results_path = results_dir.join(RESULTS_FILE_NAME);
        if results_path.exists() {
            match self.archive_previous(&results_path, system_names, run_timestamp) {
                Ok(archived) => log::info!(
                    "Archived previous results {} to {}",
                    results_path.display(),
                    archived.display()
                ),
                Err(e) => log::warn!(
                    "Could not archive previous results {}, they will be overwritten: {e:?}",
                    results_path.display()
                ),
            }
        }

        let content =
            serde_json::to_vec_pretty(results).context("Failed to serialize results")?;
        std::fs::write(&results_path, content)
            .with_context(|| format!("Failed to write results to {}", results_path.display()))?;

        Ok(results_path)
    }

    fn archive_previous<S: AsRef<str>>(
        &self,
        results_path: &Path,
        system_names: &[S],
        run_timestamp: NaiveDateTime,
    ) -> anyhow::Result<PathBuf> {
        let archive_dir = self.archive_dir(system_names);
        std::fs::create_dir_all(&archive_dir).with_context(|| {
            format!(
                "Failed to create archive directory {}",
                archive_dir.display()
            )
        })?;

        let timestamp = run_timestamp.format(ARCHIVE_TIMESTAMP_FORMAT).to_string();
        let archive_path = unused_archive_path(&archive_dir, &timestamp);

        std::fs::rename(results_path, &archive_path).with_context(|| {
            format!("Failed to move results to {}", archive_path.display())
        })?;

        Ok(archive_path)
    }

    fn results_dir<S: AsRef<str>>(&self, system_names: &[S]) -> PathBuf {
        self.base_dir.join(results_key(system_names))
    }
}

/// Two runs started within the same second must not clobber each other's archive.
fn unused_archive_path(archive_dir: &Path, timestamp: &str) -> PathBuf {
    let candidate = archive_dir.join(format!("results_archived_{timestamp}.json"));
    if !candidate.exists() {
        return candidate;
    }

    (1..)
        .map(|n| archive_dir.join(format!("results_archived_{timestamp}_{n}.json")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Load a results file written by [ResultsStore::persist].
pub fn load_results(path: &Path) -> anyhow::Result<BenchmarkResults> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open results file {}", path.display()))?;
    let reader = std::io::BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse results file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_sorted_and_joined() {
        assert_eq!(results_key(&["b", "a"]), "a_vs_b");
        assert_eq!(results_key(&["go", "django", "fastapi"]), "django_vs_fastapi_vs_go");
        assert_eq!(results_key(&["solo"]), "solo");
    }

    #[test]
    fn test_empty_system_set_has_a_key() {
        let names: [&str; 0] = [];
        assert_eq!(results_key(&names), EMPTY_SYSTEMS_KEY);
    }

    #[test]
    fn test_paths_are_under_the_key_directory() {
        let store = ResultsStore::new("outputs");
        assert_eq!(store.base_dir(), Path::new("outputs"));
        assert_eq!(
            store.results_path(&["b", "a"]),
            PathBuf::from("outputs/a_vs_b/results.json")
        );
        assert_eq!(
            store.archive_dir(&["a", "b"]),
            PathBuf::from("outputs/a_vs_b/archive")
        );
    }

    #[test]
    fn test_archive_names_do_not_collide() {
        let dir = tempfile::TempDir::new().unwrap();
        let first = unused_archive_path(dir.path(), "2024-01-01_00-00-00");
        std::fs::write(&first, "{}").unwrap();

        let second = unused_archive_path(dir.path(), "2024-01-01_00-00-00");
        assert_ne!(first, second);
        assert_eq!(
            second.file_name().unwrap().to_str().unwrap(),
            "results_archived_2024-01-01_00-00-00_1.json"
        );
    }
}
