mod results;
mod run_summary;
mod store;

pub use results::{BenchmarkResults, ScenarioResult, StatSummary, SystemOutcome, SKIPPED_MARKER};
pub use run_summary::{FailureRecord, RunConclusions, RunSummary, SystemConclusion, SystemStatus, SystemTally};
pub use store::{load_results, results_key, ResultsStore, ARCHIVE_TIMESTAMP_FORMAT, RESULTS_FILE_NAME};
