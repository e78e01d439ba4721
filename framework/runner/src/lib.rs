mod context;
mod definition;
mod monitor;
mod progress;
mod run;
mod scenario;
mod types;

pub mod prelude {
    pub use crate::context::RunnerContext;
    pub use crate::definition::{
        load_definition, BenchmarkConfig, BenchmarkDefinition, DefinitionError, Scenario,
    };
    pub use crate::progress::ProgressCollector;
    pub use crate::run::{run, start, RunOutput, StartOptions, DEFAULT_OUTPUT_DIR, OUTPUT_DIR_ENV};
    pub use crate::scenario::{
        mark_winner, most_frequent_error, run_scenario, UNKNOWN_ERROR, WINNER_MARGIN,
    };
    pub use crate::types::CrosswindResult;
}
