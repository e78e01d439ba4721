use std::sync::Arc;

use crosswind_instruments::prelude::{Reporter, Sampler};

use crate::definition::{BenchmarkConfig, BenchmarkDefinition};

/// Everything a run needs to measure: the benchmark definition, the sampler that makes requests
/// and the reporter that receives progress events.
#[derive(Debug)]
pub struct RunnerContext<S: Sampler> {
    definition: BenchmarkDefinition,
    sampler: S,
    reporter: Arc<Reporter>,
}

impl<S: Sampler> RunnerContext<S> {
    pub fn new(definition: BenchmarkDefinition, sampler: S, reporter: Arc<Reporter>) -> Self {
        Self {
            definition,
            sampler,
            reporter,
        }
    }

    pub fn definition(&self) -> &BenchmarkDefinition {
        &self.definition
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.definition.config
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    pub fn reporter(&self) -> &Arc<Reporter> {
        &self.reporter
    }
}
