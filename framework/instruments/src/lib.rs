mod report;
mod sampler;
mod stats;

pub mod prelude {
    pub use crate::report::{
        InMemoryReporter, ReportCollector, ReportConfig, ReportEvent, Reporter,
        SummaryReportCollector,
    };
    pub use crate::sampler::{HttpSampler, Sampler};
    pub use crate::stats::{percentile, reduce, OUTLIER_MIN_SAMPLES};
}
