/// Recommended error type for code driving a benchmark run. Errors from loading the benchmark
/// definition convert into it, so `?` can be used throughout.
pub type CrosswindResult<T> = anyhow::Result<T>;
