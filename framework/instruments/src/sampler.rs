use anyhow::Context;
use crosswind_core::prelude::{Sample, SampleError};
use std::future::Future;
use std::time::{Duration, Instant};

/// Performs one timed request and classifies the outcome.
///
/// Implementations must never fail outright, every outcome is reported as a [Sample].
pub trait Sampler {
    fn sample(&self, url: &str) -> impl Future<Output = Sample> + Send;
}

/// Times plain HTTP GET requests.
///
/// Holds one connection-pooling client for as long as the sampler lives, so connections are reused
/// between iterations and released when the sampler is dropped.
#[derive(Debug, Clone)]
pub struct HttpSampler {
    client: reqwest::Client,
}

impl HttpSampler {
    /// Create a sampler that gives up on each request after `timeout`.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            // A redirect is a non-2xx answer like any other.
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

impl Sampler for HttpSampler {
    async fn sample(&self, url: &str) -> Sample {
        let started = Instant::now();

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return Sample::Failed(classify_error(&e)),
        };

        let status = response.status();

        // The latency covers the full response, so the body has to be read.
        if let Err(e) = response.bytes().await {
            return Sample::Failed(classify_error(&e));
        }
        let elapsed = started.elapsed();

        if !status.is_success() {
            return Sample::Failed(SampleError::HttpStatus(status.as_u16()));
        }

        Sample::Latency(elapsed)
    }
}

fn classify_error(err: &reqwest::Error) -> SampleError {
    if err.is_timeout() {
        return SampleError::Timeout;
    }

    log::trace!("Request failed: {err:?}");
    SampleError::other(root_cause(err))
}

/// The innermost error usually says what actually went wrong, e.g. "Connection refused".
fn root_cause(err: &(dyn std::error::Error + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}
