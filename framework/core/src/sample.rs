use std::time::Duration;

/// Label used when a transport failure carries no usable description.
const FALLBACK_FAILURE_LABEL: &str = "Request failed";

/// Why a single request attempt did not produce a latency.
///
/// The [std::fmt::Display] form of each variant is the label that ends up in the results file, so
/// changing it changes the persisted format.
#[derive(derive_more::Error, derive_more::Display, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SampleError {
    /// The request did not complete within the configured timeout.
    #[display("Timeout")]
    Timeout,
    /// The server answered with a non-2xx status code.
    #[display("HTTP {_0}")]
    HttpStatus(#[error(not(source))] u16),
    /// Any other failure, such as a refused connection or a DNS lookup failure.
    #[display("{_0}")]
    Other(#[error(not(source))] String),
}

impl SampleError {
    /// Build an [SampleError::Other] from a free-form message.
    ///
    /// Blank messages are replaced so that the label is never empty.
    pub fn other(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = message.trim();
        if message.is_empty() {
            Self::Other(FALLBACK_FAILURE_LABEL.to_string())
        } else {
            Self::Other(message.to_string())
        }
    }
}

/// The outcome of one timed request attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    /// The request succeeded and took this long, measured on a monotonic clock.
    Latency(Duration),
    /// The request failed.
    Failed(SampleError),
}

impl Sample {
    /// The latency in seconds, if the attempt succeeded.
    pub fn latency_secs(&self) -> Option<f64> {
        match self {
            Sample::Latency(elapsed) => Some(elapsed.as_secs_f64()),
            Sample::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&SampleError> {
        match self {
            Sample::Latency(_) => None,
            Sample::Failed(e) => Some(e),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Sample::Latency(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_labels() {
        assert_eq!(SampleError::Timeout.to_string(), "Timeout");
        assert_eq!(SampleError::HttpStatus(503).to_string(), "HTTP 503");
        assert_eq!(
            SampleError::other("Connection refused").to_string(),
            "Connection refused"
        );
    }

    #[test]
    fn test_blank_other_message_is_replaced() {
        assert_eq!(SampleError::other("  ").to_string(), FALLBACK_FAILURE_LABEL);
    }

    #[test]
    fn test_sample_accessors() {
        let ok = Sample::Latency(Duration::from_millis(250));
        assert_eq!(ok.latency_secs(), Some(0.25));
        assert!(ok.error().is_none());
        assert!(ok.is_success());

        let failed = Sample::Failed(SampleError::Timeout);
        assert_eq!(failed.latency_secs(), None);
        assert_eq!(failed.error(), Some(&SampleError::Timeout));
        assert!(!failed.is_success());
    }
}
