/// Broken link definitions
///
/// A broken link is a URL whose fetch (or link extraction) did not succeed.
/// Records are created once and never changed afterwards.
use crate::url::NormalizedUrl;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Why a URL was classified as broken
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum FailureReason {
    /// The fetch did not complete within the configured timeout
    #[error("Timeout")]
    Timeout,

    /// Connection refused, DNS failure, TLS error, truncated body, etc.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The final response carried an HTTP status >= 400
    #[error("HTTP {0}")]
    NonSuccessStatus(u16),

    /// The page was fetched but its links could not be extracted
    #[error("Extractor failure: {0}")]
    ExtractorFailure(String),
}

impl FailureReason {
    /// Returns a stable machine-readable name for this kind of failure
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::NetworkError(_) => "network_error",
            Self::NonSuccessStatus(_) => "non_success_status",
            Self::ExtractorFailure(_) => "extractor_failure",
        }
    }

    /// Returns true if the target could not be reached at all
    ///
    /// A server that answered with an error status was reachable.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Timeout | Self::NetworkError(_))
    }
}

impl Serialize for FailureReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A URL that failed, together with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    pub url: NormalizedUrl,
    pub reason: FailureReason,
}

impl BrokenLink {
    pub fn new(url: NormalizedUrl, reason: FailureReason) -> Self {
        Self { url, reason }
    }
}
