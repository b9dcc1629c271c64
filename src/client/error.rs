//! Error types and failure classification for reward API calls

use std::fmt;
use thiserror::Error;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur during a reward API call
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out
    #[error("request timed out")]
    Timeout,

    /// Server answered outside the 2xx range
    #[error("server returned status {0}")]
    BadStatus(u16),

    /// Body was not a JSON object carrying a `data` field
    #[error("response payload is missing the `data` field")]
    MalformedPayload,

    /// Proxy spec could not be turned into a transport proxy
    #[error("invalid proxy URL '{0}'")]
    InvalidProxyUrl(String),

    /// All attempts of one logical operation failed
    #[error("retries exhausted after {attempts} attempts ({kind} failure)")]
    RetriesExhausted { kind: FailureKind, attempts: u32 },
}

impl ClientError {
    /// Check whether this is an exhaustion of the given failure class
    pub fn is_exhausted(&self, wanted: FailureKind) -> bool {
        matches!(self, Self::RetriesExhausted { kind, .. } if *kind == wanted)
    }
}

/// Classification of a failed attempt
///
/// Drives the terminal behavior of the retry loop: proxy-class exhaustion
/// tells the caller to rotate the account's proxy binding, transient-class
/// exhaustion leaves the rotation decision to the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection-level rejection by the proxy, including TLS setup
    /// failures (those surface during connect)
    Proxy,

    /// Everything else: timeout, bad status, malformed payload
    Transient,
}

impl FailureKind {
    /// Classify a single failed attempt
    pub fn of(error: &ClientError) -> Self {
        match error {
            ClientError::Http(e) if e.is_connect() => Self::Proxy,
            ClientError::InvalidProxyUrl(_) => Self::Proxy,
            _ => Self::Transient,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proxy => write!(f, "proxy"),
            Self::Transient => write!(f, "transient"),
        }
    }
}
