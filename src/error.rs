//! Unified error handling for the dawnkeep crate
//!
//! Domain modules keep their own error enums; this module wraps them into
//! a single [`Error`] usable across module boundaries, together with a
//! coarse category and a recoverability check.
//!
//! Recovery policy: failures are absorbed at the lowest layer that can
//! continue (one proxy line, one retry loop, one account). Errors that
//! surface here are the ones no lower layer could absorb.

use std::io;
use thiserror::Error;

pub use crate::client::error::ClientError;
pub use crate::proxy::error::ProxyError;
pub use crate::scheduler::error::SchedulerError;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-level failures (HTTP, timeout, proxy transport)
    Network,
    /// Proxy line parsing and pool errors
    ProxyFormat,
    /// Account validation and fleet scheduling errors
    Scheduler,
    /// File and store I/O
    Storage,
    /// Configuration errors
    Config,
    /// Other/unknown errors
    Other,
}

/// Unified error type for the dawnkeep crate
#[derive(Error, Debug)]
pub enum Error {
    /// Proxy parsing, loading, or pool errors
    #[error("proxy error: {0}")]
    Proxy(#[from] ProxyError),

    /// Reward API call errors
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// Scheduling errors
    #[error("scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this error is worth retrying at a higher level
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Proxy(e) => e.is_line_scoped(),
            Self::Client(_) => true,
            Self::Scheduler(_) => false,
            Self::Io(_) => true,
            Self::Json(_) => false,
            Self::Config(_) => false,
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Proxy(ProxyError::FileRead { .. }) => ErrorCategory::Storage,
            Self::Proxy(ProxyError::RemoteFetch(_)) => ErrorCategory::Network,
            Self::Proxy(_) => ErrorCategory::ProxyFormat,
            Self::Client(_) => ErrorCategory::Network,
            Self::Scheduler(_) => ErrorCategory::Scheduler,
            Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) => ErrorCategory::Other,
            Self::Config(_) => ErrorCategory::Config,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
