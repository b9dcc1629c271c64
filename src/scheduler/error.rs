//! Error types for the scheduling module

use thiserror::Error;

/// Result type for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Scheduler-specific errors
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Account record cannot be scheduled
    #[error("account '{account}' is malformed: {reason}")]
    MalformedAccount { account: String, reason: String },

    /// Store produced no runnable accounts
    #[error("no runnable accounts configured")]
    NoAccounts,
}

impl SchedulerError {
    /// Create a malformed account error with a masked identity
    pub fn malformed_account(account: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedAccount {
            account: account.into(),
            reason: reason.into(),
        }
    }
}
