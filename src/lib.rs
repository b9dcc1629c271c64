//! dawnkeep - Dawn account keepalive daemon
//!
//! A long-running client that keeps many Dawn accounts active at once:
//! every account gets a periodic earning-status poll, a periodic keepalive
//! ping, and a sticky outbound proxy that rotates on failure.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`proxy`] - Proxy line parsing, round-robin pool, sticky bindings
//! - [`client`] - Reward API calls with bounded classified retries
//! - [`account`] - Account records, flat-file store, identity masking
//! - [`scheduler`] - Per-account polling loops and fleet fan-out
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```no_run
//! use dawnkeep::account::Account;
//! use dawnkeep::client::RewardClient;
//! use dawnkeep::proxy::{ProxyBindings, ProxyPool};
//! use dawnkeep::scheduler::Fleet;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let accounts = vec![Account::new("user@example.com", "token")];
//!     let bindings = ProxyBindings::new(ProxyPool::new(Vec::new()));
//!     let fleet = Fleet::new(
//!         Arc::new(RewardClient::new()),
//!         bindings,
//!         false,
//!         Duration::from_secs(600),
//!     );
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     fleet.run(accounts, shutdown_rx).await?;
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod client;
pub mod config;
pub mod error;
pub mod proxy;
pub mod scheduler;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::account::{Account, AccountSession, AccountStore};
    pub use crate::client::{ClientError, EarningSnapshot, KeepaliveAck, RetryPolicy, RewardClient};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::proxy::{ProxyBindings, ProxyError, ProxyPool, ProxySpec};
    pub use crate::scheduler::{AccountWorker, Fleet, SchedulerError};
}

// Direct re-exports for convenience
pub use account::Account;
pub use config::Config;
pub use proxy::{ProxyPool, ProxySpec};
