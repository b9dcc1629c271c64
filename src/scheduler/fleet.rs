//! Fleet fan-out
//!
//! The fleet validates the account list, gives every runnable account a
//! fresh session, and launches one [`AccountWorker`] per account. Workers
//! run until the shared shutdown signal fires; a malformed record is
//! skipped with a log line and never takes the rest of the fleet down.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::account::{Account, AccountSession};
use crate::client::RewardClient;
use crate::proxy::ProxyBindings;

use super::error::{SchedulerError, SchedulerResult};
use super::worker::AccountWorker;

/// Orchestrator for all account workers of one run
pub struct Fleet {
    client: Arc<RewardClient>,
    bindings: ProxyBindings,
    use_proxy: bool,
    poll_interval: Duration,
}

impl Fleet {
    /// Create a fleet
    ///
    /// `use_proxy` is fixed for the whole run. With it off, or with an
    /// empty pool behind `bindings`, every call goes direct and rotation
    /// is a no-op.
    pub fn new(
        client: Arc<RewardClient>,
        bindings: ProxyBindings,
        use_proxy: bool,
        poll_interval: Duration,
    ) -> Self {
        Self {
            client,
            bindings,
            use_proxy,
            poll_interval,
        }
    }

    /// Launch a worker per runnable account and wait on all of them
    ///
    /// Returns once every worker has observed the shutdown signal.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::NoAccounts`] when validation leaves
    /// nothing to run.
    pub async fn run(
        &self,
        accounts: Vec<Account>,
        shutdown: watch::Receiver<bool>,
    ) -> SchedulerResult<()> {
        let mut sessions = Vec::new();
        for account in accounts {
            match AccountSession::try_new(account) {
                Ok(session) => sessions.push(session),
                Err(error) => {
                    warn!(error = %error, "skipping account record");
                }
            }
        }

        if sessions.is_empty() {
            return Err(SchedulerError::NoAccounts);
        }

        let pool_size = self.bindings.pool_size().await;
        info!(
            accounts = sessions.len(),
            proxies = pool_size,
            use_proxy = self.use_proxy,
            "fleet starting"
        );

        let mut workers = Vec::with_capacity(sessions.len());
        for session in sessions {
            let worker = AccountWorker::new(
                session,
                Arc::clone(&self.client),
                self.bindings.clone(),
                self.use_proxy,
                self.poll_interval,
                shutdown.clone(),
            );
            workers.push(tokio::spawn(worker.run()));
        }

        for joined in futures::future::join_all(workers).await {
            if let Err(error) = joined {
                warn!(error = %error, "account worker ended abnormally");
            }
        }

        info!("fleet stopped");
        Ok(())
    }
}
