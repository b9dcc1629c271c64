//! Per-account scheduling
//!
//! Each account runs two independent, indefinitely repeating loops: the
//! earning-status poll and the keepalive ping. The loops share nothing but
//! the proxy binding table, and they look the binding up fresh at the start
//! of every cycle, so a rotation performed by one loop is picked up by the
//! other on its next tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::account::AccountSession;
use crate::client::{FailureKind, RewardClient};
use crate::proxy::{ProxyBindings, ProxySpec};

/// Supervisor for one account's two polling loops
pub struct AccountWorker {
    session: AccountSession,
    client: Arc<RewardClient>,
    bindings: ProxyBindings,
    use_proxy: bool,
    poll_interval: Duration,
    shutdown: watch::Receiver<bool>,
}

impl AccountWorker {
    /// Create a worker for a validated account session
    pub fn new(
        session: AccountSession,
        client: Arc<RewardClient>,
        bindings: ProxyBindings,
        use_proxy: bool,
        poll_interval: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            session,
            client,
            bindings,
            use_proxy,
            poll_interval,
            shutdown,
        }
    }

    /// Run both loops until the shutdown signal fires
    pub async fn run(self) {
        tokio::join!(self.earning_loop(), self.keepalive_loop());
        debug!(account = %self.session.masked_email(), "account worker stopped");
    }

    /// One earning-status poll
    ///
    /// On success the point total is reported. A transient exhaustion stays
    /// silent for this cycle; a stale reading is non-fatal and the next
    /// cycle retries anyway. Proxy-class exhaustion rotates the binding
    /// when proxy mode is on.
    pub async fn earning_cycle(&self) {
        let proxy = self.current_proxy().await;

        match self.client.fetch_earnings(&self.session, proxy.as_ref()).await {
            Ok(snapshot) => {
                info!(
                    account = %self.session.masked_email(),
                    proxy = %proxy_label(&proxy),
                    total_points = snapshot.total(),
                    referral = snapshot.referral_commission,
                    "earning status"
                );
            }
            Err(error) => {
                if self.use_proxy && error.is_exhausted(FailureKind::Proxy) {
                    self.rotate_binding("earning poll").await;
                }
            }
        }
    }

    /// One keepalive ping
    ///
    /// Success with an explicit acknowledgment flag reports the serving
    /// node. Any exhausted failure rotates the binding when proxy mode is
    /// on, whatever the failure class.
    pub async fn keepalive_cycle(&self) {
        let proxy = self.current_proxy().await;

        match self.client.send_keepalive(&self.session, proxy.as_ref()).await {
            Ok(ack) if ack.success => {
                info!(
                    account = %self.session.masked_email(),
                    proxy = %proxy_label(&proxy),
                    server = %ack.servername.as_deref().unwrap_or("unknown"),
                    "keepalive acknowledged"
                );
            }
            Ok(_) => {
                debug!(
                    account = %self.session.masked_email(),
                    proxy = %proxy_label(&proxy),
                    "keepalive accepted without success flag"
                );
            }
            Err(_) => {
                if self.use_proxy {
                    self.rotate_binding("keepalive").await;
                }
            }
        }
    }

    async fn earning_loop(&self) {
        let mut shutdown = self.shutdown.clone();
        loop {
            if *shutdown.borrow() {
                break;
            }
            self.earning_cycle().await;
            if self.wait_for_next_cycle(&mut shutdown).await {
                break;
            }
        }
    }

    async fn keepalive_loop(&self) {
        let mut shutdown = self.shutdown.clone();
        loop {
            if *shutdown.borrow() {
                break;
            }
            self.keepalive_cycle().await;
            if self.wait_for_next_cycle(&mut shutdown).await {
                break;
            }
        }
    }

    /// Look up the binding for this cycle
    ///
    /// Queried fresh every cycle rather than cached, so rotations from the
    /// sibling loop take effect immediately. `None` when proxy mode is off
    /// or the pool is empty.
    async fn current_proxy(&self) -> Option<ProxySpec> {
        if self.use_proxy {
            self.bindings.get_or_assign(&self.session.email).await
        } else {
            None
        }
    }

    /// Rotate this account's proxy binding after exhausted retries
    async fn rotate_binding(&self, trigger: &str) {
        match self.bindings.rotate(&self.session.email).await {
            Some(proxy) => {
                warn!(
                    account = %self.session.masked_email(),
                    proxy = %proxy.as_url(),
                    trigger,
                    "rotated account proxy"
                );
            }
            None => {
                debug!(
                    account = %self.session.masked_email(),
                    trigger,
                    "rotation requested but proxy pool is empty"
                );
            }
        }
    }

    /// Sleep until the next cycle; true means shutdown fired first
    async fn wait_for_next_cycle(&self, shutdown: &mut watch::Receiver<bool>) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(self.poll_interval) => false,
            _ = shutdown.changed() => true,
        }
    }
}

fn proxy_label(proxy: &Option<ProxySpec>) -> String {
    proxy
        .as_ref()
        .map_or_else(|| "no proxy".to_string(), ProxySpec::as_url)
}
