//! Sticky account-to-proxy bindings
//!
//! Every account keeps the proxy it was first assigned until a rotation is
//! requested for it. The binding table and the pool cursor are the only
//! state shared across worker tasks; both live behind one coarse lock,
//! which is enough because accounts never contend on a specific entry,
//! only on the table itself.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::pool::ProxyPool;
use super::spec::ProxySpec;

struct BindingState {
    pool: ProxyPool,
    assigned: HashMap<String, ProxySpec>,
}

/// Shared table mapping account identities to their assigned proxy
///
/// Cloneable handle; all clones observe the same pool cursor and bindings.
#[derive(Clone)]
pub struct ProxyBindings {
    inner: Arc<Mutex<BindingState>>,
}

impl ProxyBindings {
    /// Create a binding table over a pool
    pub fn new(pool: ProxyPool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BindingState {
                pool,
                assigned: HashMap::new(),
            })),
        }
    }

    /// Return the account's bound proxy, assigning one on first use
    ///
    /// The first call for an account takes the proxy under the pool cursor
    /// and advances the cursor; later calls return the same proxy without
    /// touching the cursor. Returns `None` when the pool is empty, which is
    /// the valid "no proxy" mode rather than an error.
    pub async fn get_or_assign(&self, account: &str) -> Option<ProxySpec> {
        let mut state = self.inner.lock().await;

        if let Some(proxy) = state.assigned.get(account) {
            return Some(proxy.clone());
        }

        match state.pool.next_proxy() {
            Ok(proxy) => {
                state.assigned.insert(account.to_string(), proxy.clone());
                Some(proxy)
            }
            Err(_) => None,
        }
    }

    /// Force-reassign the account's proxy from the pool cursor
    ///
    /// Used exclusively after exhausted retries; sticky assignment is the
    /// default and rotation is the escape hatch. Always advances the
    /// cursor. Returns `None` when the pool is empty.
    pub async fn rotate(&self, account: &str) -> Option<ProxySpec> {
        let mut state = self.inner.lock().await;

        match state.pool.next_proxy() {
            Ok(proxy) => {
                state.assigned.insert(account.to_string(), proxy.clone());
                Some(proxy)
            }
            Err(_) => None,
        }
    }

    /// Number of proxies in the underlying pool
    pub async fn pool_size(&self) -> usize {
        self.inner.lock().await.pool.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings_of(n: u16) -> ProxyBindings {
        let proxies = (0..n)
            .map(|i| ProxySpec::parse(&format!("10.0.0.{}:8080", i + 1)).unwrap())
            .collect();
        ProxyBindings::new(ProxyPool::new(proxies))
    }

    #[tokio::test]
    async fn test_assignment_is_sticky() {
        let bindings = bindings_of(3);

        let first = bindings.get_or_assign("a@example.com").await.unwrap();
        let again = bindings.get_or_assign("a@example.com").await.unwrap();
        assert_eq!(first, again);

        // The second lookup must not have advanced the cursor
        let second = bindings.get_or_assign("b@example.com").await.unwrap();
        assert_eq!(second.host, "10.0.0.2");
    }

    #[tokio::test]
    async fn test_rotate_always_advances() {
        let bindings = bindings_of(3);

        let first = bindings.get_or_assign("a@example.com").await.unwrap();
        assert_eq!(first.host, "10.0.0.1");

        let rotated = bindings.rotate("a@example.com").await.unwrap();
        assert_eq!(rotated.host, "10.0.0.2");

        // The new binding sticks
        let current = bindings.get_or_assign("a@example.com").await.unwrap();
        assert_eq!(current, rotated);
    }

    #[tokio::test]
    async fn test_empty_pool_means_no_proxy_mode() {
        let bindings = ProxyBindings::new(ProxyPool::new(Vec::new()));
        assert_eq!(bindings.get_or_assign("a@example.com").await, None);
        assert_eq!(bindings.rotate("a@example.com").await, None);
    }

    #[tokio::test]
    async fn test_rotation_wraps_around_pool() {
        let bindings = bindings_of(2);

        bindings.get_or_assign("a@example.com").await.unwrap();
        let r1 = bindings.rotate("a@example.com").await.unwrap();
        assert_eq!(r1.host, "10.0.0.2");
        let r2 = bindings.rotate("a@example.com").await.unwrap();
        assert_eq!(r2.host, "10.0.0.1");
    }

    #[tokio::test]
    async fn test_rotation_visible_to_other_lookups() {
        let bindings = bindings_of(3);

        bindings.get_or_assign("a@example.com").await.unwrap();
        let rotated = bindings.rotate("a@example.com").await.unwrap();

        // A fresh lookup from any task sees the rotated proxy
        let handle = bindings.clone();
        let seen = handle.get_or_assign("a@example.com").await.unwrap();
        assert_eq!(seen, rotated);
    }
}
