//! Round-robin proxy pool
//!
//! The pool keeps proxies in file order and hands them out cyclically
//! through a single shared cursor. Deterministic rotation guarantees an
//! even long-run distribution across accounts regardless of how the
//! account count compares to the pool size.

use super::error::{ProxyError, ProxyResult};
use super::spec::ProxySpec;

/// Ordered proxy pool with a wrapping cursor
///
/// Built once at startup and immutable afterwards except for cursor
/// advancement. No randomness and no weighting.
#[derive(Debug, Clone)]
pub struct ProxyPool {
    proxies: Vec<ProxySpec>,
    cursor: usize,
}

impl ProxyPool {
    /// Create a pool from parsed proxies, preserving their order
    #[must_use]
    pub fn new(proxies: Vec<ProxySpec>) -> Self {
        Self { proxies, cursor: 0 }
    }

    /// Number of proxies in the pool
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    /// Check whether the pool holds no proxies
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Take the proxy under the cursor and advance the cursor
    ///
    /// Returns the proxies in file order and wraps around after the last
    /// one, so N+1 consecutive calls on a pool of N return the first proxy
    /// again.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::EmptyPool`] when the pool holds no proxies.
    pub fn next_proxy(&mut self) -> ProxyResult<ProxySpec> {
        if self.proxies.is_empty() {
            return Err(ProxyError::EmptyPool);
        }

        let proxy = self.proxies[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.proxies.len();
        Ok(proxy)
    }

    /// Current cursor position (0-indexed)
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_of(n: u16) -> ProxyPool {
        let proxies = (0..n)
            .map(|i| ProxySpec::parse(&format!("10.0.0.{}:{}", i + 1, 8000 + i)).unwrap())
            .collect();
        ProxyPool::new(proxies)
    }

    #[test]
    fn test_empty_pool_errors() {
        let mut pool = ProxyPool::new(Vec::new());
        assert!(pool.is_empty());
        assert!(matches!(pool.next_proxy(), Err(ProxyError::EmptyPool)));
    }

    #[test]
    fn test_round_robin_order() {
        let mut pool = pool_of(3);
        assert_eq!(pool.next_proxy().unwrap().host, "10.0.0.1");
        assert_eq!(pool.next_proxy().unwrap().host, "10.0.0.2");
        assert_eq!(pool.next_proxy().unwrap().host, "10.0.0.3");
    }

    #[test]
    fn test_wraparound_after_full_cycle() {
        let n = 4;
        let mut pool = pool_of(n);
        let first = pool.next_proxy().unwrap();
        for _ in 0..n - 1 {
            pool.next_proxy().unwrap();
        }
        // Call N+1 returns the first proxy again
        assert_eq!(pool.next_proxy().unwrap(), first);
    }

    #[test]
    fn test_cursor_advances() {
        let mut pool = pool_of(2);
        assert_eq!(pool.cursor(), 0);
        pool.next_proxy().unwrap();
        assert_eq!(pool.cursor(), 1);
        pool.next_proxy().unwrap();
        assert_eq!(pool.cursor(), 0);
    }
}
