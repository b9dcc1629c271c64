//! Reward API client
//!
//! This module implements the two calls the daemon makes on behalf of every
//! account: the earning-status poll and the keepalive ping. Both go through
//! the bounded retry layer in [`retry`] and can be routed through an
//! account's assigned proxy.
//!
//! The underlying `reqwest` client binds its proxy at build time, so a
//! fresh client is built per attempt from the proxy active at that moment.
//! That keeps a rotation performed between cycles visible without any
//! client cache invalidation.

pub mod error;
pub mod headers;
pub mod retry;

pub use error::{ClientError, ClientResult, FailureKind};
pub use retry::{with_retries, CallContext, RetryPolicy};

use std::time::Duration;

use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::Value;

use crate::account::AccountSession;
use crate::proxy::ProxySpec;

/// Production reward API endpoint
pub const DEFAULT_BASE_URL: &str = "https://ext-api.dawninternet.com";

/// Earning status endpoint path
const GETPOINT_PATH: &str = "/api/atom/v1/userreferral/getpoint";

/// Keepalive endpoint path
const KEEPALIVE_PATH: &str = "/chromeapi/dawn/v1/userreward/keepalive";

/// Browser extension identity presented to the API
pub(crate) const EXTENSION_ID: &str = "fpdkjdnhkakefebpekbdhillbhonfjjp";

/// Protocol version sent with every keepalive
const EXTENSION_VERSION: &str = "1.1.6";

/// Default per-request timeout; generous so slow proxies fail by
/// classification, not by hang
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

// ============================================================================
// Payloads
// ============================================================================

/// Point totals extracted from an earning-status response
///
/// The response `data` is treated as an opaque record; only the referral
/// commission and the numeric `rewardPoint` sub-fields whose key denotes
/// points are read.
#[derive(Debug, Clone, PartialEq)]
pub struct EarningSnapshot {
    /// `referralPoint.commission`
    pub referral_commission: f64,

    /// Sum of numeric `rewardPoint` fields whose key contains "points"
    pub reward_points: f64,
}

impl EarningSnapshot {
    /// Extract totals from the response `data` record
    ///
    /// Missing or non-numeric fields count as zero; the shape of the rest
    /// of the record is ignored.
    pub fn from_data(data: &Value) -> Self {
        let referral_commission = data
            .pointer("/referralPoint/commission")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);

        let reward_points = data
            .get("rewardPoint")
            .and_then(Value::as_object)
            .map(|fields| {
                fields
                    .iter()
                    .filter(|(key, value)| {
                        key.to_lowercase().contains("points") && value.is_number()
                    })
                    .filter_map(|(_, value)| value.as_f64())
                    .sum()
            })
            .unwrap_or(0.0);

        Self {
            referral_commission,
            reward_points,
        }
    }

    /// Combined point total
    pub fn total(&self) -> f64 {
        self.referral_commission + self.reward_points
    }
}

/// Keepalive acknowledgment from the serving node
#[derive(Debug, Clone, Deserialize)]
pub struct KeepaliveAck {
    /// Explicit success flag; absent counts as not successful
    #[serde(default)]
    pub success: bool,

    /// Name of the node that served the ping
    #[serde(default)]
    pub servername: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// HTTP client for the reward API
///
/// Holds the base URL, timeout, and retry policy; actual transport clients
/// are built per attempt so each one carries the proxy active at that
/// moment.
pub struct RewardClient {
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl RewardClient {
    /// Create a client against the production endpoint with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_TIMEOUT, RetryPolicy::default())
    }

    /// Create a client with a custom timeout and retry policy
    #[must_use]
    pub fn with_config(timeout: Duration, retry: RetryPolicy) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
            retry,
        }
    }

    /// Create a client against a custom base URL, for mock servers
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        let mut client = Self::new();
        client.base_url = base_url.trim_end_matches('/').to_string();
        client
    }

    /// Create a client with custom config and base URL, for mock servers
    #[must_use]
    pub fn with_config_and_base_url(
        base_url: &str,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Self {
        let mut client = Self::with_config(timeout, retry);
        client.base_url = base_url.trim_end_matches('/').to_string();
        client
    }

    /// Fetch the account's current point totals
    ///
    /// Runs through the retry layer; the terminal error classifies the
    /// failure so the scheduling loop can decide about rotation.
    pub async fn fetch_earnings(
        &self,
        session: &AccountSession,
        proxy: Option<&ProxySpec>,
    ) -> ClientResult<EarningSnapshot> {
        let url = format!("{}{}?appid={}", self.base_url, GETPOINT_PATH, session.app_id);
        let ctx = CallContext::new(session.masked_email(), proxy);

        let data = with_retries(&self.retry, &ctx, || {
            self.request_data(Method::GET, &url, &session.token, proxy, None)
        })
        .await?;

        Ok(EarningSnapshot::from_data(&data))
    }

    /// Send a keepalive ping for the account
    ///
    /// The acknowledgment is parsed inside the attempt, so an unreadable
    /// acknowledgment counts as a transient failure rather than a success.
    pub async fn send_keepalive(
        &self,
        session: &AccountSession,
        proxy: Option<&ProxySpec>,
    ) -> ClientResult<KeepaliveAck> {
        let url = format!(
            "{}{}?appid={}",
            self.base_url, KEEPALIVE_PATH, session.app_id
        );
        let body = serde_json::json!({
            "username": session.email,
            "extensionid": EXTENSION_ID,
            "numberoftabs": 0,
            "_v": EXTENSION_VERSION,
        });
        let ctx = CallContext::new(session.masked_email(), proxy);

        with_retries(&self.retry, &ctx, || {
            self.keepalive_attempt(&url, &session.token, proxy, &body)
        })
        .await
    }

    /// One keepalive attempt: POST, unwrap `data`, parse the acknowledgment
    async fn keepalive_attempt(
        &self,
        url: &str,
        token: &str,
        proxy: Option<&ProxySpec>,
        body: &Value,
    ) -> ClientResult<KeepaliveAck> {
        let data = self
            .request_data(Method::POST, url, token, proxy, Some(body))
            .await?;
        serde_json::from_value(data).map_err(|_| ClientError::MalformedPayload)
    }

    /// One raw attempt: send the request and unwrap the `data` field
    ///
    /// Success is a 2xx response whose JSON body is an object carrying a
    /// non-null `data` field. Everything else is an error for the retry
    /// layer to classify.
    async fn request_data(
        &self,
        method: Method,
        url: &str,
        token: &str,
        proxy: Option<&ProxySpec>,
        body: Option<&Value>,
    ) -> ClientResult<Value> {
        let client = self.http_client(proxy)?;

        let mut request = client.request(method, url).headers(headers::build_headers(token));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout
            } else {
                ClientError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::BadStatus(status.as_u16()));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|_| ClientError::MalformedPayload)?;

        match payload.get("data") {
            Some(data) if !data.is_null() => Ok(data.clone()),
            _ => Err(ClientError::MalformedPayload),
        }
    }

    /// Build a transport client routed through the given proxy
    fn http_client(&self, proxy: Option<&ProxySpec>) -> ClientResult<Client> {
        let mut builder = Client::builder().timeout(self.timeout).gzip(true);

        if let Some(spec) = proxy {
            let url = spec.as_url();
            let proxy = reqwest::Proxy::all(&url)
                .map_err(|_| ClientError::InvalidProxyUrl(url.clone()))?;
            builder = builder.proxy(proxy);
        }

        Ok(builder.build()?)
    }
}

impl Default for RewardClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earning_snapshot_sums_point_fields_only() {
        let data = serde_json::json!({
            "referralPoint": {"commission": 10},
            "rewardPoint": {"activityPoints": 5, "other": "x"}
        });
        let snapshot = EarningSnapshot::from_data(&data);
        assert_eq!(snapshot.referral_commission, 10.0);
        assert_eq!(snapshot.reward_points, 5.0);
        assert_eq!(snapshot.total(), 15.0);
    }

    #[test]
    fn test_earning_snapshot_key_match_is_case_insensitive() {
        let data = serde_json::json!({
            "rewardPoint": {
                "twitter_x_id_points": 3,
                "registerPoints": 2,
                "POINTS_bonus": 1,
                "streak": 100
            }
        });
        let snapshot = EarningSnapshot::from_data(&data);
        assert_eq!(snapshot.reward_points, 6.0);
    }

    #[test]
    fn test_earning_snapshot_tolerates_missing_sections() {
        let snapshot = EarningSnapshot::from_data(&serde_json::json!({}));
        assert_eq!(snapshot.total(), 0.0);

        let snapshot = EarningSnapshot::from_data(&serde_json::json!({"rewardPoint": 3}));
        assert_eq!(snapshot.total(), 0.0);
    }

    #[test]
    fn test_keepalive_ack_defaults() {
        let ack: KeepaliveAck = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(!ack.success);
        assert_eq!(ack.servername, None);

        let ack: KeepaliveAck =
            serde_json::from_value(serde_json::json!({"success": true, "servername": "n1"}))
                .unwrap();
        assert!(ack.success);
        assert_eq!(ack.servername.as_deref(), Some("n1"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = RewardClient::with_base_url("http://localhost:9000/");
        assert_eq!(client.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_http_client_with_proxy_spec() {
        let client = RewardClient::new();
        let spec = ProxySpec::parse("socks5://1.2.3.4:1080").unwrap();
        assert!(client.http_client(Some(&spec)).is_ok());
        assert!(client.http_client(None).is_ok());
    }
}
