//! Common test utilities

use std::time::Duration;

use dawnkeep::account::{Account, AccountSession};
use dawnkeep::client::{RetryPolicy, RewardClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Earning status endpoint path served by the mock API
pub const GETPOINT_PATH: &str = "/api/atom/v1/userreferral/getpoint";

/// Keepalive endpoint path served by the mock API
pub const KEEPALIVE_PATH: &str = "/chromeapi/dawn/v1/userreward/keepalive";

/// Create a validated session for a test account
pub fn test_session(email: &str) -> AccountSession {
    AccountSession::try_new(Account::new(email, "test-token")).unwrap()
}

/// Create a client against a mock server with fast retries
#[allow(dead_code)]
pub fn fast_client(base_url: &str) -> RewardClient {
    RewardClient::with_config_and_base_url(
        base_url,
        Duration::from_secs(5),
        RetryPolicy::with_delay(3, Duration::from_millis(5)),
    )
}

/// Mount a successful earning-status response
#[allow(dead_code)]
pub async fn mount_earning_ok(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(GETPOINT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "referralPoint": {"commission": 10},
                "rewardPoint": {"activityPoints": 5, "registerpoints": 25, "other": "x"}
            }
        })))
        .mount(server)
        .await;
}

/// Mount a successful keepalive acknowledgment
#[allow(dead_code)]
pub async fn mount_keepalive_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(KEEPALIVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"success": true, "servername": "dawn-node-7"}
        })))
        .mount(server)
        .await;
}

/// Mount an endpoint that always fails with a server error
#[allow(dead_code)]
pub async fn mount_always_failing(server: &MockServer, endpoint: &str, http_method: &str) {
    Mock::given(method(http_method))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(503))
        .mount(server)
        .await;
}
