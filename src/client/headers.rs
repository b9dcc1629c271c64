//! Request headers for the reward API
//!
//! The API expects the header surface of the browser extension it serves:
//! an extension Origin, cross-site fetch metadata, and a realistic
//! User-Agent. The User-Agent rotates per request from a small pool.

use rand::seq::SliceRandom;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE, ORIGIN,
    USER_AGENT,
};

use super::EXTENSION_ID;

/// Pool of realistic User-Agent strings for rotation
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
];

/// Build the header set for one API request
///
/// The bearer token is attached when it forms a valid header value; the
/// account validation upstream guarantees it is non-empty.
pub fn build_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(USER_AGENT, HeaderValue::from_static(random_user_agent()));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Ok(origin) = HeaderValue::from_str(&format!("chrome-extension://{EXTENSION_ID}")) {
        headers.insert(ORIGIN, origin);
    }
    headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("cross-site"));

    if let Ok(auth) = HeaderValue::from_str(&format!("Bearer {token}")) {
        headers.insert(AUTHORIZATION, auth);
    }

    headers
}

/// Pick a random user agent from the pool
fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS.choose(&mut rng).unwrap_or(&USER_AGENTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_include_bearer_token() {
        let headers = build_headers("secret-token");
        assert_eq!(
            headers.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer secret-token"
        );
    }

    #[test]
    fn test_headers_include_extension_surface() {
        let headers = build_headers("tok");
        let origin = headers.get(ORIGIN).unwrap().to_str().unwrap();
        assert!(origin.starts_with("chrome-extension://"));
        assert_eq!(headers.get("sec-fetch-mode").unwrap(), "cors");
        assert_eq!(headers.get("sec-fetch-site").unwrap(), "cross-site");
    }

    #[test]
    fn test_user_agent_rotation() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            let agent = random_user_agent();
            assert!(USER_AGENTS.contains(&agent));
            seen.insert(agent);
        }
        assert!(seen.len() > 1, "user agents should rotate");
    }
}
