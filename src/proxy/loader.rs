//! Proxy list loading
//!
//! Reads newline-delimited proxy lists from a local file or a remote URL.
//! Individually malformed lines are skipped and reported; they never abort
//! the load.

use std::path::Path;
use std::time::Duration;

use super::error::{ProxyError, ProxyResult};
use super::spec::{ProxyParser, ProxySpec};

/// Public proxy list used when no private list is configured
pub const DEFAULT_REMOTE_LIST_URL: &str =
    "https://raw.githubusercontent.com/monosans/proxy-list/main/proxies/all.txt";

/// Timeout for fetching a remote proxy list
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Parse proxy lines, splitting results into accepted and rejected
///
/// Blank lines are ignored. Returns the parsed proxies in input order plus
/// every rejected line paired with its parse error.
pub fn parse_lines<'a, I>(lines: I) -> (Vec<ProxySpec>, Vec<(String, ProxyError)>)
where
    I: IntoIterator<Item = &'a str>,
{
    let parser = ProxyParser::new();
    let mut proxies = Vec::new();
    let mut rejected = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parser.parse(line) {
            Ok(proxy) => proxies.push(proxy),
            Err(e) => rejected.push((line.to_string(), e)),
        }
    }

    (proxies, rejected)
}

/// Load and parse a proxy file
///
/// Malformed lines are reported through tracing and skipped.
///
/// # Errors
///
/// Returns [`ProxyError::FileRead`] when the file itself cannot be read.
/// An empty result is not an error; the caller decides whether to degrade
/// to proxy-less operation.
pub async fn load_from_file(path: &Path) -> ProxyResult<Vec<ProxySpec>> {
    let content =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ProxyError::FileRead {
                path: path.display().to_string(),
                source,
            })?;

    let (proxies, rejected) = parse_lines(content.lines());

    for (line, error) in &rejected {
        tracing::warn!(line = %line, error = %error, "skipping malformed proxy line");
    }

    tracing::info!(
        loaded = proxies.len(),
        skipped = rejected.len(),
        path = %path.display(),
        "proxy list loaded"
    );

    Ok(proxies)
}

/// Fetch a remote proxy list and persist it to the local proxy file
///
/// The remote body is written verbatim so the local file stays the single
/// source the pool is built from. Returns the number of non-empty lines
/// written.
///
/// # Errors
///
/// Returns [`ProxyError::RemoteFetch`] on any HTTP failure and
/// [`ProxyError::FileRead`] style I/O errors when the destination cannot
/// be written.
pub async fn fetch_remote_list(url: &str, dest: &Path) -> ProxyResult<usize> {
    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?;

    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    tokio::fs::write(dest, &body)
        .await
        .map_err(|source| ProxyError::FileRead {
            path: dest.display().to_string(),
            source,
        })?;

    let lines = body.lines().filter(|l| !l.trim().is_empty()).count();
    tracing::info!(lines, url = %url, dest = %dest.display(), "remote proxy list saved");
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines_skips_bad_entries() {
        let input = "1.2.3.4:8080\n\nnot-a-proxy\nsocks5://5.6.7.8:1080\n   \n";
        let (proxies, rejected) = parse_lines(input.lines());

        assert_eq!(proxies.len(), 2);
        assert_eq!(proxies[0].host, "1.2.3.4");
        assert_eq!(proxies[1].host, "5.6.7.8");

        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].0, "not-a-proxy");
    }

    #[test]
    fn test_parse_lines_preserves_file_order() {
        let input = "10.0.0.2:8080\n10.0.0.1:8080\n10.0.0.3:8080";
        let (proxies, _) = parse_lines(input.lines());
        let hosts: Vec<_> = proxies.iter().map(|p| p.host.as_str()).collect();
        assert_eq!(hosts, ["10.0.0.2", "10.0.0.1", "10.0.0.3"]);
    }

    #[test]
    fn test_parse_lines_all_blank() {
        let (proxies, rejected) = parse_lines("\n  \n\t\n".lines());
        assert!(proxies.is_empty());
        assert!(rejected.is_empty());
    }

    #[tokio::test]
    async fn test_load_missing_file_errors() {
        let result = load_from_file(Path::new("/nonexistent/proxy.txt")).await;
        assert!(matches!(result, Err(ProxyError::FileRead { .. })));
    }
}
