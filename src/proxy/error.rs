//! Error types for proxy parsing, loading, and assignment.

use thiserror::Error;

/// Result type for proxy operations
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Errors that can occur while parsing proxy lines or assigning proxies
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Empty proxy line
    #[error("proxy cannot be an empty string")]
    Empty,

    /// Line matched none of the accepted layouts
    #[error("unsupported proxy format: '{line}'")]
    Malformed { line: String },

    /// Protocol outside http/https/socks4/socks5
    #[error("unsupported proxy protocol: '{protocol}'")]
    UnsupportedProtocol { protocol: String },

    /// Port outside 1-65535
    #[error("proxy port {port} out of range (1-65535)")]
    PortOutOfRange { port: u32 },

    /// Host is neither a valid IPv4 address nor a well-formed hostname
    #[error("invalid proxy host '{host}': {reason}")]
    InvalidHost { host: String, reason: String },

    /// Refresh URL did not parse as a URL
    #[error("invalid refresh URL '{url}'")]
    InvalidRefreshUrl { url: String },

    /// Round-robin requested from a pool with no proxies
    #[error("proxy pool is empty")]
    EmptyPool,

    /// Proxy list file could not be read
    #[error("failed to read proxy file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Remote proxy list could not be fetched
    #[error("failed to fetch remote proxy list: {0}")]
    RemoteFetch(#[from] reqwest::Error),
}

impl ProxyError {
    /// Create a malformed line error
    pub fn malformed(line: impl Into<String>) -> Self {
        Self::Malformed { line: line.into() }
    }

    /// Create an invalid host error
    pub fn invalid_host(host: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHost {
            host: host.into(),
            reason: reason.into(),
        }
    }

    /// Check if the error concerns a single line rather than the whole load
    ///
    /// Line-scoped errors are skipped and reported during a file load;
    /// load-scoped errors abort it.
    pub fn is_line_scoped(&self) -> bool {
        !matches!(
            self,
            Self::EmptyPool | Self::FileRead { .. } | Self::RemoteFetch(_)
        )
    }
}
