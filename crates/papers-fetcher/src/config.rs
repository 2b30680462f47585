//! Configuration for the PubMed papers fetcher.

use std::time::Duration;

/// NCBI E-utilities constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the NCBI Entrez Programming Utilities.
    pub const EUTILS_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

    /// Entrez database searched and fetched.
    pub const DATABASE: &str = "pubmed";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Delay before each request without API key (NCBI allows 3 req/s).
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(334);

    /// Delay before each request with API key (NCBI allows 10 req/s).
    pub const RATE_LIMIT_DELAY_WITH_KEY: Duration = Duration::from_millis(100);

    /// Retries for transient failures (connection errors, 5xx, 429).
    pub const MAX_RETRIES: u32 = 3;

    /// Fallback wait when a 429 response carries no Retry-After header.
    pub const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 4;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Defaults for a fetch run.
pub mod defaults {
    /// Number of PMIDs requested from esearch (`retmax`).
    pub const MAX_RESULTS: u32 = 20;

    /// Upper bound accepted for `retmax` on a single esearch call.
    pub const MAX_RESULTS_LIMIT: u32 = 10_000;

    /// `tool` parameter sent to NCBI to identify this client.
    pub const TOOL_NAME: &str = "papers-fetcher";
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// NCBI API key (optional, raises the rate limit).
    pub api_key: Option<String>,

    /// Contact email sent with each request (optional, recommended by NCBI).
    pub email: Option<String>,

    /// Tool name sent with each request.
    pub tool: String,

    /// Base URL for E-utilities (for testing with mock servers).
    pub eutils_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Delay awaited before each request.
    pub rate_limit_delay: Duration,

    /// Retries for transient failures.
    pub max_retries: u32,
}

impl Config {
    /// Create a new configuration with optional API key and contact email.
    ///
    /// The per-request delay is adjusted to the NCBI limit for the key status.
    #[must_use]
    pub fn new(api_key: Option<String>, email: Option<String>) -> Self {
        let has_key = api_key.is_some();
        Self {
            api_key,
            email,
            tool: defaults::TOOL_NAME.to_string(),
            eutils_url: api::EUTILS_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            rate_limit_delay: if has_key {
                api::RATE_LIMIT_DELAY_WITH_KEY
            } else {
                api::RATE_LIMIT_DELAY
            },
            max_retries: api::MAX_RETRIES,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            email: None,
            tool: defaults::TOOL_NAME.to_string(),
            eutils_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            rate_limit_delay: Duration::from_millis(0), // No delay in tests
            max_retries: 0,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `NCBI_API_KEY` and `NCBI_EMAIL`, loading a `.env` file first if present.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let api_key = std::env::var("NCBI_API_KEY").ok().filter(|k| !k.is_empty());
        let email = std::env::var("NCBI_EMAIL").ok().filter(|e| !e.is_empty());
        Ok(Self::new(api_key, email))
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}
