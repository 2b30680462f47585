//! NCBI E-utilities client for PubMed.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff
//! - A fixed delay before each request to stay under the NCBI rate limit

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::ESearchResponse;

/// PubMed E-utilities client.
#[derive(Clone)]
pub struct PubMedClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// API key (optional).
    api_key: Option<String>,

    /// Contact email (optional).
    email: Option<String>,

    /// Tool name reported to NCBI.
    tool: String,

    /// E-utilities base URL.
    eutils_url: String,

    /// Request timeout, reported on timeouts.
    request_timeout: Duration,

    /// Rate limit delay.
    rate_limit_delay: Duration,
}

impl PubMedClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            api_key: config.api_key,
            email: config.email,
            tool: config.tool,
            eutils_url: config.eutils_url,
            request_timeout: config.request_timeout,
            rate_limit_delay: config.rate_limit_delay,
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search PubMed and return matching PMIDs, best match first.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::BadRequest`] for an empty query or a query
    /// PubMed reports as invalid, and other variants on API failure.
    pub async fn search_pubmed(&self, query: &str, max_results: u32) -> ClientResult<Vec<String>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ClientError::bad_request("search query cannot be empty"));
        }

        let url = format!("{}/esearch.fcgi", self.eutils_url);
        let mut params = vec![
            ("db".to_string(), api::DATABASE.to_string()),
            ("term".to_string(), query.to_string()),
            ("retmax".to_string(), max_results.to_string()),
            ("retmode".to_string(), "json".to_string()),
            ("usehistory".to_string(), "y".to_string()),
        ];
        self.push_credentials(&mut params);

        tracing::debug!(query, max_results, "Searching PubMed");
        let body = self.get_text(&url, &params).await?;
        let response: ESearchResponse = serde_json::from_str(&body)?;
        let result = response.esearchresult;

        if let Some(message) = result.error {
            return Err(ClientError::bad_request(message));
        }

        tracing::debug!(
            total = ?result.total(),
            returned = result.idlist.len(),
            translation = result.querytranslation.as_deref().unwrap_or_default(),
            "PubMed search finished"
        );

        Ok(result.idlist)
    }

    /// Fetch full article records for the given PMIDs as efetch XML.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::BadRequest`] for an empty ID list, and other
    /// variants on API failure.
    pub async fn fetch_paper_details(&self, pmids: &[String]) -> ClientResult<String> {
        if pmids.is_empty() {
            return Err(ClientError::bad_request("no PubMed IDs to fetch"));
        }

        let url = format!("{}/efetch.fcgi", self.eutils_url);
        let mut params = vec![
            ("db".to_string(), api::DATABASE.to_string()),
            ("id".to_string(), pmids.join(",")),
            ("retmode".to_string(), "xml".to_string()),
        ];
        self.push_credentials(&mut params);

        tracing::debug!(count = pmids.len(), "Fetching PubMed records");
        self.get_text(&url, &params).await
    }

    /// Append `api_key`, `tool` and `email` parameters.
    fn push_credentials(&self, params: &mut Vec<(String, String)>) {
        if let Some(key) = &self.api_key {
            params.push(("api_key".to_string(), key.clone()));
        }
        params.push(("tool".to_string(), self.tool.clone()));
        if let Some(email) = &self.email {
            params.push(("email".to_string(), email.clone()));
        }
    }

    /// Make a GET request and return the response body.
    async fn get_text(&self, url: &str, params: &[(String, String)]) -> ClientResult<String> {
        // Rate limit
        tokio::time::sleep(self.rate_limit_delay).await;

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let response = self.handle_response(response).await?;
        response.text().await.map_err(ClientError::from)
    }

    /// Map a send failure, singling out timeouts.
    fn map_send_error(&self, err: reqwest_middleware::Error) -> ClientError {
        if is_timeout(&err) {
            ClientError::Timeout(self.request_timeout)
        } else {
            ClientError::from(err)
        }
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        tracing::warn!(
            status = status.as_u16(),
            path = response.url().path(),
            "E-utilities request failed"
        );

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(api::DEFAULT_RETRY_AFTER_SECS);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

/// Whether a send failure was a timeout, including one wrapped by the retry middleware.
fn is_timeout(err: &reqwest_middleware::Error) -> bool {
    match err {
        reqwest_middleware::Error::Reqwest(e) => e.is_timeout(),
        reqwest_middleware::Error::Middleware(e) => e.chain().any(|cause| {
            cause.downcast_ref::<reqwest::Error>().is_some_and(reqwest::Error::is_timeout)
                || matches!(
                    cause.downcast_ref::<reqwest_middleware::Error>(),
                    Some(reqwest_middleware::Error::Reqwest(inner)) if inner.is_timeout()
                )
        }),
    }
}

impl std::fmt::Debug for PubMedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PubMedClient")
            .field("eutils_url", &self.eutils_url)
            .field("has_api_key", &self.has_api_key())
            .finish()
    }
}
