//! Error types for the PubMed papers fetcher.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! Network, parsing and export failures stay separate so the CLI can report them distinctly.

use std::time::Duration;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by NCBI E-utilities (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response, or rejected before sending)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }
}

/// Errors from parsing an efetch XML document.
///
/// Only syntactic problems are reported. Articles with a missing PMID or
/// title are dropped by the parser rather than surfaced here.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    /// Malformed XML (mismatched tags, bad entity, invalid syntax)
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute on an element
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// CDATA section that is not valid UTF-8
    #[error("Invalid UTF-8 in XML text: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// Document ended inside an open element
    #[error("Unexpected end of document inside <{element}>")]
    UnexpectedEof {
        /// Element that was still open
        element: String,
    },

    /// Document has no root element
    #[error("Document has no root element")]
    MissingRoot,

    /// Text or a second element outside the root element
    #[error("Unexpected content outside the root element: {content}")]
    OutsideRoot {
        /// Offending content, truncated
        content: String,
    },
}

impl ParseError {
    /// Create an unexpected end-of-document error.
    #[must_use]
    pub fn unexpected_eof(element: impl Into<String>) -> Self {
        Self::UnexpectedEof { element: element.into() }
    }

    /// Create an outside-root error, keeping the first 80 characters.
    #[must_use]
    pub fn outside_root(content: impl Into<String>) -> Self {
        let content: String = content.into();
        Self::OutsideRoot { content: content.chars().take(80).collect() }
    }
}

/// Errors from writing results (CSV file, JSON rendering).
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// File could not be created or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level error for a fetch-filter-export run.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Error from the API client
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    /// The efetch payload could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Results could not be written
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

impl AppError {
    /// Convert to a short user-facing error message.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Client(ClientError::RateLimited { retry_after }) => {
                format!(
                    "Rate limited by NCBI E-utilities. Please wait {:?} before retrying.",
                    retry_after
                )
            }
            Self::Client(ClientError::Timeout(after)) => {
                format!("PubMed did not respond within {after:?}. Please try again.")
            }
            Self::Client(ClientError::BadRequest { message }) => {
                format!("PubMed rejected the request: {message}")
            }
            Self::Client(err) => format!("Failed to reach PubMed: {err}"),
            Self::Parse(err) => format!("Failed to parse paper details: {err}"),
            Self::Export(ExportError::Io(err)) => format!("Error writing results: {err}"),
            Self::Export(err) => format!("Error exporting results: {err}"),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
