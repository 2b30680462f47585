//! ESearch JSON response model.

use serde::{Deserialize, Serialize};

/// Top-level `esearch.fcgi?retmode=json` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ESearchResponse {
    /// Search result block.
    #[serde(default)]
    pub esearchresult: ESearchResult,
}

/// The `esearchresult` block of an ESearch response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ESearchResult {
    /// Total number of matching records (as a decimal string).
    #[serde(default)]
    pub count: Option<String>,

    /// Matching PMIDs, best match first.
    #[serde(default)]
    pub idlist: Vec<String>,

    /// Query as translated by PubMed.
    #[serde(default)]
    pub querytranslation: Option<String>,

    /// Error reported for an invalid query (returned with HTTP 200).
    #[serde(default, rename = "ERROR")]
    pub error: Option<String>,
}

impl ESearchResult {
    /// Total matching records, if reported and numeric.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.count.as_deref()?.parse().ok()
    }
}
