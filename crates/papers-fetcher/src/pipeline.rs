//! Search, fetch, parse and filter in one pass.

use crate::client::PubMedClient;
use crate::error::AppError;
use crate::filter::filter_papers_by_affiliation;
use crate::models::FilteredPaper;
use crate::parser::parse_pubmed_xml;

/// Result of a fetch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The search matched no PubMed records.
    NoResults,
    /// Records were fetched; `filtered` may still be empty.
    Papers {
        /// Papers parsed from the efetch payload.
        total_parsed: usize,
        /// Papers with at least one company-affiliated author.
        filtered: Vec<FilteredPaper>,
    },
}

impl PipelineOutcome {
    /// Filtered papers, empty for [`PipelineOutcome::NoResults`].
    #[must_use]
    pub fn filtered(&self) -> &[FilteredPaper] {
        match self {
            Self::NoResults => &[],
            Self::Papers { filtered, .. } => filtered,
        }
    }
}

/// Find papers matching `query` that have company-affiliated authors.
///
/// # Errors
///
/// Returns [`AppError::Client`] on network/API failure and
/// [`AppError::Parse`] if the efetch payload is not well-formed XML.
pub async fn fetch_company_papers(
    client: &PubMedClient,
    query: &str,
    max_results: u32,
) -> Result<PipelineOutcome, AppError> {
    tracing::info!(query, "Searching PubMed");
    let pmids = client.search_pubmed(query, max_results).await?;

    if pmids.is_empty() {
        tracing::info!("Search returned no PubMed IDs");
        return Ok(PipelineOutcome::NoResults);
    }
    tracing::debug!(count = pmids.len(), ids = ?pmids, "Found paper IDs");

    tracing::info!(count = pmids.len(), "Fetching paper details");
    let xml = client.fetch_paper_details(&pmids).await?;

    tracing::info!("Parsing and filtering papers");
    let papers = parse_pubmed_xml(&xml)?;
    let filtered = filter_papers_by_affiliation(&papers);

    tracing::info!(
        parsed = papers.len(),
        matched = filtered.len(),
        "Filtered papers by affiliation"
    );

    Ok(PipelineOutcome::Papers { total_parsed: papers.len(), filtered })
}
