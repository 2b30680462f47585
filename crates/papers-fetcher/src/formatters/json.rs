//! JSON output formatting.

use serde_json::{Value, json};

use crate::error::ExportResult;
use crate::models::FilteredPaper;

/// Create a compact paper representation for JSON output.
///
/// Author and affiliation fields stay `"; "`-joined, exactly as in the CSV
/// output; an absent email is omitted.
#[must_use]
pub fn compact_paper(paper: &FilteredPaper) -> Value {
    let mut obj = json!({
        "pmid": paper.pubmed_id,
        "title": paper.title,
        "publicationDate": paper.publication_date,
        "nonAcademicAuthors": paper.non_academic_authors,
        "companyAffiliations": paper.company_affiliations,
    });

    if let Some(email) = &paper.corresponding_author_email {
        obj["correspondingAuthorEmail"] = json!(email);
    }

    obj
}

/// Render papers as a pretty-printed JSON array.
pub fn format_papers_json(papers: &[FilteredPaper]) -> ExportResult<String> {
    let values: Vec<Value> = papers.iter().map(compact_paper).collect();
    Ok(serde_json::to_string_pretty(&values)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_paper() {
        let paper = FilteredPaper {
            pubmed_id: "123".to_string(),
            title: "Test Paper".to_string(),
            publication_date: "2024-01-15".to_string(),
            non_academic_authors: "Jane Doe; John Roe".to_string(),
            company_affiliations: "Acme Inc".to_string(),
            corresponding_author_email: None,
        };

        let compact = compact_paper(&paper);

        assert_eq!(compact["pmid"], "123");
        assert_eq!(compact["nonAcademicAuthors"], "Jane Doe; John Roe");
        assert_eq!(compact["companyAffiliations"], "Acme Inc");
        assert!(compact.get("correspondingAuthorEmail").is_none());
    }

    #[test]
    fn test_affiliation_with_semicolon_stays_whole() {
        let paper = FilteredPaper {
            pubmed_id: "9".to_string(),
            title: "T".to_string(),
            publication_date: "N/A".to_string(),
            non_academic_authors: "Jane Doe".to_string(),
            company_affiliations: "Oncology R&D; Acme Pharma Inc, Basel".to_string(),
            corresponding_author_email: Some("jane@acme.com".to_string()),
        };

        let compact = compact_paper(&paper);

        assert_eq!(compact["companyAffiliations"], json!("Oncology R&D; Acme Pharma Inc, Basel"));
        assert_eq!(compact["correspondingAuthorEmail"], "jane@acme.com");
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_papers_json(&[]).unwrap(), "[]");
    }
}
