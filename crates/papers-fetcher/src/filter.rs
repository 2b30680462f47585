//! Keep papers with company-affiliated authors and project them to output records.

use std::collections::BTreeSet;

use crate::classify::is_company_affiliation;
use crate::models::{FilteredPaper, Paper};

/// Separator used when joining author names and affiliations.
pub const JOIN_SEPARATOR: &str = "; ";

/// Filter papers down to those with at least one company-affiliated author.
///
/// Author names keep author order; affiliations are deduplicated and sorted.
/// Papers without a match are dropped. The result depends only on the input,
/// so filtering the same papers twice yields equal output.
#[must_use]
pub fn filter_papers_by_affiliation(papers: &[Paper]) -> Vec<FilteredPaper> {
    papers.iter().filter_map(filter_paper).collect()
}

/// Project a single paper, or `None` if no author is company-affiliated.
#[must_use]
pub fn filter_paper(paper: &Paper) -> Option<FilteredPaper> {
    let mut names = Vec::new();
    let mut affiliations = BTreeSet::new();

    for (author, affiliation) in paper.affiliated_authors() {
        if !is_company_affiliation(Some(affiliation)) {
            continue;
        }

        let name = author.display_name();
        tracing::debug!(
            pubmed_id = %paper.pubmed_id,
            author = %name,
            affiliation,
            "Company affiliation matched"
        );
        names.push(name);
        affiliations.insert(affiliation);
    }

    if names.is_empty() {
        return None;
    }

    Some(FilteredPaper {
        pubmed_id: paper.pubmed_id.clone(),
        title: paper.title.clone(),
        publication_date: paper.publication_date.clone(),
        non_academic_authors: names.join(JOIN_SEPARATOR),
        company_affiliations: affiliations.into_iter().collect::<Vec<_>>().join(JOIN_SEPARATOR),
        corresponding_author_email: paper.corresponding_author_email.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;

    fn author(fore: &str, last: &str, affiliation: Option<&str>) -> Author {
        Author {
            last_name: Some(last.to_string()),
            fore_name: Some(fore.to_string()),
            initials: None,
            affiliation: affiliation.map(str::to_string),
        }
    }

    fn paper(id: &str, authors: Vec<Author>) -> Paper {
        Paper {
            pubmed_id: id.to_string(),
            title: format!("Paper {id}"),
            publication_date: "2024-Jan-05".to_string(),
            authors,
            corresponding_author_email: Some("lead@acme.com".to_string()),
        }
    }

    #[test]
    fn test_drops_academic_only_papers() {
        let papers = vec![paper("1", vec![author("A", "B", Some("Harvard University"))])];
        assert!(filter_papers_by_affiliation(&papers).is_empty());
    }

    #[test]
    fn test_keeps_order_and_sorts_affiliations() {
        let papers = vec![paper(
            "1",
            vec![
                author("Zoe", "Zed", Some("Zeta Pharma, Basel")),
                author("Ann", "Ash", Some("Harvard University")),
                author("Bob", "Bee", Some("Alpha Biotech Inc")),
                author("Cy", "Cee", Some("Zeta Pharma, Basel")),
                author("No", "Aff", None),
            ],
        )];

        let filtered = filter_papers_by_affiliation(&papers);
        assert_eq!(filtered.len(), 1);
        let out = &filtered[0];
        assert_eq!(out.non_academic_authors, "Zoe Zed; Bob Bee; Cy Cee");
        assert_eq!(out.company_affiliations, "Alpha Biotech Inc; Zeta Pharma, Basel");
        assert_eq!(out.corresponding_author_email.as_deref(), Some("lead@acme.com"));
        assert_eq!(out.publication_date, "2024-Jan-05");
    }

    #[test]
    fn test_idempotent() {
        let papers = vec![
            paper("1", vec![author("A", "B", Some("Acme Therapeutics"))]),
            paper("2", vec![author("C", "D", Some("Oxford University"))]),
        ];
        assert_eq!(filter_papers_by_affiliation(&papers), filter_papers_by_affiliation(&papers));
    }
}
