//! Markdown output formatting for the console.

use crate::models::FilteredPaper;

/// Format a list of filtered papers as Markdown.
#[must_use]
pub fn format_papers_markdown(papers: &[FilteredPaper]) -> String {
    if papers.is_empty() {
        return "No matching papers found.".to_string();
    }

    let mut output = format!("# Papers ({} results)\n\n", papers.len());

    for (i, paper) in papers.iter().enumerate() {
        output.push_str(&format_paper_markdown(paper, i + 1));
        output.push_str("\n---\n\n");
    }

    output
}

/// Format a single filtered paper as Markdown.
#[must_use]
pub fn format_paper_markdown(paper: &FilteredPaper, index: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("## {}. {}\n\n", index, paper.title));

    output.push_str(&format!(
        "**PMID**: [{id}](https://pubmed.ncbi.nlm.nih.gov/{id}/) | **Published**: {}\n\n",
        paper.publication_date,
        id = paper.pubmed_id
    ));

    output.push_str(&format!("**Company authors**: {}\n\n", paper.non_academic_authors));

    output.push_str(&format!("**Company affiliations**: {}\n", paper.company_affiliations));

    if let Some(email) = &paper.corresponding_author_email {
        output.push_str(&format!("\n**Contact**: {email}\n"));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(affiliations: &str, email: Option<&str>) -> FilteredPaper {
        FilteredPaper {
            pubmed_id: "38000001".to_string(),
            title: "Kinase inhibitors".to_string(),
            publication_date: "2024-Jan-??".to_string(),
            non_academic_authors: "Jane Doe".to_string(),
            company_affiliations: affiliations.to_string(),
            corresponding_author_email: email.map(str::to_string),
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(format_papers_markdown(&[]), "No matching papers found.");
    }

    #[test]
    fn test_single_affiliation_with_email() {
        let out = format_papers_markdown(&[paper("Acme Pharma", Some("jane@acme.com"))]);
        assert!(out.starts_with("# Papers (1 results)"));
        assert!(out.contains("## 1. Kinase inhibitors"));
        assert!(out.contains("https://pubmed.ncbi.nlm.nih.gov/38000001/"));
        assert!(out.contains("**Company affiliations**: Acme Pharma\n"));
        assert!(out.contains("**Contact**: jane@acme.com"));
    }

    #[test]
    fn test_affiliations_rendered_as_joined() {
        let out = format_paper_markdown(&paper("Oncology R&D; Acme Pharma Inc, Basel", None), 3);
        assert!(out.contains("## 3. Kinase inhibitors"));
        assert!(out.contains("**Company affiliations**: Oncology R&D; Acme Pharma Inc, Basel\n"));
        assert!(!out.contains("\n- "));
        assert!(!out.contains("Contact"));
    }
}
