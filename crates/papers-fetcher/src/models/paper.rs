//! Paper and author records built from PubMed efetch XML.

use serde::{Deserialize, Serialize};

/// An author entry of a PubMed article.
///
/// Every field is independently optional; an `<Author/>` with no data still
/// yields an `Author`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Family name (`LastName`).
    pub last_name: Option<String>,

    /// Given name (`ForeName`).
    pub fore_name: Option<String>,

    /// Initials (`Initials`).
    pub initials: Option<String>,

    /// First affiliation text (`AffiliationInfo/Affiliation`).
    pub affiliation: Option<String>,
}

impl Author {
    /// Display name as "ForeName LastName", absent parts left out.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.fore_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }
}

/// A PubMed article with a PMID and a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    /// PubMed identifier.
    pub pubmed_id: String,

    /// Article title.
    pub title: String,

    /// `YYYY-MM-DD` from the literal `PubDate` parts, with placeholders.
    pub publication_date: String,

    /// Authors in document order.
    pub authors: Vec<Author>,

    /// Email found in a validated author's affiliation.
    pub corresponding_author_email: Option<String>,
}

impl Paper {
    /// Authors that have affiliation text.
    pub fn affiliated_authors(&self) -> impl Iterator<Item = (&Author, &str)> {
        self.authors
            .iter()
            .filter_map(|a| a.affiliation.as_deref().map(|aff| (a, aff)))
    }
}

/// Output record for a paper with at least one company-affiliated author.
///
/// Field names double as the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredPaper {
    /// PubMed identifier.
    pub pubmed_id: String,

    /// Article title.
    pub title: String,

    /// Publication date as carried over from [`Paper`].
    pub publication_date: String,

    /// Company-affiliated author names in author order, `"; "`-joined.
    pub non_academic_authors: String,

    /// Distinct company affiliations, sorted, `"; "`-joined.
    pub company_affiliations: String,

    /// Corresponding-author email, if one was found.
    pub corresponding_author_email: Option<String>,
}

impl FilteredPaper {
    /// CSV / JSON column names in output order.
    pub const FIELDS: [&'static str; 6] = [
        "pubmed_id",
        "title",
        "publication_date",
        "non_academic_authors",
        "company_affiliations",
        "corresponding_author_email",
    ];
}
