//! Affiliation classifier: does an affiliation string name a company?
//!
//! Rules are applied in order, first match wins:
//!
//! 1. empty or absent text is not a company;
//! 2. any academic marker means academic, even when a company marker is present;
//! 3. any company marker means company;
//! 4. an email domain decides: `.edu`, `.gov` and `.ac.` are academic, anything else is a company;
//! 5. otherwise not a company.
//!
//! Markers are matched as plain substrings of the lower-cased text, so short
//! markers such as `ag` also hit inside longer words. Misclassification of
//! that kind is accepted.

/// Markers of academic or non-profit institutions. Checked first.
pub const ACADEMIC_KEYWORDS: &[&str] = &[
    "university",
    "college",
    "institute",
    "hospital",
    "school of medicine",
    "research center",
    "foundation",
    "nhs",
    "nih",
    "medical center",
];

/// Markers of commercial entities.
pub const COMPANY_KEYWORDS: &[&str] = &[
    "inc",
    "ltd",
    "llc",
    "corp",
    "pharmaceuticals",
    "pharma",
    "biotech",
    "therapeutics",
    "diagnostics",
    "labs",
    "group",
    "solutions",
    "ag",
    "gmbh",
];

/// Email domain fragments of academic and government senders.
pub const ACADEMIC_DOMAINS: &[&str] = &[".edu", ".gov", ".ac."];

/// Which rule decided a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No text to classify.
    Empty,
    /// An academic marker matched.
    Academic(&'static str),
    /// A company marker matched.
    Company(&'static str),
    /// The email domain looks academic or governmental.
    AcademicDomain,
    /// The email domain is not academic.
    CompanyDomain,
    /// Nothing matched.
    NoSignal,
}

impl Verdict {
    /// Whether this verdict counts as a company affiliation.
    #[must_use]
    pub const fn is_company(self) -> bool {
        matches!(self, Self::Company(_) | Self::CompanyDomain)
    }
}

/// Classify an affiliation and report which rule decided.
#[must_use]
pub fn classify(affiliation: Option<&str>) -> Verdict {
    let Some(text) = affiliation.filter(|s| !s.is_empty()) else {
        return Verdict::Empty;
    };

    let lower = text.to_lowercase();

    if let Some(keyword) = ACADEMIC_KEYWORDS.iter().copied().find(|k| lower.contains(k)) {
        return Verdict::Academic(keyword);
    }

    if let Some(keyword) = COMPANY_KEYWORDS.iter().copied().find(|k| lower.contains(k)) {
        return Verdict::Company(keyword);
    }

    if let Some((_, domain)) = lower.rsplit_once('@') {
        if ACADEMIC_DOMAINS.iter().any(|d| domain.contains(d)) {
            return Verdict::AcademicDomain;
        }
        return Verdict::CompanyDomain;
    }

    Verdict::NoSignal
}

/// Returns true when the affiliation likely names a company. Never fails.
#[must_use]
pub fn is_company_affiliation(affiliation: Option<&str>) -> bool {
    classify(affiliation).is_company()
}
