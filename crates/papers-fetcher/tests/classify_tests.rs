//! Affiliation classifier behavior tests.

use papers_fetcher::classify::{
    ACADEMIC_KEYWORDS, COMPANY_KEYWORDS, Verdict, classify, is_company_affiliation,
};

// =============================================================================
// Rule precedence
// =============================================================================

#[test]
fn test_academic_marker_beats_company_marker() {
    assert!(!is_company_affiliation(Some(
        "Dept. of Oncology, Stanford University; sponsored by Roche Pharmaceuticals"
    )));
    assert!(!is_company_affiliation(Some("Novartis Institutes for BioMedical Research")));
    assert!(!is_company_affiliation(Some("Genentech Foundation, South San Francisco")));
}

#[test]
fn test_company_marker_without_academic_marker() {
    assert!(is_company_affiliation(Some("Moderna Therapeutics, Cambridge, MA")));
    assert!(is_company_affiliation(Some("Bayer AG, Leverkusen, Germany")));
    assert!(is_company_affiliation(Some("GSK plc, Research Labs, Stevenage")));
}

#[test]
fn test_company_marker_beats_email_domain() {
    // "inc" decides before the .edu domain is looked at
    assert_eq!(classify(Some("Acme Inc. jdoe@mit.edu")), Verdict::Company("inc"));
}

#[test]
fn test_email_domain_fallback() {
    assert!(is_company_affiliation(Some("jdoe@biotechstartup.io")));
    assert!(!is_company_affiliation(Some("jdoe@mit.edu")));
    assert!(!is_company_affiliation(Some("contact: r.roe@fda.gov")));
    assert!(!is_company_affiliation(Some("Dept. of Physics, m.mole@cam.ac.uk")));
    assert!(is_company_affiliation(Some("Contact: p.poe@example.com")));
}

#[test]
fn test_degenerate_input() {
    assert!(!is_company_affiliation(None));
    assert!(!is_company_affiliation(Some("")));
    assert_eq!(classify(Some("")), Verdict::Empty);
}

#[test]
fn test_no_signal_is_not_company() {
    assert_eq!(classify(Some("Department of Surgery, Boston, MA")), Verdict::NoSignal);
    assert!(!is_company_affiliation(Some("Department of Surgery, Boston, MA")));
}

// =============================================================================
// Keyword tables
// =============================================================================

#[test]
fn test_every_academic_keyword_is_academic() {
    for keyword in ACADEMIC_KEYWORDS {
        let text = format!("Something {} Pharma Inc", keyword.to_uppercase());
        assert!(
            matches!(classify(Some(&text)), Verdict::Academic(_)),
            "expected academic for {text}"
        );
    }
}

#[test]
fn test_every_company_keyword_is_company() {
    for keyword in COMPANY_KEYWORDS {
        assert!(is_company_affiliation(Some(*keyword)), "expected company for {keyword}");
    }
}
