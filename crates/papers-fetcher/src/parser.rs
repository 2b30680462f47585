//! PubMed efetch XML parser.
//!
//! Streams the document with `quick-xml` and builds one [`Paper`] per
//! `PubmedArticle`. Lookups inside an article behave like descendant
//! searches: the first `PMID`, `ArticleTitle` and `PubDate` anywhere in the
//! article win, even when empty, and every `Author` at any depth is
//! collected. The whole document must be well-formed: one root element,
//! no text outside it, every element closed.
//!
//! Element text is the concatenation of all text and CDATA inside the
//! element (inline markup such as `<i>` contributes its text), unescaped and
//! trimmed. Empty text counts as absent.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, BytesText, Event};

use crate::error::{ParseError, ParseResult};
use crate::models::{Author, Paper};

/// Placeholder for a `Year`, `Month` or `Day` missing from `PubDate`.
pub const MISSING_DATE_PART: &str = "??";

/// Publication date used when an article has no `PubDate` at all.
pub const DATE_NOT_AVAILABLE: &str = "N/A";

/// Characters stripped from both ends of an extracted email token.
const EMAIL_TRIM: &[char] = &['.', ',', ';', '(', ')', '[', ']'];

/// Parse an efetch XML document into papers, in document order.
///
/// Empty or whitespace-only input yields no papers rather than an error, so
/// an empty efetch body reads as "nothing fetched". Articles without a PMID
/// or title are skipped; duplicates are kept.
///
/// # Errors
///
/// Returns [`ParseError`] if the document is not well-formed XML: text or a
/// second element outside the root, no root element, an unclosed element,
/// mismatched tags or an unknown entity.
pub fn parse_pubmed_xml(xml: &str) -> ParseResult<Vec<Paper>> {
    if xml.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = Reader::from_str(xml.trim_start_matches('\u{feff}'));
    let mut papers = Vec::new();
    let mut skipped = 0usize;
    let mut open: Vec<String> = Vec::new();
    let mut root_seen = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if open.is_empty() {
                    enter_root(&mut root_seen, &e)?;
                }
                if e.name().as_ref() == b"PubmedArticle" {
                    match parse_article(&mut reader)?.into_paper() {
                        Some(paper) => papers.push(paper),
                        None => skipped += 1,
                    }
                } else {
                    open.push(element_name(&e));
                }
            }
            Event::Empty(e) if open.is_empty() => enter_root(&mut root_seen, &e)?,
            Event::End(_) => {
                if open.pop().is_none() {
                    return Err(ParseError::outside_root("closing tag"));
                }
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                if open.is_empty() && !text.trim().is_empty() {
                    return Err(ParseError::outside_root(text.trim()));
                }
            }
            Event::CData(_) if open.is_empty() => {
                return Err(ParseError::outside_root("CDATA section"));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(element) = open.pop() {
        return Err(ParseError::unexpected_eof(element));
    }
    if !root_seen {
        return Err(ParseError::MissingRoot);
    }

    if skipped > 0 {
        tracing::debug!(skipped, "Dropped articles without PMID or title");
    }
    tracing::debug!(count = papers.len(), "Parsed PubMed articles");

    Ok(papers)
}

/// Record a top-level element, failing if the document already had a root.
fn enter_root(root_seen: &mut bool, start: &BytesStart<'_>) -> ParseResult<()> {
    if *root_seen {
        return Err(ParseError::outside_root(format!("<{}>", element_name(start))));
    }
    *root_seen = true;
    Ok(())
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

/// Extract the corresponding-author email from an affiliation string.
///
/// Takes the last whitespace-separated token containing `@` and strips
/// `.,;()[]` from both ends. Returns `None` when no token contains `@`.
#[must_use]
pub fn extract_email(affiliation: &str) -> Option<&str> {
    affiliation
        .split_whitespace()
        .rev()
        .find(|word| word.contains('@'))
        .map(|word| word.trim_matches(EMAIL_TRIM))
}

/// Fields collected for one `PubmedArticle` before validation.
///
/// `Some(None)` marks an element that was present but empty; later
/// elements of the same name do not replace it.
#[derive(Debug, Default)]
struct ArticleDraft {
    pmid: Option<Option<String>>,
    title: Option<Option<String>>,
    pub_date: Option<PubDate>,
    authors: Vec<DraftAuthor>,
}

#[derive(Debug)]
struct DraftAuthor {
    author: Author,
    validated: bool,
}

#[derive(Debug, Default)]
struct PubDate {
    year: Option<String>,
    month: Option<String>,
    day: Option<String>,
}

impl PubDate {
    fn format(&self) -> String {
        let part = |p: &Option<String>| p.clone().unwrap_or_else(|| MISSING_DATE_PART.to_string());
        format!("{}-{}-{}", part(&self.year), part(&self.month), part(&self.day))
    }
}

impl ArticleDraft {
    fn into_paper(self) -> Option<Paper> {
        let corresponding_author_email = self
            .authors
            .iter()
            .filter(|a| a.validated)
            .filter_map(|a| a.author.affiliation.as_deref())
            .find(|aff| aff.contains('@'))
            .and_then(extract_email)
            .map(str::to_string);

        let publication_date = self
            .pub_date
            .as_ref()
            .map_or_else(|| DATE_NOT_AVAILABLE.to_string(), PubDate::format);

        Some(Paper {
            pubmed_id: self.pmid.flatten()?,
            title: self.title.flatten()?,
            publication_date,
            authors: self.authors.into_iter().map(|a| a.author).collect(),
            corresponding_author_email,
        })
    }
}

/// Keep the first occurrence of an element, empty or not.
fn keep_first(slot: &mut Option<Option<String>>, value: Option<String>) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

fn parse_article(reader: &mut Reader<&[u8]>) -> ParseResult<ArticleDraft> {
    let mut draft = ArticleDraft::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"PMID" => {
                    let text = read_text(reader)?;
                    keep_first(&mut draft.pmid, text);
                }
                b"ArticleTitle" => {
                    let text = read_text(reader)?;
                    keep_first(&mut draft.title, text);
                }
                b"PubDate" => {
                    let date = parse_pub_date(reader)?;
                    draft.pub_date.get_or_insert(date);
                }
                b"Author" => {
                    let validated = is_validated(&e)?;
                    let author = parse_author(reader)?;
                    draft.authors.push(DraftAuthor { author, validated });
                }
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"PMID" => keep_first(&mut draft.pmid, None),
                b"ArticleTitle" => keep_first(&mut draft.title, None),
                b"PubDate" => {
                    draft.pub_date.get_or_insert_with(PubDate::default);
                }
                b"Author" => {
                    let validated = is_validated(&e)?;
                    draft.authors.push(DraftAuthor { author: Author::default(), validated });
                }
                _ => {}
            },
            Event::Text(t) => check_text(&t)?,
            Event::End(e) if e.name().as_ref() == b"PubmedArticle" => break,
            Event::Eof => return Err(ParseError::unexpected_eof("PubmedArticle")),
            _ => {}
        }
    }

    Ok(draft)
}

/// Read the direct `Year`, `Month` and `Day` children of a `PubDate`.
fn parse_pub_date(reader: &mut Reader<&[u8]>) -> ParseResult<PubDate> {
    let (mut year, mut month, mut day) = (None, None, None);
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) if depth == 0 => match e.name().as_ref() {
                b"Year" => keep_first(&mut year, read_text(reader)?),
                b"Month" => keep_first(&mut month, read_text(reader)?),
                b"Day" => keep_first(&mut day, read_text(reader)?),
                _ => depth += 1,
            },
            Event::Empty(e) if depth == 0 => match e.name().as_ref() {
                b"Year" => keep_first(&mut year, None),
                b"Month" => keep_first(&mut month, None),
                b"Day" => keep_first(&mut day, None),
                _ => {}
            },
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Text(t) => check_text(&t)?,
            Event::Eof => return Err(ParseError::unexpected_eof("PubDate")),
            _ => {}
        }
    }

    Ok(PubDate { year: year.flatten(), month: month.flatten(), day: day.flatten() })
}

/// Read one `Author`: name parts are direct children, the affiliation is
/// the first `AffiliationInfo/Affiliation` anywhere below it.
fn parse_author(reader: &mut Reader<&[u8]>) -> ParseResult<Author> {
    let (mut last_name, mut fore_name, mut initials) = (None, None, None);
    let mut affiliation = None;
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"LastName" if depth == 0 => keep_first(&mut last_name, read_text(reader)?),
                b"ForeName" if depth == 0 => keep_first(&mut fore_name, read_text(reader)?),
                b"Initials" if depth == 0 => keep_first(&mut initials, read_text(reader)?),
                b"AffiliationInfo" => {
                    let text = parse_affiliation_info(reader)?;
                    if let Some(text) = text {
                        keep_first(&mut affiliation, text);
                    }
                }
                _ => depth += 1,
            },
            Event::Empty(e) if depth == 0 => match e.name().as_ref() {
                b"LastName" => keep_first(&mut last_name, None),
                b"ForeName" => keep_first(&mut fore_name, None),
                b"Initials" => keep_first(&mut initials, None),
                _ => {}
            },
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Text(t) => check_text(&t)?,
            Event::Eof => return Err(ParseError::unexpected_eof("Author")),
            _ => {}
        }
    }

    Ok(Author {
        last_name: last_name.flatten(),
        fore_name: fore_name.flatten(),
        initials: initials.flatten(),
        affiliation: affiliation.flatten(),
    })
}

/// Text of the first direct `Affiliation` child of an `AffiliationInfo`.
///
/// `None` when there is no `Affiliation` child, `Some(None)` when the first
/// one is empty.
fn parse_affiliation_info(reader: &mut Reader<&[u8]>) -> ParseResult<Option<Option<String>>> {
    let mut affiliation = None;
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) if depth == 0 && e.name().as_ref() == b"Affiliation" => {
                let text = read_text(reader)?;
                keep_first(&mut affiliation, text);
            }
            Event::Empty(e) if depth == 0 && e.name().as_ref() == b"Affiliation" => {
                keep_first(&mut affiliation, None);
            }
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Text(t) => check_text(&t)?,
            Event::Eof => return Err(ParseError::unexpected_eof("AffiliationInfo")),
            _ => {}
        }
    }

    Ok(affiliation)
}

/// Collect the text content of the element just opened, up to its end tag.
fn read_text(reader: &mut Reader<&[u8]>) -> ParseResult<Option<String>> {
    let mut text = String::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(c) => text.push_str(std::str::from_utf8(&c)?),
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => return Err(ParseError::unexpected_eof("text element")),
            _ => {}
        }
    }

    let trimmed = text.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Reject text with unknown or malformed entity references.
fn check_text(text: &BytesText<'_>) -> ParseResult<()> {
    text.unescape()?;
    Ok(())
}

/// Whether an `Author` start tag carries `ValidYN="Y"`.
fn is_validated(start: &BytesStart<'_>) -> ParseResult<bool> {
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"ValidYN" {
            return Ok(attr.value.as_ref() == b"Y");
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(body: &str) -> String {
        format!("<PubmedArticleSet><PubmedArticle><MedlineCitation>{body}</MedlineCitation></PubmedArticle></PubmedArticleSet>")
    }

    #[test]
    fn test_extract_email_strips_punctuation() {
        assert_eq!(
            extract_email("Dept. X; contact: jane.doe@company.com."),
            Some("jane.doe@company.com")
        );
        assert_eq!(extract_email("(a@b.com);"), Some("a@b.com"));
        assert_eq!(extract_email("[x@y.org]"), Some("x@y.org"));
    }

    #[test]
    fn test_extract_email_takes_last_token() {
        assert_eq!(extract_email("first@a.com and second@b.com"), Some("second@b.com"));
        assert_eq!(extract_email("no email here"), None);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_pubmed_xml("").unwrap().is_empty());
        assert!(parse_pubmed_xml("   \n").unwrap().is_empty());
    }

    #[test]
    fn test_year_only_date() {
        let xml = article(
            "<PMID>1</PMID><Article><Journal><JournalIssue><PubDate><Year>2021</Year></PubDate>\
             </JournalIssue></Journal><ArticleTitle>T</ArticleTitle></Article>",
        );
        let papers = parse_pubmed_xml(&xml).unwrap();
        assert_eq!(papers[0].publication_date, "2021-??-??");
    }

    #[test]
    fn test_missing_pub_date() {
        let xml = article("<PMID>1</PMID><Article><ArticleTitle>T</ArticleTitle></Article>");
        let papers = parse_pubmed_xml(&xml).unwrap();
        assert_eq!(papers[0].publication_date, DATE_NOT_AVAILABLE);
    }

    #[test]
    fn test_text_with_inline_markup_and_entities() {
        let xml = article(
            "<PMID>1</PMID><Article><ArticleTitle>Role of <i>TP53</i> in R&amp;D</ArticleTitle></Article>",
        );
        let papers = parse_pubmed_xml(&xml).unwrap();
        assert_eq!(papers[0].title, "Role of TP53 in R&D");
    }

    #[test]
    fn test_empty_author_kept() {
        let xml = article(
            "<PMID>1</PMID><Article><ArticleTitle>T</ArticleTitle>\
             <AuthorList><Author ValidYN=\"Y\"/><Author><LastName>Doe</LastName></Author></AuthorList></Article>",
        );
        let papers = parse_pubmed_xml(&xml).unwrap();
        assert_eq!(papers[0].authors.len(), 2);
        assert_eq!(papers[0].authors[0], Author::default());
        assert_eq!(papers[0].authors[1].last_name.as_deref(), Some("Doe"));
    }

    #[test]
    fn test_empty_first_title_drops_article() {
        let xml = article(
            "<PMID>1</PMID><Article><ArticleTitle>  </ArticleTitle></Article>\
             <OtherAbstract><ArticleTitle>Later</ArticleTitle></OtherAbstract>",
        );
        assert!(parse_pubmed_xml(&xml).unwrap().is_empty());
    }

    #[test]
    fn test_empty_first_affiliation_wins() {
        let xml = article(
            "<PMID>1</PMID><Article><ArticleTitle>T</ArticleTitle><AuthorList><Author>\
             <AffiliationInfo><Affiliation/></AffiliationInfo>\
             <AffiliationInfo><Affiliation>Acme Inc</Affiliation></AffiliationInfo>\
             </Author></AuthorList></Article>",
        );
        let papers = parse_pubmed_xml(&xml).unwrap();
        assert_eq!(papers[0].authors[0].affiliation, None);
    }

    #[test]
    fn test_bom_is_ignored() {
        let xml = format!("\u{feff}{}", article("<PMID>1</PMID><ArticleTitle>T</ArticleTitle>"));
        assert_eq!(parse_pubmed_xml(&xml).unwrap().len(), 1);
    }

    #[test]
    fn test_mismatched_tags_fail() {
        let xml = "<PubmedArticleSet><PubmedArticle><PMID>1</PMID></PubmedArticleSet>";
        assert!(parse_pubmed_xml(xml).is_err());
    }

    #[test]
    fn test_unclosed_article_fails() {
        let xml = "<PubmedArticleSet><PubmedArticle><PMID>1</PMID>";
        assert!(matches!(
            parse_pubmed_xml(xml),
            Err(ParseError::UnexpectedEof { .. }) | Err(ParseError::Xml(_))
        ));
    }
}
