//! CSV export of filtered papers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::ExportResult;
use crate::models::FilteredPaper;

/// Write papers as CSV: a header row, then one row per paper.
///
/// Quoting follows RFC 4180; an absent email is an empty field.
pub fn write_csv<W: Write>(writer: W, papers: &[FilteredPaper]) -> ExportResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if papers.is_empty() {
        // serde only emits headers alongside the first record
        csv_writer.write_record(FilteredPaper::FIELDS)?;
    }
    for paper in papers {
        csv_writer.serialize(paper)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Render papers as a CSV string.
pub fn format_papers_csv(papers: &[FilteredPaper]) -> ExportResult<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, papers)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Create (or truncate) `path` and write papers to it as CSV.
pub fn save_csv(path: impl AsRef<Path>, papers: &[FilteredPaper]) -> ExportResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), papers)?;
    tracing::info!(path = %path.display(), rows = papers.len(), "Saved CSV");
    Ok(())
}
