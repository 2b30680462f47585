//! Enumeration types for CLI parameters.

/// Console rendering for results that are not written to a CSV file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ResponseFormat {
    /// Human-readable Markdown listing.
    #[default]
    Markdown,
    /// Machine-readable JSON array.
    Json,
}
