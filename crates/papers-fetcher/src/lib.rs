//! PubMed papers fetcher
//!
//! Finds PubMed papers with at least one author affiliated with a company
//! (pharma, biotech or other commercial organisation) and exports them as CSV,
//! Markdown or JSON.
//!
//! # Pipeline
//!
//! - **Search**: `esearch` turns a PubMed query into PMIDs
//! - **Fetch**: `efetch` returns the full records as XML
//! - **Parse**: [`parser::parse_pubmed_xml`] builds [`Paper`] records
//! - **Filter**: [`filter::filter_papers_by_affiliation`] applies
//!   [`classify::is_company_affiliation`] to each author
//!
//! # Example
//!
//! ```no_run
//! use papers_fetcher::{PubMedClient, config::Config, pipeline::fetch_company_papers};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = PubMedClient::new(config)?;
//!
//!     let outcome = fetch_company_papers(&client, "cancer immunotherapy", 20).await?;
//!     println!("{} matching papers", outcome.filtered().len());
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod formatters;
pub mod models;
pub mod parser;
pub mod pipeline;

pub use classify::is_company_affiliation;
pub use client::PubMedClient;
pub use config::Config;
pub use error::{AppError, ClientError, ExportError, ParseError};
pub use models::{Author, FilteredPaper, Paper};
pub use parser::parse_pubmed_xml;
