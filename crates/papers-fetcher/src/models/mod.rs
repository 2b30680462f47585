//! Data models for PubMed records and E-utilities responses.
//!
//! Records parsed from efetch XML are plain owned structs; the esearch
//! JSON response uses `#[serde(default)]` so missing fields decode as empty.

mod enums;
mod paper;
mod search;

pub use enums::ResponseFormat;
pub use paper::{Author, FilteredPaper, Paper};
pub use search::{ESearchResponse, ESearchResult};
