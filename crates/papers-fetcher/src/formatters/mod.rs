//! Output formatters for CSV files, Markdown and JSON.

mod csv_file;
mod json;
mod markdown;

pub use self::csv_file::*;
pub use self::json::*;
pub use markdown::*;
