//! Usescan - extract PHP use declarations from source trees

pub mod error;
pub mod file_utils;
pub mod imports;
pub mod output;
pub mod parser;
pub mod scanner;
pub mod stats;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::ExtractError;
pub use imports::{ImportKind, ImportRecord, extract_imports, extract_imports_from_file};
pub use output::{FileReport, print_json, print_reports};
pub use stats::{ScanStats, StatsCollector, print_stats, print_stats_json};
