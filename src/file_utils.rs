//! Source file reading for extraction
//!
//! Common file I/O for the CLI and the file-level extraction entry point:
//! size-limited reads, BOM stripping, and encoding failures surfaced as
//! errors rather than silently skipped.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ExtractError;

/// Default maximum file size for extraction (1MB).
/// Larger files are skipped to prevent excessive memory usage.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_000_000;

/// Global configurable max file size. Set via `set_max_file_size()`.
static MAX_FILE_SIZE: AtomicU64 = AtomicU64::new(DEFAULT_MAX_FILE_SIZE);

/// Set the maximum file size for extraction.
/// Affects all subsequent calls to `read_source_file`.
pub fn set_max_file_size(size: u64) {
    MAX_FILE_SIZE.store(size, Ordering::SeqCst);
}

/// Get the current maximum file size setting.
pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE.load(Ordering::SeqCst)
}

/// Whether the path looks like a PHP compilation unit.
pub fn is_php_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("php"))
}

/// Read a source file as UTF-8 text.
///
/// Returns `Ok(None)` if the file exceeds the configured size limit.
/// A leading UTF-8 BOM is stripped. Invalid encoding surfaces as
/// [`ExtractError::Encoding`]; any other read failure as
/// [`ExtractError::Io`].
pub fn read_source_file(path: &Path) -> Result<Option<String>, ExtractError> {
    let metadata = path.metadata().map_err(|e| ExtractError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    if metadata.len() > get_max_file_size() {
        return Ok(None);
    }

    let bytes = std::fs::read(path).map_err(|e| ExtractError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let content = String::from_utf8(bytes).map_err(|_| ExtractError::Encoding {
        path: path.to_path_buf(),
    })?;

    match content.strip_prefix('\u{FEFF}') {
        Some(stripped) => Ok(Some(stripped.to_string())),
        None => Ok(Some(content)),
    }
}
