//! Error taxonomy for extraction failures

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while extracting imports from a compilation unit.
///
/// Extraction is all-or-nothing per unit: a malformed statement fails the
/// whole unit, so callers can distinguish "zero imports" from "parse failure".
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Malformed use statement. Carries the 1-based index of the offending
    /// statement within the unit and the line the parser stopped at.
    #[error("syntax error in use statement #{statement} (line {line}): {message}")]
    Syntax {
        statement: usize,
        line: usize,
        message: String,
    },

    /// The unit is not valid UTF-8. Surfaced, never recovered.
    #[error("{path}: source is not valid UTF-8")]
    Encoding { path: PathBuf },

    /// The unit could not be read from disk.
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExtractError {
    pub(crate) fn syntax(statement: usize, line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            statement,
            line,
            message: message.into(),
        }
    }
}
