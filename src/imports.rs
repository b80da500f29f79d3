//! Use-declaration extraction from PHP source text
//!
//! Extracts `use` declarations from a compilation unit to provide a flat
//! view of every name the unit brings into scope: plain, grouped, and
//! aliased forms, with `function` and `const` imports distinguished.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::ExtractError;
use crate::file_utils::read_source_file;
use crate::parser::parse_imports;
use crate::scanner::scan;

/// Symbol category a use declaration binds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    /// Class-like import: class, interface, trait, or enum.
    #[default]
    Default,
    /// `use function ...`
    Function,
    /// `use const ...`
    Constant,
}

impl ImportKind {
    /// Source-level qualifier for this kind, empty for class-like imports.
    pub fn qualifier(&self) -> &'static str {
        match self {
            ImportKind::Default => "",
            ImportKind::Function => "function",
            ImportKind::Constant => "const",
        }
    }
}

/// One name brought into scope by a use declaration.
///
/// A grouped or comma-separated declaration expands to one record per item,
/// in source order. Records are plain data; nothing is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRecord {
    /// Namespace path segments, in order. Never empty.
    pub path: Vec<String>,
    /// Local alias from an `as` clause, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// What category of symbol the name refers to.
    pub kind: ImportKind,
}

impl ImportRecord {
    /// Fully qualified name with `\` separators.
    pub fn qualified_name(&self) -> String {
        self.path.join("\\")
    }

    /// The name the import binds locally: the alias if present, else the
    /// last path segment.
    pub fn local_name(&self) -> &str {
        match &self.alias {
            Some(alias) => alias,
            None => self.path.last().map(String::as_str).unwrap_or(""),
        }
    }
}

impl fmt::Display for ImportRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qualifier = self.kind.qualifier();
        if !qualifier.is_empty() {
            write!(f, "{} ", qualifier)?;
        }
        write!(f, "{}", self.qualified_name())?;
        if let Some(alias) = &self.alias {
            write!(f, " as {}", alias)?;
        }
        Ok(())
    }
}

/// Extract every use declaration from one compilation unit.
///
/// A pure function of the input text: the same source always yields the
/// same record sequence, in declaration order then within-group
/// left-to-right order. A malformed statement fails the whole unit, so a
/// caller can distinguish "zero imports" from "parse failure".
pub fn extract_imports(source: &str) -> Result<Vec<ImportRecord>, ExtractError> {
    let tokens = scan(source);
    parse_imports(&tokens)
}

/// Extract imports from a file on disk.
///
/// Reads through [`read_source_file`], so the configured size limit and
/// encoding checks apply. Returns `Ok(None)` for files skipped because they
/// exceed the size limit.
pub fn extract_imports_from_file(path: &Path) -> Result<Option<Vec<ImportRecord>>, ExtractError> {
    match read_source_file(path)? {
        Some(content) => extract_imports(&content).map(Some),
        None => Ok(None),
    }
}
