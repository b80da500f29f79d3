//! Report formatting and display

use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::imports::ImportRecord;

/// Extraction results for one compilation unit.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path of the unit, as discovered.
    pub path: PathBuf,
    /// Records in declaration order.
    pub imports: Vec<ImportRecord>,
}

impl FileReport {
    pub fn new(path: PathBuf, imports: Vec<ImportRecord>) -> Self {
        Self { path, imports }
    }
}

/// Print reports as pretty-printed JSON to stdout.
///
/// Units without imports are included, so consumers can tell "scanned, zero
/// imports" from "not scanned".
pub fn print_json(reports: &[FileReport]) -> io::Result<()> {
    let json =
        serde_json::to_string_pretty(reports).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}

/// Print reports as indented text to stdout, one block per unit with
/// imports, followed by a summary line.
pub fn print_reports(reports: &[FileReport], use_color: bool) -> io::Result<()> {
    let choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    let mut qualifier_color = ColorSpec::new();
    qualifier_color.set_fg(Some(Color::Cyan));
    let mut alias_color = ColorSpec::new();
    alias_color.set_fg(Some(Color::Green));

    let mut files_with_imports = 0;
    let mut total_imports = 0;

    for report in reports {
        if report.imports.is_empty() {
            continue;
        }
        files_with_imports += 1;
        total_imports += report.imports.len();

        stdout.set_color(&bold)?;
        writeln!(stdout, "{}", report.path.display())?;
        stdout.reset()?;

        for import in &report.imports {
            write!(stdout, "  ")?;
            let qualifier = import.kind.qualifier();
            if !qualifier.is_empty() {
                stdout.set_color(&qualifier_color)?;
                write!(stdout, "{} ", qualifier)?;
                stdout.reset()?;
            }
            write!(stdout, "{}", import.qualified_name())?;
            if let Some(alias) = &import.alias {
                write!(stdout, " as ")?;
                stdout.set_color(&alias_color)?;
                write!(stdout, "{}", alias)?;
                stdout.reset()?;
            }
            writeln!(stdout)?;
        }
    }

    writeln!(stdout)?;
    writeln!(
        stdout,
        "{} files, {} imports",
        files_with_imports, total_imports
    )?;
    Ok(())
}
