//! Aggregate scan statistics collection and display

use std::io::{self, Write};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::imports::{ImportKind, ImportRecord};

/// Collected statistics for one scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStats {
    /// Units scanned, including those that failed.
    pub files: usize,
    /// Units whose extraction failed.
    pub failed: usize,
    /// Total import records across all units.
    pub imports: usize,
    /// Class-like imports.
    pub classes: usize,
    /// `use function` imports.
    pub functions: usize,
    /// `use const` imports.
    pub constants: usize,
    /// Records carrying an `as` alias.
    pub aliased: usize,
}

/// Accumulates statistics as units are processed.
#[derive(Debug, Default)]
pub struct StatsCollector {
    stats: ScanStats,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successfully extracted unit.
    pub fn record_unit(&mut self, imports: &[ImportRecord]) {
        self.stats.files += 1;
        self.stats.imports += imports.len();
        for import in imports {
            match import.kind {
                ImportKind::Default => self.stats.classes += 1,
                ImportKind::Function => self.stats.functions += 1,
                ImportKind::Constant => self.stats.constants += 1,
            }
            if import.alias.is_some() {
                self.stats.aliased += 1;
            }
        }
    }

    /// Record a unit whose extraction failed.
    pub fn record_failure(&mut self) {
        self.stats.files += 1;
        self.stats.failed += 1;
    }

    /// Finalize and return the collected statistics.
    pub fn finalize(self) -> ScanStats {
        self.stats
    }
}

/// Print statistics to stdout with optional color.
pub fn print_stats(stats: &ScanStats, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color_choice);

    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    let mut label_color = ColorSpec::new();
    label_color.set_fg(Some(Color::Cyan));

    stdout.set_color(&bold)?;
    writeln!(stdout, "Import Statistics")?;
    stdout.reset()?;
    writeln!(stdout, "─────────────────")?;

    writeln!(stdout, "Files:      {}", stats.files)?;
    if stats.failed > 0 {
        writeln!(stdout, "Failed:     {}", stats.failed)?;
    }
    writeln!(stdout, "Imports:    {}", stats.imports)?;
    writeln!(stdout)?;

    let rows = [
        ("classes", stats.classes),
        ("functions", stats.functions),
        ("constants", stats.constants),
        ("aliased", stats.aliased),
    ];
    for (label, count) in rows {
        write!(stdout, "  ")?;
        stdout.set_color(&label_color)?;
        write!(stdout, "{:<11}", label)?;
        stdout.reset()?;
        writeln!(stdout, "{:>5}", count)?;
    }

    Ok(())
}

/// Print statistics as JSON.
pub fn print_stats_json(stats: &ScanStats) -> io::Result<()> {
    let json =
        serde_json::to_string_pretty(stats).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imports::extract_imports;

    #[test]
    fn test_stats_collector_counts_kinds() {
        let imports = extract_imports(
            "use A\\B;\nuse function C\\d as e;\nuse const F, G;",
        )
        .unwrap();

        let mut collector = StatsCollector::new();
        collector.record_unit(&imports);
        let stats = collector.finalize();

        assert_eq!(stats.files, 1);
        assert_eq!(stats.imports, 4);
        assert_eq!(stats.classes, 1);
        assert_eq!(stats.functions, 1);
        assert_eq!(stats.constants, 2);
        assert_eq!(stats.aliased, 1);
        assert_eq!(stats.failed, 0);
    }

    #[test]
    fn test_stats_collector_counts_failures() {
        let mut collector = StatsCollector::new();
        collector.record_unit(&[]);
        collector.record_failure();
        let stats = collector.finalize();

        assert_eq!(stats.files, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.imports, 0);
    }
}
