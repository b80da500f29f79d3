//! CLI entry point for usescan

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use usescan::{
    ExtractError, FileReport, ImportRecord, StatsCollector, extract_imports_from_file, file_utils,
    print_json, print_reports, print_stats, print_stats_json,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            // Respect FORCE_COLOR environment variable
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            // Respect TERM=dumb
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Check if stdout is a TTY
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "usescan")]
#[command(about = "Extract PHP use declarations from source trees")]
#[command(version)]
struct Args {
    /// Files or directories to scan
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Scan all files (ignore .gitignore filtering and hidden files)
    #[arg(short, long)]
    all: bool,

    /// Ignore files matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Show aggregate statistics instead of per-file imports
    #[arg(long = "stats")]
    stats: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Number of parallel workers for extraction
    /// (0 = auto-detect, 1 = sequential, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    jobs: usize,

    /// Maximum file size for extraction (default: 1MB)
    /// Files larger than this are skipped. Use suffixes: K, M, G (e.g., 5M for 5MB)
    #[arg(long = "max-file-size", value_name = "SIZE")]
    max_file_size: Option<String>,
}

/// Parse a file size string like "5M", "100K", "1G" into bytes.
/// Supports suffixes: K/KB (1024), M/MB (1024^2), G/GB (1024^3)
/// Without suffix, interprets as bytes.
fn parse_file_size(s: &str) -> Result<u64, String> {
    let s = s.trim().to_uppercase();
    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    Ok(num * multiplier)
}

fn main() {
    let args = Args::parse();

    // Configure max file size for extraction if specified
    if let Some(ref size_str) = args.max_file_size {
        match parse_file_size(size_str) {
            Ok(size) => {
                file_utils::set_max_file_size(size);
            }
            Err(e) => {
                eprintln!("usescan: invalid --max-file-size '{}': {}", size_str, e);
                process::exit(1);
            }
        }
    }

    if args.jobs > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(args.jobs)
            .build_global()
        {
            eprintln!("usescan: could not configure {} workers: {}", args.jobs, e);
        }
    }

    let ignore_patterns = compile_ignore_patterns(&args.ignore);
    let files = collect_files(&args, &ignore_patterns);

    // Fan-out across units, results collected back in unit order
    let results: Vec<(PathBuf, Result<Option<Vec<ImportRecord>>, ExtractError>)> = files
        .par_iter()
        .map(|path| (path.clone(), extract_imports_from_file(path)))
        .collect();

    let mut reports = Vec::new();
    let mut collector = StatsCollector::new();
    let mut failures = 0;
    for (path, result) in results {
        match result {
            Ok(Some(imports)) => {
                collector.record_unit(&imports);
                reports.push(FileReport::new(path, imports));
            }
            // Over the size limit, skipped
            Ok(None) => {}
            Err(e) => {
                failures += 1;
                collector.record_failure();
                match &e {
                    ExtractError::Syntax { .. } => {
                        eprintln!("usescan: {}: {}", path.display(), e)
                    }
                    _ => eprintln!("usescan: {}", e),
                }
            }
        }
    }

    let use_color = should_use_color(args.color);
    let result = if args.stats {
        let stats = collector.finalize();
        if args.json {
            print_stats_json(&stats)
        } else {
            print_stats(&stats, use_color)
        }
    } else if args.json {
        print_json(&reports)
    } else {
        print_reports(&reports, use_color)
    };

    if let Err(e) = result {
        eprintln!("usescan: error writing output: {}", e);
        process::exit(1);
    }
    if failures > 0 {
        process::exit(1);
    }
}

fn compile_ignore_patterns(patterns: &[String]) -> Vec<glob::Pattern> {
    patterns
        .iter()
        .map(|p| {
            glob::Pattern::new(p).unwrap_or_else(|e| {
                eprintln!("usescan: invalid --ignore pattern '{}': {}", p, e);
                process::exit(1);
            })
        })
        .collect()
}

fn is_ignored(path: &Path, patterns: &[glob::Pattern]) -> bool {
    patterns.iter().any(|pattern| {
        pattern.matches_path(path)
            || path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| pattern.matches(n))
    })
}

/// Collect the compilation units to scan, in a stable order.
///
/// Directories are walked with gitignore filtering unless --all is given;
/// only `.php` files are picked up. Paths named explicitly are always
/// included.
fn collect_files(args: &Args, ignore_patterns: &[glob::Pattern]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in &args.paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let mut builder = ignore::WalkBuilder::new(path);
            if args.all {
                builder
                    .hidden(false)
                    .ignore(false)
                    .git_ignore(false)
                    .git_global(false)
                    .git_exclude(false);
            }
            for entry in builder.build().flatten() {
                let entry_path = entry.path();
                if entry_path.is_file()
                    && file_utils::is_php_file(entry_path)
                    && !is_ignored(entry_path, ignore_patterns)
                {
                    files.push(entry_path.to_path_buf());
                }
            }
        } else {
            eprintln!(
                "usescan: cannot access '{}': No such file or directory",
                path.display()
            );
            process::exit(1);
        }
    }

    files.sort();
    files
}
