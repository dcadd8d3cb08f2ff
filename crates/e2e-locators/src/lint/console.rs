// Console cleanliness checker
//
// Flags `console.<level>(` calls in suite sources and any mention of
// `console.<level>` in test-run output (`.json` / `.txt` under the results
// directory). Commented-out lines in sources are ignored.

use crate::api::lint_options::LintOptions;
use crate::error::{Error, Result};
use crate::lint::{
    Location, Violation, ViolationKind, ViolationReport, display_path, files_with_extensions,
    source_files,
};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static CONSOLE_CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"console\.(log|warn|error|info|debug)\s*\(").expect("console call pattern is valid")
});

static CONSOLE_MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"console\.(log|warn|error|info|debug)\b").expect("console mention pattern is valid")
});

/// Output file types scanned under the results directory
pub const RESULT_EXTENSIONS: &[&str] = &["json", "txt"];

/// Lines of `contents` with a console call, as (1-based line, trimmed text).
pub fn find_console_calls(contents: &str) -> Vec<(usize, String)> {
    scan_lines(contents, &CONSOLE_CALL_RE, true)
}

fn scan_lines(contents: &str, re: &Regex, skip_comments: bool) -> Vec<(usize, String)> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let trimmed = line.trim();
            if skip_comments && (trimmed.starts_with("//") || trimmed.starts_with("/*")) {
                return None;
            }
            re.is_match(trimmed)
                .then(|| (index + 1, trimmed.to_string()))
        })
        .collect()
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Scans the test directory, `console_dirs` and the results directory.
pub fn validate_console(options: &LintOptions) -> Result<ViolationReport> {
    let mut report = ViolationReport::new("console");

    for dir in options.console_source_dirs() {
        for path in source_files(&dir)? {
            let contents = read(&path)?;
            report.checked += 1;

            let shown = display_path(&options.root, &path);
            for (line, text) in find_console_calls(&contents) {
                report.push(
                    Violation::new(ViolationKind::ConsoleStatement, format!("Console call: {}", text))
                        .at(Location::file(&shown).line(line)),
                );
            }
        }
    }

    for path in files_with_extensions(&options.results_path(), RESULT_EXTENSIONS)? {
        let contents = read(&path)?;
        report.checked += 1;

        let shown = display_path(&options.root, &path);
        for (line, text) in scan_lines(&contents, &CONSOLE_MENTION_RE, false) {
            let excerpt: String = text.chars().take(100).collect();
            report.push(
                Violation::new(
                    ViolationKind::ConsoleStatement,
                    format!("Console output in test results: {}", excerpt),
                )
                .at(Location::file(&shown).line(line)),
            );
        }
    }

    tracing::info!(
        "Console check: {} files, {} violation(s)",
        report.checked,
        report.len()
    );
    Ok(report)
}
