// Suite linters
//
// Offline checks over the suite's source files. They read files as plain
// text and never start a browser. Each linter collects every finding in one
// pass into a ViolationReport; a missing or unreadable required file is an
// error instead.

pub mod console;
pub mod locators;
pub mod naming;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

pub use console::validate_console;
pub use locators::{
    Duplicate, HardcodedSelector, extract_descriptors, find_duplicates, find_hardcoded_selectors,
    validate_locators,
};
pub use naming::{check_file_name, validate_naming};

/// Category of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Same rendered selector declared under several keys
    Duplicate,
    /// Selector written outside the registry
    Hardcoded,
    /// File, class, method or test title breaks the naming rules
    NamingViolation,
    /// `console.*` call left in suite sources or test output
    ConsoleStatement,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::Duplicate => "duplicate",
            ViolationKind::Hardcoded => "hardcoded",
            ViolationKind::NamingViolation => "naming",
            ViolationKind::ConsoleStatement => "console",
        }
    }

    fn recommendations(&self) -> &'static [&'static str] {
        match self {
            ViolationKind::Duplicate => &[
                "Consolidate duplicate locators or alias the canonical entry (GROUP.KEY)",
                "Ensure each locator has a unique purpose",
            ],
            ViolationKind::Hardcoded => &["Move hardcoded selectors to the locator registry"],
            ViolationKind::NamingViolation => &[
                "Files: lowercase words joined by '-' or '_' (page objects: NamePage.ts under pages/)",
                "Classes: PascalCase; page objects end with 'Page'",
                "Methods: camelCase",
                "Tests: titles start with 'should '",
            ],
            ViolationKind::ConsoleStatement => &[
                "Remove console statements from suite sources",
                "Use the test runner's reporting instead of logging",
            ],
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a finding was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    /// 1-based line, when the finding is tied to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Symbol at the location (e.g. `LOGIN_LOCATORS.EMAIL_INPUT`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl Location {
    pub fn file(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            line: None,
            symbol: None,
        }
    }

    pub fn line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(symbol) = &self.symbol {
            write!(f, " ({})", symbol)?;
        }
        Ok(())
    }
}

/// One finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub locations: Vec<Location>,
    pub detail: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            locations: Vec::new(),
            detail: detail.into(),
        }
    }

    pub fn at(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }
}

/// Result of one or more linters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationReport {
    /// Linter(s) that produced the report
    pub checker: String,
    /// Number of items inspected (entries, files)
    pub checked: usize,
    pub violations: Vec<Violation>,
}

impl ViolationReport {
    pub fn new(checker: impl Into<String>) -> Self {
        Self {
            checker: checker.into(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Appends another report's findings.
    pub fn merge(&mut self, other: ViolationReport) {
        if self.checker.is_empty() {
            self.checker = other.checker;
        } else {
            self.checker = format!("{}+{}", self.checker, other.checker);
        }
        self.checked += other.checked;
        self.violations.extend(other.violations);
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Findings of one kind.
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// Human-readable report: summary, numbered findings, then recommendations.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if self.is_clean() {
            let _ = writeln!(
                out,
                "{}: checked {}, no violations found",
                self.checker, self.checked
            );
            return out;
        }

        let _ = writeln!(
            out,
            "{}: checked {}, found {} violation(s)",
            self.checker,
            self.checked,
            self.len()
        );
        let _ = writeln!(out, "{}", "=".repeat(60));

        for (index, violation) in self.violations.iter().enumerate() {
            let _ = writeln!(
                out,
                "\n{}. [{}] {}",
                index + 1,
                violation.kind,
                violation.detail
            );
            for location in &violation.locations {
                let _ = writeln!(out, "   - {}", location);
            }
        }

        let mut kinds: Vec<ViolationKind> = self.violations.iter().map(|v| v.kind).collect();
        kinds.sort();
        kinds.dedup();

        let _ = writeln!(out, "\n{}", "=".repeat(60));
        let _ = writeln!(out, "Recommendations:");
        for kind in kinds {
            for line in kind.recommendations() {
                let _ = writeln!(out, "   - {}", line);
            }
        }
        out
    }

    /// Report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Lists `.js`/`.ts` files under `dir`, sorted. A missing directory yields nothing.
pub(crate) fn source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    files_with_extensions(dir, &["js", "ts"])
}

/// Lists files under `dir` (recursively) whose extension is in `extensions`.
pub(crate) fn files_with_extensions(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        tracing::debug!("Skipping missing directory {}", dir.display());
        return Ok(Vec::new());
    }

    let pattern = format!("{}/**/*", glob::Pattern::escape(&dir.to_string_lossy()));
    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        let wanted = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&ext));
        if wanted && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Path shown in reports: relative to `root` when possible.
pub(crate) fn display_path(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ViolationReport {
        let mut report = ViolationReport::new("locators");
        report.checked = 3;
        report.push(
            Violation::new(ViolationKind::Duplicate, "Selector '#a' is declared 2 times")
                .at(Location::file("locators/index.ts").line(3).symbol("A.X"))
                .at(Location::file("locators/index.ts").line(9).symbol("B.Y")),
        );
        report
    }

    #[test]
    fn test_render_text_lists_every_finding() {
        let text = sample().render_text();
        assert!(text.contains("found 1 violation(s)"));
        assert!(text.contains("1. [duplicate] Selector '#a' is declared 2 times"));
        assert!(text.contains("   - locators/index.ts:3 (A.X)"));
        assert!(text.contains("   - locators/index.ts:9 (B.Y)"));
        assert!(text.contains("Recommendations:"));
    }

    #[test]
    fn test_clean_report() {
        let report = ViolationReport::new("naming");
        assert!(report.is_clean());
        assert!(report.render_text().contains("no violations found"));
    }

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(json["checker"], "locators");
        assert_eq!(json["violations"][0]["kind"], "duplicate");
        assert_eq!(json["violations"][0]["locations"][1]["symbol"], "B.Y");
    }

    #[test]
    fn test_merge_accumulates() {
        let mut all = ViolationReport::default();
        all.merge(sample());
        all.merge(ViolationReport::new("naming"));
        assert_eq!(all.checker, "locators+naming");
        assert_eq!(all.len(), 1);
        assert_eq!(all.checked, 3);
    }
}
