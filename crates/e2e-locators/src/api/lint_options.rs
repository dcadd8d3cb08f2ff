// Options for the suite linters
//
// Paths are relative to `root` unless absolute. Defaults describe the suite
// layout shipped in this repository (`suite/`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the linters find the suite's files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LintOptions {
    /// Suite root directory
    pub root: PathBuf,
    /// Registry source checked for duplicates
    pub registry_path: PathBuf,
    /// Test-data source scanned for hardcoded selectors
    pub data_path: PathBuf,
    /// Test directory; checked by both the naming and console linters
    pub tests_dir: PathBuf,
    /// Further directories checked for naming conventions
    pub scan_dirs: Vec<PathBuf>,
    /// Further directories checked for console statements
    pub console_dirs: Vec<PathBuf>,
    /// Test run output scanned for console statements
    pub results_dir: PathBuf,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("suite"),
            registry_path: PathBuf::from("locators/index.ts"),
            data_path: PathBuf::from("data/test-data.ts"),
            tests_dir: PathBuf::from("tests"),
            scan_dirs: ["pages", "utils", "scripts"]
                .iter()
                .map(PathBuf::from)
                .collect(),
            console_dirs: ["pages", "utils"]
                .iter()
                .map(PathBuf::from)
                .collect(),
            results_dir: PathBuf::from("test-results"),
        }
    }
}

impl LintOptions {
    /// Creates new LintOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn registry_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.registry_path = path.into();
        self
    }

    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn tests_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tests_dir = dir.into();
        self
    }

    pub fn scan_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.scan_dirs = dirs;
        self
    }

    pub fn console_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.console_dirs = dirs;
        self
    }

    pub fn results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    /// Resolves `path` against `root`.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn registry_file(&self) -> PathBuf {
        self.resolve(&self.registry_path)
    }

    pub fn data_file(&self) -> PathBuf {
        self.resolve(&self.data_path)
    }

    pub fn results_path(&self) -> PathBuf {
        self.resolve(&self.results_dir)
    }

    /// Directories the naming linter walks: `tests_dir` then `scan_dirs`.
    pub fn naming_dirs(&self) -> Vec<PathBuf> {
        std::iter::once(&self.tests_dir)
            .chain(&self.scan_dirs)
            .map(|dir| self.resolve(dir))
            .collect()
    }

    /// Source directories the console linter walks: `tests_dir` then `console_dirs`.
    pub fn console_source_dirs(&self) -> Vec<PathBuf> {
        std::iter::once(&self.tests_dir)
            .chain(&self.console_dirs)
            .map(|dir| self.resolve(dir))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_resolve_against_root() {
        let options = LintOptions::new().root("/work/suite");
        assert_eq!(
            options.registry_file(),
            PathBuf::from("/work/suite/locators/index.ts")
        );
        assert_eq!(
            options.data_file(),
            PathBuf::from("/work/suite/data/test-data.ts")
        );
    }

    #[test]
    fn test_tests_dir_leads_scan_lists() {
        let options = LintOptions::new().root("s").tests_dir("e2e");
        assert_eq!(
            options.naming_dirs(),
            vec![
                PathBuf::from("s/e2e"),
                PathBuf::from("s/pages"),
                PathBuf::from("s/utils"),
                PathBuf::from("s/scripts"),
            ]
        );
        assert_eq!(
            options.console_source_dirs(),
            vec![
                PathBuf::from("s/e2e"),
                PathBuf::from("s/pages"),
                PathBuf::from("s/utils"),
            ]
        );
    }

    #[test]
    fn test_absolute_path_wins() {
        let options = LintOptions::new()
            .root("/work/suite")
            .registry_path("/elsewhere/locators.ts");
        assert_eq!(
            options.registry_file(),
            PathBuf::from("/elsewhere/locators.ts")
        );
    }
}
