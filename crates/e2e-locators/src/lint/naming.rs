// Naming convention checker
//
// Rules, all applied by pattern matching on file names and source text:
// - file names: lowercase words joined by '-' or '_', optional `.spec`,
//   `.js`/`.ts` extension; page objects under `pages/` may be `NamePage.ts`
// - classes: PascalCase; classes under `pages/` end with `Page`
// - callables (`name(`): camelCase, minus keywords and well-known globals
// - test titles in `.spec.` files start with "should "
//
// Extraction is lexical. Calls inside strings and comments are picked up
// too; that is accepted noise for a lint signal.

use crate::api::lint_options::LintOptions;
use crate::error::{Error, Result};
use crate::lint::{Location, Violation, ViolationKind, ViolationReport, display_path, source_files};
use crate::source::line_of;
use regex::Regex;
use std::path::{Component, Path};
use std::sync::LazyLock;

static FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9-]*(_[a-z][a-z0-9-]*)*\.(spec\.)?(js|ts)$")
        .expect("file pattern is valid")
});

static PAGE_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z]*Page\.(ts|js)$").expect("page file pattern is valid"));

static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").expect("class pattern is valid"));

static PAGE_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*Page$").expect("page class pattern is valid"));

static METHOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-zA-Z0-9]*$").expect("method pattern is valid"));

static CLASS_DECL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"class\s+(\w+)").expect("class declaration pattern is valid"));

static CALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:async\s+)?(\w+)\s*\(").expect("call pattern is valid"));

static TEST_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"test\s*\(\s*["'`]([^"'`]+)["'`]"#).expect("test title pattern is valid")
});

/// Words after `class` that are prose, not declarations.
const NON_CLASS_WORDS: &[&str] = &[
    "for", "uses", "names", "with", "from", "into", "over", "under", "test", "describe",
    "beforeEach", "afterEach", "beforeAll", "afterAll",
];

/// Identifiers followed by `(` that are not the suite's own callables.
const NON_METHOD_WORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "function", "const", "let", "var", "RegExp", "Date",
    "String", "Number", "Boolean", "Array", "Object", "Map", "Set", "Promise", "Error",
    "TypeError", "ReferenceError", "SyntaxError", "console", "process", "require", "import",
    "export", "default", "test", "describe", "beforeEach", "afterEach", "beforeAll", "afterAll",
    "expect", "page", "browser", "context", "new", "await", "return", "LoginPage", "TestHelpers",
    "TestData", "Selectors",
];

/// Required start of a test title.
pub const TEST_TITLE_PREFIX: &str = "should ";

fn in_pages_dir(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == "pages"))
}

/// Checks a file name. `path` should be relative to the suite root so the
/// `pages/` exception applies. Returns a message when the name is rejected.
pub fn check_file_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();

    if FILE_RE.is_match(&name) || (in_pages_dir(path) && PAGE_FILE_RE.is_match(&name)) {
        return None;
    }

    Some(format!(
        "File name '{}' should be lowercase words joined by '-' or '_' (e.g. login_success.spec.ts)",
        name
    ))
}

/// Checks one file's name and contents. `path` is relative to the suite root.
pub fn check_source(path: &Path, contents: &str) -> Vec<Violation> {
    let mut violations = Vec::new();
    let naming = |detail: String, line: Option<usize>| {
        let mut location = Location::file(path);
        if let Some(line) = line {
            location = location.line(line);
        }
        Violation::new(ViolationKind::NamingViolation, detail).at(location)
    };

    if let Some(message) = check_file_name(path) {
        violations.push(naming(message, None));
    }

    let is_page = in_pages_dir(path);
    for caps in CLASS_DECL_RE.captures_iter(contents) {
        let Some(m) = caps.get(1) else { continue };
        let class = m.as_str();
        if NON_CLASS_WORDS.contains(&class) {
            continue;
        }
        let line = Some(line_of(contents, m.start()));

        if !CLASS_RE.is_match(class) {
            violations.push(naming(
                format!("Class '{}' should be PascalCase", class),
                line,
            ));
        }
        if is_page && !PAGE_CLASS_RE.is_match(class) {
            violations.push(naming(
                format!("Page object class '{}' should end with 'Page'", class),
                line,
            ));
        }
    }

    for caps in CALL_RE.captures_iter(contents) {
        let Some(m) = caps.get(1) else { continue };
        let method = m.as_str();
        if NON_METHOD_WORDS.contains(&method) || METHOD_RE.is_match(method) {
            continue;
        }
        violations.push(naming(
            format!("Method '{}' should be camelCase", method),
            Some(line_of(contents, m.start())),
        ));
    }

    let is_spec = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().contains(".spec."));
    if is_spec {
        for caps in TEST_TITLE_RE.captures_iter(contents) {
            let Some(m) = caps.get(1) else { continue };
            if !m.as_str().starts_with(TEST_TITLE_PREFIX) {
                violations.push(naming(
                    format!("Test '{}' should start with '{}'", m.as_str(), TEST_TITLE_PREFIX),
                    Some(line_of(contents, m.start())),
                ));
            }
        }
    }

    violations
}

fn is_validator_script(relative: &Path) -> bool {
    let under_scripts = relative
        .components()
        .any(|c| matches!(c, Component::Normal(name) if name == "scripts"));
    under_scripts
        && relative
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with("validate-"))
}

/// Walks the test directory and `scan_dirs`, checking every `.js`/`.ts` file.
///
/// Missing directories are skipped. Every violation in every file is reported.
pub fn validate_naming(options: &LintOptions) -> Result<ViolationReport> {
    let mut report = ViolationReport::new("naming");

    for dir in options.naming_dirs() {
        for path in source_files(&dir)? {
            let relative = display_path(&options.root, &path);
            if is_validator_script(&relative) {
                continue;
            }

            let contents = std::fs::read_to_string(&path).map_err(|source| Error::FileRead {
                path: path.clone(),
                source,
            })?;
            report.checked += 1;
            for violation in check_source(&relative, &contents) {
                report.push(violation);
            }
        }
    }

    tracing::info!(
        "Naming check: {} files, {} violation(s)",
        report.checked,
        report.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert!(check_file_name(Path::new("tests/login_success.spec.ts")).is_none());
        assert!(check_file_name(Path::new("tests/login-pom.spec.ts")).is_none());
        assert!(check_file_name(Path::new("utils/test-helpers.ts")).is_none());
        assert!(check_file_name(Path::new("tests/Login_Success.spec.js")).is_some());
        assert!(check_file_name(Path::new("pages/LoginPage.ts")).is_none());
        assert!(check_file_name(Path::new("tests/LoginPage.ts")).is_some());
    }

    #[test]
    fn test_page_class_needs_suffix() {
        let violations = check_source(
            Path::new("pages/login-screen.ts"),
            "export class LoginScreen {\n  async fillEmail(email) {}\n}\n",
        );
        assert_eq!(violations.len(), 1);
        assert!(violations[0].detail.contains("should end with 'Page'"));
        assert_eq!(violations[0].locations[0].line, Some(1));
    }

    #[test]
    fn test_reports_every_violation_in_file() {
        let source = "class login_helper {}\nfunction Do_Thing() {}\ntest('logs in', async () => {});\n";
        let violations = check_source(Path::new("tests/bad_file.spec.ts"), source);
        let details: Vec<&str> = violations.iter().map(|v| v.detail.as_str()).collect();

        assert!(details.iter().any(|d| d.contains("Class 'login_helper'")));
        assert!(details.iter().any(|d| d.contains("Method 'Do_Thing'")));
        assert!(details.iter().any(|d| d.contains("Test 'logs in'")));
    }

    #[test]
    fn test_keywords_are_not_methods() {
        let source = "if (x) { for (const a of b) { expect(a).toBe(1); } }\nconst d = new Date();\n";
        assert!(check_source(Path::new("utils/helpers.ts"), source).is_empty());
    }

    #[test]
    fn test_validator_scripts_are_skipped() {
        assert!(is_validator_script(Path::new("scripts/validate-locators.js")));
        assert!(!is_validator_script(Path::new("scripts/seed-data.js")));
        assert!(!is_validator_script(Path::new("tests/validate-login.spec.ts")));
    }
}
