// Integration tests for the suite linters
//
// Tests cover:
// - The shipped suite passes the locator check
// - Duplicate and hardcoded selectors are reported with file positions
// - Missing test-data file is skipped; missing or malformed registry is fatal
// - Naming rules over a suite tree (files, classes, methods, test titles)
// - Console calls in sources and console output in test results

use e2e_locators::lint::{validate_console, validate_locators, validate_naming};
use e2e_locators::{Error, LintOptions, ViolationKind};
use std::path::{Path, PathBuf};

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create dir");
    std::fs::write(path, contents).expect("Failed to write file");
}

fn shipped_suite() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../suite")
}

#[test]
fn test_shipped_suite_is_clean() {
    let report = validate_locators(&LintOptions::new().root(shipped_suite()))
        .expect("Locator check should run");

    assert!(report.is_clean(), "{}", report.render_text());
    assert!(report.checked > 50);
}

#[test]
fn test_duplicates_and_hardcoded_selectors_reported() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write(
        dir.path(),
        "locators/index.ts",
        r#"export const LOGIN_LOCATORS = {
  EMAIL_INPUT: { type: 'testid', value: 'email-input' },
  SUBMIT: { type: 'testid', value: 'submit' },
} as const;

export const FORM_LOCATORS = {
  SUBMIT_BUTTON: '[data-testid="submit"]',
  EMAIL: LOGIN_LOCATORS.EMAIL_INPUT,
} as const;
"#,
    );
    write(
        dir.path(),
        "data/test-data.ts",
        "export const LOGIN_TEST_DATA = {\n  VALID_EMAIL: 'admin@test.com',\n  BUTTON: 'data-testid=\"login-button\"',\n} as const;\n",
    );

    let report = validate_locators(&LintOptions::new().root(dir.path()))
        .expect("Locator check should run");

    let duplicates: Vec<_> = report.of_kind(ViolationKind::Duplicate).collect();
    assert_eq!(duplicates.len(), 1);
    let owners: Vec<_> = duplicates[0]
        .locations
        .iter()
        .map(|l| (l.symbol.clone().unwrap(), l.line.unwrap()))
        .collect();
    assert_eq!(
        owners,
        vec![
            ("FORM_LOCATORS.SUBMIT_BUTTON".to_string(), 7),
            ("LOGIN_LOCATORS.SUBMIT".to_string(), 3),
        ]
    );
    assert_eq!(duplicates[0].locations[0].file, Path::new("locators/index.ts"));

    let hardcoded: Vec<_> = report.of_kind(ViolationKind::Hardcoded).collect();
    assert_eq!(hardcoded.len(), 1);
    assert_eq!(hardcoded[0].locations[0].line, Some(3));
    assert!(hardcoded[0].detail.contains("data-testid=\"login-button\""));

    let text = report.render_text();
    assert!(text.contains("found 2 violation(s)"));
    assert!(text.contains("Recommendations:"));
}

#[test]
fn test_missing_data_file_is_skipped() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write(
        dir.path(),
        "locators/index.ts",
        "export const LOGIN_LOCATORS = {\n  EMAIL_INPUT: { type: 'testid', value: 'email-input' },\n} as const;\n",
    );

    let report = validate_locators(&LintOptions::new().root(dir.path())).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.checked, 1);
}

#[test]
fn test_registry_problems_are_fatal() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let options = LintOptions::new().root(dir.path());

    let err = validate_locators(&options).unwrap_err();
    assert!(matches!(err, Error::FileRead { .. }), "{:?}", err);

    write(
        dir.path(),
        "locators/index.ts",
        "export const LOGIN_LOCATORS = {\n  SUBMIT: { type: 'role', value: 'button' },\n} as const;\n",
    );
    let err = validate_locators(&options).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }), "{:?}", err);
    assert!(err.to_string().contains("LOGIN_LOCATORS.SUBMIT"));
}

#[test]
fn test_naming_rules_over_suite_tree() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write(
        dir.path(),
        "tests/Login_Success.spec.js",
        "test('should log in', async ({ page }) => {});\n",
    );
    write(
        dir.path(),
        "tests/login-pom.spec.ts",
        "test('logs in with valid user', async ({ page }) => {\n  await loginPage.LoginWithValid();\n});\n",
    );
    write(
        dir.path(),
        "pages/LoginPage.ts",
        "export class LoginPage {\n  async fillEmail(email) {}\n  async clickLogin() {}\n}\n",
    );
    write(
        dir.path(),
        "scripts/validate-naming.js",
        "function Bad_Name() {}\n",
    );

    let report = validate_naming(&LintOptions::new().root(dir.path())).unwrap();
    assert_eq!(report.checked, 3);

    let flagged: Vec<String> = report
        .violations
        .iter()
        .map(|v| format!("{} {}", v.locations[0].file.display(), v.detail))
        .collect();

    assert!(flagged.iter().any(|f| f.starts_with("tests/Login_Success.spec.js File name")));
    assert!(flagged.iter().any(|f| f.contains("Method 'LoginWithValid'")));
    assert!(flagged.iter().any(|f| f.contains("Test 'logs in with valid user'")));
    assert!(!flagged.iter().any(|f| f.starts_with("pages/")), "{:?}", flagged);
    assert!(!flagged.iter().any(|f| f.starts_with("scripts/")), "{:?}", flagged);
    assert_eq!(report.len(), 3, "{:?}", flagged);
}

#[test]
fn test_console_in_sources_and_results() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write(
        dir.path(),
        "tests/login.spec.ts",
        "test('should log in', async () => {\n  console.log('step 1');\n  // console.log('old');\n});\n",
    );
    write(dir.path(), "utils/helpers.ts", "export const wait = () => 1;\n");
    write(
        dir.path(),
        "test-results/results.json",
        "{ \"stdout\": \"console.error: boom\" }\n",
    );
    write(
        dir.path(),
        "test-results/report.html",
        "<script>console.log('report')</script>\n",
    );

    let report = validate_console(&LintOptions::new().root(dir.path())).unwrap();
    assert_eq!(report.checked, 3);
    assert_eq!(report.len(), 2);
    assert!(
        report
            .violations
            .iter()
            .all(|v| v.kind == ViolationKind::ConsoleStatement)
    );

    let places: Vec<String> = report
        .violations
        .iter()
        .map(|v| v.locations[0].to_string())
        .collect();
    assert_eq!(places, vec!["tests/login.spec.ts:2", "test-results/results.json:1"]);
}

#[test]
fn test_reports_merge_for_combined_run() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write(
        dir.path(),
        "locators/index.ts",
        "export const LOGIN_LOCATORS = {\n  EMAIL_INPUT: { type: 'testid', value: 'email-input' },\n} as const;\n",
    );
    write(dir.path(), "tests/BadName.spec.ts", "test('should pass', () => {});\n");

    let options = LintOptions::new().root(dir.path());
    let mut report = validate_locators(&options).unwrap();
    report.merge(validate_naming(&options).unwrap());
    report.merge(validate_console(&options).unwrap());

    assert_eq!(report.checker, "locators+naming+console");
    assert_eq!(report.len(), 1);
    assert_eq!(report.violations[0].kind, ViolationKind::NamingViolation);

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["violations"][0]["kind"], "naming_violation");
}
