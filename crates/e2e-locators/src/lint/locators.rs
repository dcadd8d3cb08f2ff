// Locator consistency checker
//
// Reads the registry source and reports selectors declared under more than
// one key, then scans the test-data source for selectors written inline.
//
// Tagged descriptors are compared by their rendered selector, so a legacy
// `'[data-testid="x"]'` string and `{ type: 'testid', value: 'x' }` collide.
// Alias entries (`GROUP.KEY`) are intentional reuse and are not extracted.
//
// Hardcoded-selector detection is pattern matching only. False positives
// (e.g. the word `selector:` in a message string) are expected.

use crate::api::lint_options::LintOptions;
use crate::error::{Error, Result};
use crate::lint::{Location, Violation, ViolationKind, ViolationReport, display_path};
use crate::protocol::descriptor::Descriptor;
use crate::source::{LocatorSource, SourceValue, line_of};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::LazyLock;

/// Patterns that indicate a selector written outside the registry.
static HARDCODED_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("data-testid attribute", r#"data-testid=["'`][^"'`]+["'`]"#),
        ("getByTestId call", r#"getByTestId\(["'`][^"'`]+["'`]\)"#),
        ("locator call", r#"locator\(["'`][^"'`]+["'`]\)"#),
        ("selector property", r#"selector:\s*["'`][^"'`]+["'`]"#),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("hardcoded pattern is valid")))
    .collect()
});

/// A selector value owned by more than one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duplicate {
    pub value: String,
    /// Owning keys, sorted
    pub owners: Vec<String>,
}

/// An inline selector found outside the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardcodedSelector {
    /// Which pattern matched
    pub pattern: String,
    /// Matched text
    pub matched: String,
    /// 1-based line
    pub line: usize,
}

/// Descriptor entry extracted from registry source.
struct Extracted {
    qualified: String,
    selector: String,
    line: usize,
}

fn extract(text: &str) -> Result<Vec<Extracted>> {
    let source = LocatorSource::parse(text);
    let mut out = Vec::new();

    for group in source.locator_groups() {
        for entry in &group.entries {
            let qualified = format!("{}.{}", group.name, entry.key);
            let selector = match &entry.value {
                SourceValue::Literal(selector) => selector.clone(),
                SourceValue::Tagged { kind, value } => {
                    Descriptor::from_tagged(kind, value.clone())
                        .map_err(|e| e.context(format!("{} (line {})", qualified, entry.line)))?
                        .selector()
                }
                SourceValue::Alias { .. } | SourceValue::Reference(_) => continue,
                SourceValue::Unrecognized(raw) => {
                    return Err(Error::InvalidDescriptor(format!(
                        "{} (line {}) is not a locator descriptor: {}",
                        qualified, entry.line, raw
                    )));
                }
            };
            out.push(Extracted {
                qualified,
                selector,
                line: entry.line,
            });
        }
    }

    Ok(out)
}

/// Maps every `GROUP.KEY` declared in `text` to its rendered selector.
///
/// Fails on a tagged descriptor with an unsupported kind.
///
/// # Example
///
/// ```ignore
/// let found = extract_descriptors("export const A = { X: { type: 'testid', value: 'x' } };")?;
/// assert_eq!(found["A.X"], "[data-testid=\"x\"]");
/// ```
pub fn extract_descriptors(text: &str) -> Result<BTreeMap<String, String>> {
    Ok(extract(text)?
        .into_iter()
        .map(|e| (e.qualified, e.selector))
        .collect())
}

/// Groups keys by value and returns every value owned by two or more keys.
///
/// Output is sorted by value; owners are sorted. Input order does not matter.
pub fn find_duplicates<K, V>(descriptors: impl IntoIterator<Item = (K, V)>) -> Vec<Duplicate>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut owners_by_value: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (key, value) in descriptors {
        owners_by_value
            .entry(value.as_ref().to_string())
            .or_default()
            .insert(key.as_ref().to_string());
    }

    owners_by_value
        .into_iter()
        .filter(|(_, owners)| owners.len() > 1)
        .map(|(value, owners)| Duplicate {
            value,
            owners: owners.into_iter().collect(),
        })
        .collect()
}

/// Finds inline selectors in non-registry source, in file order.
pub fn find_hardcoded_selectors(text: &str) -> Vec<HardcodedSelector> {
    let mut found: Vec<(usize, HardcodedSelector)> = HARDCODED_PATTERNS
        .iter()
        .flat_map(|(name, re)| {
            re.find_iter(text).map(move |m| {
                (
                    m.start(),
                    HardcodedSelector {
                        pattern: name.to_string(),
                        matched: m.as_str().to_string(),
                        line: line_of(text, m.start()),
                    },
                )
            })
        })
        .collect();

    found.sort_by_key(|(offset, _)| *offset);
    found.into_iter().map(|(_, hit)| hit).collect()
}

fn read_required(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs the duplicate and hardcoded-selector checks.
///
/// The registry file is required. The data file is skipped with a warning
/// when it does not exist.
pub fn validate_locators(options: &LintOptions) -> Result<ViolationReport> {
    let registry_path = options.registry_file();
    let registry_text = read_required(&registry_path)?;
    let entries = extract(&registry_text).map_err(|e| Error::Parse {
        path: registry_path.clone(),
        message: e.to_string(),
    })?;

    let shown = display_path(&options.root, &registry_path);
    let mut report = ViolationReport::new("locators");
    report.checked = entries.len();

    let lines: BTreeMap<&str, usize> = entries
        .iter()
        .map(|e| (e.qualified.as_str(), e.line))
        .collect();

    for duplicate in find_duplicates(entries.iter().map(|e| (&e.qualified, &e.selector))) {
        let mut violation = Violation::new(
            ViolationKind::Duplicate,
            format!(
                "Selector '{}' is declared by {} keys",
                duplicate.value,
                duplicate.owners.len()
            ),
        );
        for owner in &duplicate.owners {
            let mut location = Location::file(&shown).symbol(owner);
            if let Some(line) = lines.get(owner.as_str()) {
                location = location.line(*line);
            }
            violation = violation.at(location);
        }
        report.push(violation);
    }

    let data_path = options.data_file();
    if data_path.exists() {
        let data_text = read_required(&data_path)?;
        let shown = display_path(&options.root, &data_path);
        for hit in find_hardcoded_selectors(&data_text) {
            report.push(
                Violation::new(
                    ViolationKind::Hardcoded,
                    format!("Hardcoded selector ({}): {}", hit.pattern, hit.matched),
                )
                .at(Location::file(&shown).line(hit.line)),
            );
        }
    } else {
        tracing::warn!(
            "Test data file {} not found; skipping hardcoded selector check",
            data_path.display()
        );
    }

    tracing::info!(
        "Locator check: {} entries, {} violation(s)",
        report.checked,
        report.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY: &str = r#"
export const LOGIN_LOCATORS = {
  EMAIL_INPUT: { type: 'testid', value: 'email-input' },
  LEGACY_EMAIL: '[data-testid="email-input"]',
  WELCOME: { type: 'text', value: 'Welcome' },
} as const;

export const REGISTRATION_LOCATORS = {
  EMAIL_INPUT: LOGIN_LOCATORS.EMAIL_INPUT,
  NAME: { type: 'xpath', value: '//input[@name="name"]' },
} as const;
"#;

    #[test]
    fn test_extract_renders_tagged_and_skips_aliases() {
        let found = extract_descriptors(REGISTRY).unwrap();
        assert_eq!(found["LOGIN_LOCATORS.EMAIL_INPUT"], "[data-testid=\"email-input\"]");
        assert_eq!(found["LOGIN_LOCATORS.LEGACY_EMAIL"], "[data-testid=\"email-input\"]");
        assert_eq!(found["LOGIN_LOCATORS.WELCOME"], "text=Welcome");
        assert_eq!(
            found["REGISTRATION_LOCATORS.NAME"],
            "xpath=//input[@name=\"name\"]"
        );
        assert!(!found.contains_key("REGISTRATION_LOCATORS.EMAIL_INPUT"));
    }

    #[test]
    fn test_legacy_and_tagged_forms_collide() {
        let found = extract_descriptors(REGISTRY).unwrap();
        let duplicates = find_duplicates(&found);
        assert_eq!(duplicates.len(), 1);
        assert_eq!(
            duplicates[0].owners,
            vec!["LOGIN_LOCATORS.EMAIL_INPUT", "LOGIN_LOCATORS.LEGACY_EMAIL"]
        );
    }

    #[test]
    fn test_unknown_kind_is_fatal() {
        let err = extract_descriptors("export const A = { X: { type: 'role', value: 'button' } };")
            .unwrap_err();
        assert!(err.to_string().contains("Unsupported descriptor kind: 'role'"));
    }

    #[test]
    fn test_find_duplicates_ignores_unique_values() {
        let duplicates = find_duplicates([("A.x", "#a"), ("B.y", "#b"), ("C.z", "#a")]);
        assert_eq!(
            duplicates,
            vec![Duplicate {
                value: "#a".into(),
                owners: vec!["A.x".into(), "C.z".into()],
            }]
        );
    }

    #[test]
    fn test_hardcoded_patterns_with_lines() {
        let data = "export const X = {\n  a: 'data-testid=\"submit\"',\n  b: page.getByTestId('login'),\n  selector: `#email`,\n};\n";
        let hits = find_hardcoded_selectors(data);
        let lines: Vec<usize> = hits.iter().map(|h| h.line).collect();
        assert_eq!(lines, vec![2, 3, 4]);
        assert_eq!(hits[0].matched, "data-testid=\"submit\"");
        assert_eq!(hits[1].pattern, "getByTestId call");
        assert_eq!(hits[2].matched, "selector: `#email`");
    }

    #[test]
    fn test_clean_data_has_no_hits() {
        let data = "export const LOGIN_TEST_DATA = { VALID_EMAIL: 'admin@test.com' };";
        assert!(find_hardcoded_selectors(data).is_empty());
    }
}
