// Registry source parsing
//
// The registry is declared in a small JavaScript/TypeScript object syntax:
//
//   export const LOGIN_LOCATORS = {
//     EMAIL_INPUT: { type: 'testid', value: 'email-input' },
//     LEGACY_BUTTON: '[data-testid="login-button"]',
//   } as const;
//
//   export const REGISTRATION_LOCATORS = {
//     EMAIL_INPUT: LOGIN_LOCATORS.EMAIL_INPUT,     // alias
//   };
//
//   export const ALL_LOCATORS = { ...LOGIN_LOCATORS, ...REGISTRATION_LOCATORS };
//   export const LOCATOR_CATEGORIES = { LOGIN: LOGIN_LOCATORS };
//
// Parsing is pattern based, not a JavaScript parser. Comments inside a group
// body, computed keys, template expressions and nested objects other than
// tagged descriptors are not understood. This is a known limitation: the
// output feeds lint signals and registry construction for files written in
// the shape above.

use std::sync::LazyLock;

use regex::Regex;

static GROUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)export\s+const\s+([A-Za-z_][A-Za-z0-9_]*)\s*=\s*\{(.*?)\}\s*(?:as\s+const\s*)?;")
        .expect("group pattern is valid")
});

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"([A-Za-z_][A-Za-z0-9_]*)\s*:\s*(\{[^{}]*\}|'[^']*'|"[^"]*"|`[^`]*`|[A-Za-z_$][A-Za-z0-9_$]*(?:\.[A-Za-z0-9_$]+)?)"#,
    )
    .expect("entry pattern is valid")
});

static SPREAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[{,])\s*\.\.\.\s*([A-Za-z_][A-Za-z0-9_]*)").expect("spread pattern is valid")
});

static QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'[^']*'|"[^"]*"|`[^`]*`"#).expect("quoted pattern is valid")
});

static TAG_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\btype\s*:\s*('[^']*'|"[^"]*"|`[^`]*`)"#).expect("type pattern is valid")
});

static TAG_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bvalue\s*:\s*('[^']*'|"[^"]*"|`[^`]*`)"#).expect("value pattern is valid")
});

/// Right-hand side of a registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceValue {
    /// Quoted legacy selector string
    Literal(String),
    /// `{ type, value }` object; the tag is not validated here
    Tagged { kind: String, value: String },
    /// `GROUP.KEY` reference to another group's entry
    Alias { group: String, key: String },
    /// Bare identifier (a whole group, as used by category tables)
    Reference(String),
    /// Object literal that is not a tagged descriptor
    Unrecognized(String),
}

/// One `KEY: value` line inside a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub key: String,
    pub value: SourceValue,
    /// 1-based line of the key
    pub line: usize,
}

/// One `export const NAME = { ... };` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceGroup {
    pub name: String,
    pub entries: Vec<SourceEntry>,
    /// Groups spread into this one (`...NAME`), in order
    pub spreads: Vec<String>,
    /// 1-based line of the declaration
    pub line: usize,
}

impl SourceGroup {
    /// True when the block declares locators (as opposed to a merge or category table).
    pub fn is_locator_group(&self) -> bool {
        self.spreads.is_empty()
            && !self.entries.is_empty()
            && self
                .entries
                .iter()
                .any(|e| !matches!(e.value, SourceValue::Reference(_)))
    }

    /// True when every entry names a whole group (`LOGIN: LOGIN_LOCATORS`).
    pub fn is_category_table(&self) -> bool {
        self.spreads.is_empty()
            && !self.entries.is_empty()
            && self
                .entries
                .iter()
                .all(|e| matches!(e.value, SourceValue::Reference(_)))
    }
}

/// Parsed registry source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatorSource {
    pub groups: Vec<SourceGroup>,
}

impl LocatorSource {
    /// Parses all exported object blocks from `text`.
    pub fn parse(text: &str) -> Self {
        let groups = GROUP_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let name = caps.get(1)?;
                let body = caps.get(2)?;
                Some(parse_group(text, name.as_str(), body.start(), body.as_str()))
            })
            .collect();

        Self { groups }
    }

    /// Groups that declare locators, in declaration order.
    pub fn locator_groups(&self) -> impl Iterator<Item = &SourceGroup> {
        self.groups.iter().filter(|g| g.is_locator_group())
    }

    /// Merge order declared by the first spread-only block, if any.
    pub fn merge_order(&self) -> Option<Vec<String>> {
        self.groups
            .iter()
            .find(|g| !g.spreads.is_empty())
            .map(|g| g.spreads.clone())
    }

    /// Category short names (`LOGIN` -> `LOGIN_LOCATORS`) from category tables.
    pub fn categories(&self) -> Vec<(String, String)> {
        self.groups
            .iter()
            .filter(|g| g.is_category_table())
            .flat_map(|g| {
                g.entries.iter().filter_map(|e| match &e.value {
                    SourceValue::Reference(target) => Some((e.key.clone(), target.clone())),
                    _ => None,
                })
            })
            .collect()
    }
}

fn parse_group(text: &str, name: &str, body_offset: usize, body: &str) -> SourceGroup {
    let entries = ENTRY_RE
        .captures_iter(body)
        .filter_map(|caps| {
            let key = caps.get(1)?;
            let raw = caps.get(2)?.as_str();
            Some(SourceEntry {
                key: key.as_str().to_string(),
                value: parse_value(raw),
                line: line_of(text, body_offset + key.start()),
            })
        })
        .collect();

    // Spreads only count at entry position, never inside string values.
    let unquoted = QUOTED_RE.replace_all(body, "''");
    let spreads = SPREAD_RE
        .captures_iter(&unquoted)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect();

    SourceGroup {
        name: name.to_string(),
        entries,
        spreads,
        line: line_of(text, body_offset),
    }
}

fn parse_value(raw: &str) -> SourceValue {
    if raw.starts_with('{') {
        let kind = TAG_TYPE_RE.captures(raw).and_then(|c| c.get(1));
        let value = TAG_VALUE_RE.captures(raw).and_then(|c| c.get(1));
        return match (kind, value) {
            (Some(kind), Some(value)) => SourceValue::Tagged {
                kind: unquote(kind.as_str()).to_string(),
                value: unquote(value.as_str()).to_string(),
            },
            _ => SourceValue::Unrecognized(raw.to_string()),
        };
    }

    if is_quoted(raw) {
        return SourceValue::Literal(unquote(raw).to_string());
    }

    match raw.split_once('.') {
        Some((group, key)) => SourceValue::Alias {
            group: group.to_string(),
            key: key.to_string(),
        },
        None => SourceValue::Reference(raw.to_string()),
    }
}

fn is_quoted(raw: &str) -> bool {
    raw.len() >= 2
        && [b'\'', b'"', b'`']
            .iter()
            .any(|q| raw.as_bytes()[0] == *q && raw.as_bytes()[raw.len() - 1] == *q)
}

fn unquote(raw: &str) -> &str {
    if is_quoted(raw) {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}

/// 1-based line number of byte `offset` in `text`.
pub(crate) fn line_of(text: &str, offset: usize) -> usize {
    text[..offset.min(text.len())].matches('\n').count() + 1
}
