// Locator Registry - Immutable catalog of named descriptor groups
//
// The registry is built once (from the suite's registry source or through the
// builder) and then only read. There is no mutation API; share it by
// reference or Arc between page objects and concurrent test workers.
//
// Aliases: a group may declare `EMAIL_INPUT: LOGIN_LOCATORS.EMAIL_INPUT`.
// The alias resolves to a descriptor equal by value to its target and
// remembers where it came from, so tooling can tell intentional reuse apart
// from accidental duplication.
//
// Flatten: merges all groups into one key -> descriptor map. On a key
// collision the later group in merge order silently wins. This mirrors
// shallow object-spread semantics and is a known footgun: two groups that both
// declare `EMAIL_INPUT` with *different* descriptors will shadow each other.
// Collisions are logged at debug level and listed by `shadowed_keys()`.

use crate::error::{Error, Result};
use crate::protocol::descriptor::{Descriptor, DescriptorKind};
use crate::source::{LocatorSource, SourceValue};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

/// Registry source shipped with the suite (`suite/locators/index.ts`).
pub const BUILTIN_REGISTRY_SOURCE: &str = include_str!("../../../suite/locators/index.ts");

/// `GROUP.KEY` pair naming one registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedKey {
    pub group: String,
    pub key: String,
}

impl QualifiedKey {
    pub fn new(group: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            key: key.into(),
        }
    }
}

impl std::fmt::Display for QualifiedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.group, self.key)
    }
}

/// One resolved entry of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorEntry {
    pub key: String,
    pub descriptor: Descriptor,
    /// Canonical entry this one aliases, if declared as `GROUP.KEY`
    pub alias_of: Option<QualifiedKey>,
}

/// Named, ordered set of entries with unique keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorGroup {
    name: String,
    entries: Vec<LocatorEntry>,
}

impl LocatorGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[LocatorEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&LocatorEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A key declared by more than one group in merge order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowedKey {
    pub key: String,
    /// Declaring groups in merge order; the last one wins
    pub groups: Vec<String>,
    /// True when the declarations do not all resolve to the same descriptor
    pub conflicting: bool,
}

/// Immutable locator catalog.
///
/// # Example
///
/// ```ignore
/// use e2e_locators::Registry;
///
/// let registry = Registry::builtin()?;
/// let email = registry.get("LOGIN", "EMAIL_INPUT")?;
/// assert_eq!(email.selector(), "[data-testid=\"email-input\"]");
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    groups: Vec<LocatorGroup>,
    categories: HashMap<String, String>,
    merge_order: Vec<String>,
}

impl Registry {
    /// Starts a programmatic registry declaration.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Builds the registry from the source shipped with the suite.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_REGISTRY_SOURCE)
    }

    /// Reads and parses a registry source file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parses registry source text.
    ///
    /// Fails on unknown descriptor kinds, empty values, duplicate groups or
    /// keys, and aliases pointing at entries that do not exist.
    pub fn parse(text: &str) -> Result<Self> {
        let source = LocatorSource::parse(text);
        let mut builder = Registry::builder();

        for group in source.locator_groups() {
            let mut decl = GroupDecl::new(&group.name);
            for entry in &group.entries {
                decl = match &entry.value {
                    SourceValue::Literal(selector) => {
                        decl.entry(&entry.key, Descriptor::new(DescriptorKind::Css, selector.clone())?)
                    }
                    SourceValue::Tagged { kind, value } => {
                        decl.entry(&entry.key, Descriptor::from_tagged(kind, value.clone())?)
                    }
                    SourceValue::Alias { group, key } => decl.alias(&entry.key, group, key),
                    SourceValue::Reference(name) => {
                        return Err(Error::InvalidRegistry(format!(
                            "{}.{} references group '{}' where a locator was expected",
                            group.name, entry.key, name
                        )));
                    }
                    SourceValue::Unrecognized(raw) => {
                        return Err(Error::InvalidRegistry(format!(
                            "{}.{} is not a locator descriptor: {}",
                            group.name, entry.key, raw
                        )));
                    }
                };
            }
            builder = builder.group(decl);
        }

        for (short, target) in source.categories() {
            builder = builder.category(short, target);
        }

        if let Some(order) = source.merge_order() {
            builder = builder.merge_order(order);
        }

        builder.build()
    }

    /// Looks up `group.key`. `group` may be a declared group name or a category name.
    pub fn get(&self, group: &str, key: &str) -> Result<&Descriptor> {
        let found = self.group(group).map_err(|_| Error::UnknownLocator {
            group: group.to_string(),
            key: key.to_string(),
        })?;

        found
            .get(key)
            .map(|entry| &entry.descriptor)
            .ok_or_else(|| Error::UnknownLocator {
                group: group.to_string(),
                key: key.to_string(),
            })
    }

    /// Looks up a group by name or category name.
    pub fn group(&self, name: &str) -> Result<&LocatorGroup> {
        let canonical = self.categories.get(name).map(String::as_str).unwrap_or(name);
        self.groups
            .iter()
            .find(|g| g.name == canonical)
            .ok_or_else(|| Error::UnknownGroup(name.to_string()))
    }

    /// Groups in declaration order.
    pub fn groups(&self) -> &[LocatorGroup] {
        &self.groups
    }

    /// Group names in the order `flatten()` merges them.
    pub fn merge_order(&self) -> &[String] {
        &self.merge_order
    }

    /// Merges all groups in merge order; later groups win on key collision.
    pub fn flatten(&self) -> BTreeMap<String, Descriptor> {
        let mut merged: BTreeMap<String, (String, Descriptor)> = BTreeMap::new();

        for group in self.merge_groups() {
            for entry in &group.entries {
                if let Some((previous, _)) = merged.get(&entry.key) {
                    tracing::debug!(
                        "Flatten: {}.{} shadows {}.{}",
                        group.name,
                        entry.key,
                        previous,
                        entry.key
                    );
                }
                merged.insert(
                    entry.key.clone(),
                    (group.name.clone(), entry.descriptor.clone()),
                );
            }
        }

        merged
            .into_iter()
            .map(|(key, (_, descriptor))| (key, descriptor))
            .collect()
    }

    /// Keys that more than one merged group declares.
    pub fn shadowed_keys(&self) -> Vec<ShadowedKey> {
        let mut declared: BTreeMap<&str, Vec<(&str, &Descriptor)>> = BTreeMap::new();
        for group in self.merge_groups() {
            for entry in &group.entries {
                declared
                    .entry(entry.key.as_str())
                    .or_default()
                    .push((group.name.as_str(), &entry.descriptor));
            }
        }

        declared
            .into_iter()
            .filter(|(_, owners)| owners.len() > 1)
            .map(|(key, owners)| ShadowedKey {
                key: key.to_string(),
                conflicting: owners.windows(2).any(|w| w[0].1 != w[1].1),
                groups: owners.iter().map(|(g, _)| g.to_string()).collect(),
            })
            .collect()
    }

    /// Every entry keyed by `GROUP.KEY`, aliases included.
    pub fn qualified(&self) -> BTreeMap<QualifiedKey, &LocatorEntry> {
        self.groups
            .iter()
            .flat_map(|g| {
                g.entries
                    .iter()
                    .map(move |e| (QualifiedKey::new(&g.name, &e.key), e))
            })
            .collect()
    }

    fn merge_groups(&self) -> impl Iterator<Item = &LocatorGroup> {
        self.merge_order
            .iter()
            .filter_map(|name| self.groups.iter().find(|g| &g.name == name))
    }
}

/// Entry declaration before aliases are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
enum EntryDecl {
    Descriptor(Descriptor),
    Alias(QualifiedKey),
}

/// Group declaration for `RegistryBuilder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDecl {
    name: String,
    entries: Vec<(String, EntryDecl)>,
}

impl GroupDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Declares `key` with its own descriptor.
    pub fn entry(mut self, key: impl Into<String>, descriptor: Descriptor) -> Self {
        self.entries
            .push((key.into(), EntryDecl::Descriptor(descriptor)));
        self
    }

    /// Declares `key` as an alias of `group.target_key`.
    pub fn alias(
        mut self,
        key: impl Into<String>,
        group: impl Into<String>,
        target_key: impl Into<String>,
    ) -> Self {
        self.entries.push((
            key.into(),
            EntryDecl::Alias(QualifiedKey::new(group, target_key)),
        ));
        self
    }
}

/// Builder for `Registry`
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    groups: Vec<GroupDecl>,
    categories: Vec<(String, String)>,
    merge_order: Option<Vec<String>>,
}

/// Longest alias chain followed before assuming a cycle
const MAX_ALIAS_DEPTH: usize = 16;

impl RegistryBuilder {
    pub fn group(mut self, group: GroupDecl) -> Self {
        self.groups.push(group);
        self
    }

    /// Registers `short` as another name for group `target`.
    pub fn category(mut self, short: impl Into<String>, target: impl Into<String>) -> Self {
        self.categories.push((short.into(), target.into()));
        self
    }

    /// Sets the flatten merge order. Defaults to declaration order.
    pub fn merge_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.merge_order = Some(order.into_iter().map(Into::into).collect());
        self
    }

    /// Validates declarations and resolves aliases.
    ///
    /// Fails on duplicate groups or keys, empty descriptor values, and
    /// aliases that are dangling or cyclic.
    pub fn build(self) -> Result<Registry> {
        let mut seen_groups: HashSet<&str> = HashSet::new();
        for group in &self.groups {
            if !seen_groups.insert(group.name.as_str()) {
                return Err(Error::InvalidRegistry(format!(
                    "group '{}' is declared twice",
                    group.name
                )));
            }
            let mut seen_keys: HashSet<&str> = HashSet::new();
            for (key, decl) in &group.entries {
                if !seen_keys.insert(key.as_str()) {
                    return Err(Error::InvalidRegistry(format!(
                        "key '{}' is declared twice in group '{}'",
                        key, group.name
                    )));
                }
                if let EntryDecl::Descriptor(descriptor) = decl
                    && descriptor.value().trim().is_empty()
                {
                    return Err(Error::InvalidDescriptor(format!(
                        "{}.{} has an empty {} value",
                        group.name,
                        key,
                        descriptor.kind()
                    )));
                }
            }
        }

        let categories: HashMap<String, String> = self.categories.iter().cloned().collect();

        let mut groups = Vec::with_capacity(self.groups.len());
        for group in &self.groups {
            let mut entries = Vec::with_capacity(group.entries.len());
            for (key, decl) in &group.entries {
                let (descriptor, alias_of) = match decl {
                    EntryDecl::Descriptor(descriptor) => (descriptor.clone(), None),
                    EntryDecl::Alias(target) => {
                        let canonical = QualifiedKey::new(
                            categories
                                .get(&target.group)
                                .cloned()
                                .unwrap_or_else(|| target.group.clone()),
                            target.key.clone(),
                        );
                        let descriptor = self.follow_alias(&canonical, &categories, 0)?;
                        (descriptor, Some(canonical))
                    }
                };
                entries.push(LocatorEntry {
                    key: key.clone(),
                    descriptor,
                    alias_of,
                });
            }
            groups.push(LocatorGroup {
                name: group.name.clone(),
                entries,
            });
        }

        let merge_order = match self.merge_order {
            Some(order) => {
                if let Some(missing) = order.iter().find(|n| !seen_groups.contains(n.as_str())) {
                    return Err(Error::InvalidRegistry(format!(
                        "merge order names unknown group '{}'",
                        missing
                    )));
                }
                order
            }
            None => self.groups.iter().map(|g| g.name.clone()).collect(),
        };

        tracing::debug!(
            "Registry built: {} groups, {} entries",
            groups.len(),
            groups.iter().map(LocatorGroup::len).sum::<usize>()
        );

        Ok(Registry {
            groups,
            categories,
            merge_order,
        })
    }

    fn follow_alias(
        &self,
        target: &QualifiedKey,
        categories: &HashMap<String, String>,
        depth: usize,
    ) -> Result<Descriptor> {
        if depth >= MAX_ALIAS_DEPTH {
            return Err(Error::InvalidRegistry(format!(
                "alias chain through {} is too deep or cyclic",
                target
            )));
        }

        let group_name = categories.get(&target.group).unwrap_or(&target.group);
        let decl = self
            .groups
            .iter()
            .find(|g| &g.name == group_name)
            .and_then(|g| g.entries.iter().find(|(k, _)| *k == target.key))
            .map(|(_, decl)| decl)
            .ok_or_else(|| Error::UnknownLocator {
                group: target.group.clone(),
                key: target.key.clone(),
            })?;

        match decl {
            EntryDecl::Descriptor(descriptor) => Ok(descriptor.clone()),
            EntryDecl::Alias(next) => self.follow_alias(next, categories, depth + 1),
        }
    }
}
