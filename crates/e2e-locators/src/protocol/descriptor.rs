// Descriptor - Symbolic description of how to find an element
//
// A descriptor is independent of any live document. It is what the registry
// stores and what page objects hand to the resolver.
//
// Two wire forms exist in the suite sources:
// - Tagged: { type: 'testid', value: 'email-input' }
// - Legacy: a bare selector string, always interpreted as CSS
//
// Both are accepted at the boundary (RawLocator) and converted once into the
// closed Descriptor enum; nothing downstream probes for the shape again.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Attribute used by `Descriptor::TestId`.
pub const TEST_ID_ATTRIBUTE: &str = "data-testid";

/// The strategy a descriptor uses to find its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorKind {
    /// Stable test-identifier attribute (`data-testid`)
    #[serde(rename = "testid")]
    TestId,
    /// Rendered text content (substring match)
    Text,
    /// Raw CSS selector (legacy form)
    Css,
    /// XPath expression
    #[serde(rename = "xpath")]
    XPath,
}

impl DescriptorKind {
    /// The tag used for this kind in tagged descriptors.
    pub fn as_str(&self) -> &'static str {
        match self {
            DescriptorKind::TestId => "testid",
            DescriptorKind::Text => "text",
            DescriptorKind::Css => "css",
            DescriptorKind::XPath => "xpath",
        }
    }
}

impl FromStr for DescriptorKind {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "testid" => Ok(DescriptorKind::TestId),
            "text" => Ok(DescriptorKind::Text),
            "css" => Ok(DescriptorKind::Css),
            "xpath" => Ok(DescriptorKind::XPath),
            other => Err(Error::UnsupportedDescriptorKind(other.to_string())),
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locator descriptor: exactly one strategy plus a non-empty value.
///
/// # Example
///
/// ```ignore
/// use e2e_locators::Descriptor;
///
/// let email = Descriptor::test_id("email-input");
/// assert_eq!(email.selector(), "[data-testid=\"email-input\"]");
///
/// // Legacy strings are CSS
/// let legacy = Descriptor::try_from("#login > button")?;
/// assert_eq!(legacy, Descriptor::Css("#login > button".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLocator", into = "RawLocator")]
pub enum Descriptor {
    /// Elements whose `data-testid` equals the value
    TestId(String),
    /// Elements whose rendered text contains the value
    Text(String),
    /// Elements matching the raw CSS selector
    Css(String),
    /// Elements matching the XPath expression
    XPath(String),
}

impl Descriptor {
    /// Builds a descriptor from a kind and value, rejecting empty values.
    pub fn new(kind: DescriptorKind, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(Error::InvalidDescriptor(format!(
                "{} descriptor has an empty value",
                kind
            )));
        }
        Ok(match kind {
            DescriptorKind::TestId => Descriptor::TestId(value),
            DescriptorKind::Text => Descriptor::Text(value),
            DescriptorKind::Css => Descriptor::Css(value),
            DescriptorKind::XPath => Descriptor::XPath(value),
        })
    }

    /// Builds a descriptor from a textual tag (`testid`, `text`, `css`, `xpath`).
    ///
    /// Fails with `UnsupportedDescriptorKind` for any other tag.
    pub fn from_tagged(tag: &str, value: impl Into<String>) -> Result<Self> {
        let kind: DescriptorKind = tag.parse()?;
        Descriptor::new(kind, value)
    }

    // The shorthand constructors below do not check the value. Registries
    // built from them are checked in `RegistryBuilder::build`.

    /// Creates a test-id descriptor
    pub fn test_id(value: impl Into<String>) -> Self {
        Descriptor::TestId(value.into())
    }

    /// Creates a text descriptor
    pub fn text(value: impl Into<String>) -> Self {
        Descriptor::Text(value.into())
    }

    /// Creates a CSS descriptor
    pub fn css(value: impl Into<String>) -> Self {
        Descriptor::Css(value.into())
    }

    /// Creates an XPath descriptor
    pub fn xpath(value: impl Into<String>) -> Self {
        Descriptor::XPath(value.into())
    }

    pub fn kind(&self) -> DescriptorKind {
        match self {
            Descriptor::TestId(_) => DescriptorKind::TestId,
            Descriptor::Text(_) => DescriptorKind::Text,
            Descriptor::Css(_) => DescriptorKind::Css,
            Descriptor::XPath(_) => DescriptorKind::XPath,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Descriptor::TestId(v) | Descriptor::Text(v) | Descriptor::Css(v) | Descriptor::XPath(v) => v,
        }
    }

    /// Renders the descriptor to the engine selector it resolves to.
    ///
    /// This rendering is also what the consistency checker compares, so a
    /// tagged `TestId("x")` and a legacy `'[data-testid="x"]'` collide.
    pub fn selector(&self) -> String {
        match self {
            Descriptor::TestId(v) => format!("[{}=\"{}\"]", TEST_ID_ATTRIBUTE, v),
            Descriptor::Text(v) => format!("text={}", v),
            Descriptor::Css(v) => v.clone(),
            Descriptor::XPath(v) => format!("xpath={}", v),
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.value())
    }
}

impl TryFrom<&str> for Descriptor {
    type Error = Error;

    fn try_from(selector: &str) -> Result<Self> {
        Descriptor::new(DescriptorKind::Css, selector)
    }
}

impl TryFrom<String> for Descriptor {
    type Error = Error;

    fn try_from(selector: String) -> Result<Self> {
        Descriptor::new(DescriptorKind::Css, selector)
    }
}

/// Descriptor as it appears at the boundary, before validation.
///
/// Matches both `"selector"` and `{ "type": "...", "value": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLocator {
    /// Legacy bare selector (CSS)
    Selector(String),
    /// Tagged descriptor
    Tagged {
        #[serde(rename = "type")]
        kind: String,
        value: String,
    },
}

impl TryFrom<RawLocator> for Descriptor {
    type Error = Error;

    fn try_from(raw: RawLocator) -> Result<Self> {
        match raw {
            RawLocator::Selector(selector) => Descriptor::new(DescriptorKind::Css, selector),
            RawLocator::Tagged { kind, value } => Descriptor::from_tagged(&kind, value),
        }
    }
}

impl TryFrom<&RawLocator> for Descriptor {
    type Error = Error;

    fn try_from(raw: &RawLocator) -> Result<Self> {
        Descriptor::try_from(raw.clone())
    }
}

impl From<Descriptor> for RawLocator {
    fn from(descriptor: Descriptor) -> Self {
        RawLocator::Tagged {
            kind: descriptor.kind().as_str().to_string(),
            value: descriptor.value().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_rendering() {
        assert_eq!(
            Descriptor::test_id("x").selector(),
            "[data-testid=\"x\"]"
        );
        assert_eq!(Descriptor::text("Intentos: 1/").selector(), "text=Intentos: 1/");
        assert_eq!(Descriptor::css("#login .btn").selector(), "#login .btn");
        assert_eq!(Descriptor::xpath("//h1").selector(), "xpath=//h1");
    }

    #[test]
    fn test_legacy_string_is_css() {
        assert_eq!(Descriptor::try_from("h1").unwrap(), Descriptor::Css("h1".into()));
        assert!(matches!(
            Descriptor::try_from(String::new()),
            Err(Error::InvalidDescriptor(_))
        ));

        let raw: RawLocator = serde_json::from_str("\"[data-testid=\\\"a\\\"]\"").unwrap();
        let descriptor = Descriptor::try_from(raw).unwrap();
        assert_eq!(descriptor.kind(), DescriptorKind::Css);
    }

    #[test]
    fn test_tagged_deserialization() {
        let descriptor: Descriptor =
            serde_json::from_str(r#"{"type":"testid","value":"email-input"}"#).unwrap();
        assert_eq!(descriptor, Descriptor::test_id("email-input"));

        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["type"], "testid");
        assert_eq!(json["value"], "email-input");
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let err = Descriptor::from_tagged("role", "button").unwrap_err();
        assert!(matches!(err, Error::UnsupportedDescriptorKind(ref k) if k == "role"));

        let parsed = serde_json::from_str::<Descriptor>(r#"{"type":"role","value":"button"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_empty_value_rejected() {
        let err = Descriptor::new(DescriptorKind::TestId, "  ").unwrap_err();
        assert!(matches!(err, Error::InvalidDescriptor(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Descriptor::test_id("login-button").to_string(), "testid(login-button)");
    }
}
