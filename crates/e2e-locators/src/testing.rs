// MemoryPage - Offline document implementing Engine
//
// Holds a flat list of elements per URL and answers selector queries for the
// selector forms the resolver renders:
// - `[data-testid="v"]` matches the element's test id
// - `text=v` matches elements whose text contains v
// - `#id` matches the element's id
// - anything else (including `xpath=...`) matches an extra selector the
//   element was registered with
// A trailing `>> nth=i` picks the i-th match.
//
// Navigating replaces the current document with the one registered for the
// target URL (or an empty one), so element state never survives navigation.

use crate::error::{Error, Result};
use crate::protocol::engine::Engine;
use crate::protocol::locator::ElementRef;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;

/// Bytes written by `MemoryPage::screenshot`
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// An element in a `MemoryDocument`.
#[derive(Debug, Clone, Default)]
pub struct MemoryElement {
    test_id: Option<String>,
    id: Option<String>,
    text: String,
    value: String,
    checked: Option<bool>,
    disabled: bool,
    hidden: bool,
    hidden_probes: u32,
    covered_clicks: u32,
    selectors: Vec<String>,
    navigates_to: Option<String>,
}

impl MemoryElement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element carrying `data-testid="value"`.
    pub fn with_test_id(value: impl Into<String>) -> Self {
        Self::new().test_id(value)
    }

    pub fn test_id(mut self, value: impl Into<String>) -> Self {
        self.test_id = Some(value.into());
        self
    }

    pub fn id(mut self, value: impl Into<String>) -> Self {
        self.id = Some(value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Makes the element a checkbox with the given state. Clicking toggles it.
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Reports not-visible for the first `probes` visibility checks.
    pub fn visible_after_probes(mut self, probes: u32) -> Self {
        self.hidden_probes = probes;
        self
    }

    /// Fails the first `clicks` clicks as if another element covered this one.
    pub fn covered_for_clicks(mut self, clicks: u32) -> Self {
        self.covered_clicks = clicks;
        self
    }

    /// Extra selector (CSS or `xpath=...`) that matches this element verbatim.
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selectors.push(selector.into());
        self
    }

    /// Clicking the element navigates to `url`.
    pub fn navigates_to(mut self, url: impl Into<String>) -> Self {
        self.navigates_to = Some(url.into());
        self
    }

    fn is_visible(&self) -> bool {
        !self.hidden && self.hidden_probes == 0
    }

    fn matches(&self, query: &Query<'_>) -> bool {
        match query {
            Query::TestId(v) => self.test_id.as_deref() == Some(*v),
            Query::Text(v) => self.text.contains(v),
            Query::Id(v) => self.id.as_deref() == Some(*v),
            Query::Exact(s) => self.selectors.iter().any(|own| own == s),
        }
    }
}

/// A document: title plus elements.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    title: String,
    elements: Vec<MemoryElement>,
}

impl MemoryDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: Vec::new(),
        }
    }

    pub fn element(mut self, element: MemoryElement) -> Self {
        self.elements.push(element);
        self
    }
}

enum Query<'a> {
    TestId(&'a str),
    Text(&'a str),
    Id(&'a str),
    Exact(&'a str),
}

fn parse_selector(selector: &str) -> (Query<'_>, usize) {
    let (base, index) = match selector.rsplit_once(" >> nth=") {
        Some((base, n)) => (base, n.trim().parse().unwrap_or(0)),
        None => (selector, 0),
    };

    let query = if let Some(v) = base
        .strip_prefix("[data-testid=\"")
        .and_then(|rest| rest.strip_suffix("\"]"))
    {
        Query::TestId(v)
    } else if let Some(v) = base.strip_prefix("text=") {
        Query::Text(v)
    } else if let Some(v) = base
        .strip_prefix('#')
        .filter(|id| id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'))
    {
        Query::Id(v)
    } else {
        Query::Exact(base)
    };

    (query, index)
}

#[derive(Debug, Default)]
struct PageState {
    url: String,
    current: MemoryDocument,
    documents: HashMap<String, MemoryDocument>,
    probes: u32,
    clicks: Vec<String>,
    navigations: Vec<String>,
}

impl PageState {
    fn find_mut(&mut self, target: &ElementRef) -> Option<&mut MemoryElement> {
        let (query, index) = parse_selector(target.selector());
        self.current
            .elements
            .iter_mut()
            .filter(|el| el.matches(&query))
            .nth(index)
    }

    fn require(&mut self, target: &ElementRef) -> Result<&mut MemoryElement> {
        self.find_mut(target)
            .ok_or_else(|| Error::ElementNotFound(target.selector().to_string()))
    }

    fn require_actionable(&mut self, target: &ElementRef) -> Result<&mut MemoryElement> {
        let element = self.require(target)?;
        if !element.is_visible() {
            return Err(Error::NotVisible(target.selector().to_string()));
        }
        if element.disabled {
            return Err(Error::Engine(format!(
                "element '{}' is disabled",
                target.selector()
            )));
        }
        Ok(element)
    }

    fn load(&mut self, url: &str) {
        self.url = url.to_string();
        self.current = self.documents.get(url).cloned().unwrap_or_default();
        self.navigations.push(url.to_string());
    }
}

/// In-memory `Engine` for tests.
///
/// # Example
///
/// ```ignore
/// use e2e_locators::testing::{MemoryElement, MemoryPage};
///
/// let page = MemoryPage::new()
///     .with_element(MemoryElement::with_test_id("email-input"));
/// ```
#[derive(Debug)]
pub struct MemoryPage {
    state: Mutex<PageState>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// Blank page (`about:blank`) with no elements.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PageState {
                url: "about:blank".to_string(),
                ..Default::default()
            }),
        }
    }

    /// Adds an element to the current document.
    pub fn with_element(self, element: MemoryElement) -> Self {
        self.state.lock().current.elements.push(element);
        self
    }

    /// Sets the current document's title.
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.state.lock().current.title = title.into();
        self
    }

    /// Registers the document served when navigating to `url`.
    pub fn with_document(self, url: impl Into<String>, document: MemoryDocument) -> Self {
        self.state.lock().documents.insert(url.into(), document);
        self
    }

    /// Number of visibility probes made so far.
    pub fn probe_count(&self) -> u32 {
        self.state.lock().probes
    }

    /// Number of successful clicks.
    pub fn click_count(&self) -> usize {
        self.state.lock().clicks.len()
    }

    /// Selectors clicked, in order.
    pub fn clicks(&self) -> Vec<String> {
        self.state.lock().clicks.clone()
    }

    /// URLs navigated to, in order (including click-triggered navigation).
    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().navigations.clone()
    }
}

#[async_trait]
impl Engine for MemoryPage {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.state.lock().load(url);
        Ok(())
    }

    async fn is_visible(&self, target: &ElementRef) -> Result<bool> {
        let mut state = self.state.lock();
        state.probes += 1;

        let visible = match state.find_mut(target) {
            None => false,
            Some(element) if element.hidden_probes > 0 => {
                element.hidden_probes -= 1;
                false
            }
            Some(element) => !element.hidden,
        };
        Ok(visible)
    }

    async fn fill(&self, target: &ElementRef, value: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.require_actionable(target)?.value = value.to_string();
        Ok(())
    }

    async fn clear(&self, target: &ElementRef) -> Result<()> {
        let mut state = self.state.lock();
        state.require_actionable(target)?.value.clear();
        Ok(())
    }

    async fn click(&self, target: &ElementRef) -> Result<()> {
        let mut state = self.state.lock();
        let element = state.require_actionable(target)?;
        if element.covered_clicks > 0 {
            element.covered_clicks -= 1;
            return Err(Error::NotActionable(format!(
                "another element intercepts clicks on '{}'",
                target.selector()
            )));
        }

        if let Some(checked) = element.checked.as_mut() {
            *checked = !*checked;
        }
        let next = element.navigates_to.clone();

        state.clicks.push(target.selector().to_string());
        if let Some(url) = next {
            state.load(&url);
        }
        Ok(())
    }

    async fn text_content(&self, target: &ElementRef) -> Result<Option<String>> {
        let mut state = self.state.lock();
        Ok(Some(state.require(target)?.text.clone()))
    }

    async fn input_value(&self, target: &ElementRef) -> Result<String> {
        let mut state = self.state.lock();
        Ok(state.require(target)?.value.clone())
    }

    async fn is_checked(&self, target: &ElementRef) -> Result<bool> {
        let mut state = self.state.lock();
        Ok(state.require(target)?.checked.unwrap_or(false))
    }

    async fn is_enabled(&self, target: &ElementRef) -> Result<bool> {
        let mut state = self.state.lock();
        Ok(!state.require(target)?.disabled)
    }

    fn current_url(&self) -> String {
        self.state.lock().url.clone()
    }

    async fn title(&self) -> Result<String> {
        Ok(self.state.lock().current.title.clone())
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        tokio::fs::write(path, PNG_SIGNATURE).await?;
        Ok(())
    }
}
