// Engine - Capabilities consumed from the browser automation engine
//
// Everything that touches a live document goes through this trait: navigation,
// element lookup, actions and state queries. Page objects, assertions and the
// retry helper are written against it and never against a concrete browser.
//
// Implementations:
// - `playwright_rs::Page` (feature "playwright")
// - `testing::MemoryPage` (offline document for tests)
//
// Ordering: a single Engine value drives one document. Callers issue
// operations sequentially; nothing here batches or reorders them.

use crate::error::{Error, Result};
use crate::protocol::descriptor::{Descriptor, DescriptorKind};
use crate::protocol::locator::ElementRef;
use async_trait::async_trait;
use std::path::Path;
use std::time::{Duration, Instant};

/// Polling interval used by the default `wait_visible`
pub const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Browser automation capabilities.
///
/// The `locate_by_*` methods are pure: they only build a lazy reference.
/// Their default bodies render the canonical selector strings and are what
/// every built-in engine uses.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Navigates the document to `url`. Prior element state is discarded.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Reference to elements whose `data-testid` equals `value`.
    fn locate_by_test_id(&self, value: &str) -> ElementRef {
        ElementRef::new(DescriptorKind::TestId, Descriptor::test_id(value).selector())
    }

    /// Reference to elements whose rendered text contains `value`.
    fn locate_by_text(&self, value: &str) -> ElementRef {
        ElementRef::new(DescriptorKind::Text, Descriptor::text(value).selector())
    }

    /// Reference bound directly to a CSS selector.
    fn locate_by_css(&self, selector: &str) -> ElementRef {
        ElementRef::new(DescriptorKind::Css, selector)
    }

    /// Reference bound to an XPath expression.
    fn locate_by_xpath(&self, expression: &str) -> ElementRef {
        ElementRef::new(DescriptorKind::XPath, Descriptor::xpath(expression).selector())
    }

    /// Returns whether a matching element is currently visible.
    ///
    /// A missing element is reported as not visible, not as an error.
    async fn is_visible(&self, target: &ElementRef) -> Result<bool>;

    /// Waits until the element is visible or `timeout` elapses.
    ///
    /// Fails with `Error::Timeout` at the deadline. The visibility probe runs at
    /// least once, so a zero timeout performs exactly one check.
    async fn wait_visible(&self, target: &ElementRef, timeout: Duration) -> Result<()> {
        let start = Instant::now();

        loop {
            if self.is_visible(target).await? {
                return Ok(());
            }

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return Err(Error::Timeout(format!(
                    "waiting for '{}' to be visible exceeded {}ms",
                    target.selector(),
                    timeout.as_millis()
                )));
            }

            tokio::time::sleep(WAIT_POLL_INTERVAL.min(timeout - elapsed)).await;
        }
    }

    /// Replaces the element's value with `value`.
    async fn fill(&self, target: &ElementRef, value: &str) -> Result<()>;

    /// Clears the element's value.
    async fn clear(&self, target: &ElementRef) -> Result<()>;

    /// Clicks the element.
    async fn click(&self, target: &ElementRef) -> Result<()>;

    /// Returns the element's text content.
    async fn text_content(&self, target: &ElementRef) -> Result<Option<String>>;

    /// Returns the value of an input, textarea or select element.
    async fn input_value(&self, target: &ElementRef) -> Result<String>;

    /// Returns whether the checkbox or radio button is checked.
    async fn is_checked(&self, target: &ElementRef) -> Result<bool>;

    /// Returns whether the element is enabled.
    async fn is_enabled(&self, target: &ElementRef) -> Result<bool>;

    /// Returns the URL of the current document.
    fn current_url(&self) -> String;

    /// Returns the document title.
    async fn title(&self) -> Result<String>;

    /// Waits for the document to settle after navigation.
    ///
    /// Engines without a load-state notion may keep the default no-op.
    async fn wait_for_load(&self) -> Result<()> {
        Ok(())
    }

    /// Writes a full-page PNG screenshot to `path`.
    async fn screenshot(&self, path: &Path) -> Result<()>;
}
