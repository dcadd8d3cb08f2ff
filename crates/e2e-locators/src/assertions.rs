// Assertions - Auto-retry assertions against an Engine
//
// expect() polls an element condition until it holds or the timeout elapses;
// expect_page() does the same for page-level state (URL, title).
// Engine errors raised while polling are returned immediately.

use crate::error::{Error, Result};
use crate::protocol::engine::Engine;
use crate::protocol::locator::ElementRef;
use regex::Regex;
use std::future::Future;
use std::time::{Duration, Instant};

/// Default timeout for assertions (5 seconds)
pub const DEFAULT_ASSERTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Default polling interval for assertions (100ms)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Polls `probe` until `accept` holds for the observed value.
///
/// `describe` renders the failure message from the last observed value.
async fn poll_until<F, Fut, T>(
    timeout: Duration,
    poll_interval: Duration,
    mut probe: F,
    accept: impl Fn(&T) -> bool,
    describe: impl Fn(&T) -> String,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let start = Instant::now();

    loop {
        let observed = probe().await?;
        if accept(&observed) {
            return Ok(());
        }

        if start.elapsed() >= timeout {
            return Err(Error::AssertionTimeout(format!(
                "{} after {:?}",
                describe(&observed),
                timeout
            )));
        }

        tokio::time::sleep(poll_interval).await;
    }
}

/// Creates an expectation for an element with auto-retry behavior.
///
/// # Example
///
/// ```ignore
/// use e2e_locators::{expect, resolve, Descriptor};
/// use std::time::Duration;
///
/// let error = resolve(&page, &Descriptor::test_id("error-message"));
/// expect(&page, error.clone()).to_be_visible().await?;
/// expect(&page, error)
///     .with_timeout(Duration::from_secs(10))
///     .to_contain_text("Invalid")
///     .await?;
/// ```
pub fn expect<E: Engine + ?Sized>(engine: &E, target: ElementRef) -> Expectation<'_, E> {
    Expectation::new(engine, target)
}

/// Creates an expectation for page-level state.
pub fn expect_page<E: Engine + ?Sized>(engine: &E) -> PageExpectation<'_, E> {
    PageExpectation {
        engine,
        timeout: DEFAULT_ASSERTION_TIMEOUT,
        poll_interval: DEFAULT_POLL_INTERVAL,
        negate: false,
    }
}

/// Expectation wraps an element reference and provides assertion methods with auto-retry.
pub struct Expectation<'a, E: Engine + ?Sized> {
    engine: &'a E,
    target: ElementRef,
    timeout: Duration,
    poll_interval: Duration,
    negate: bool,
}

// to_* methods consume self so assertions chain like `expect(..).not().to_be_visible()`
#[allow(clippy::wrong_self_convention)]
impl<'a, E: Engine + ?Sized> Expectation<'a, E> {
    pub(crate) fn new(engine: &'a E, target: ElementRef) -> Self {
        Self {
            engine,
            target,
            timeout: DEFAULT_ASSERTION_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            negate: false,
        }
    }

    /// Sets a custom timeout for this assertion.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a custom poll interval for this assertion.
    ///
    /// Default is 100ms.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Negates the assertion.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    fn expected(&self, what: &str) -> String {
        if self.negate {
            format!("Expected element '{}' NOT to {}", self.target, what)
        } else {
            format!("Expected element '{}' to {}", self.target, what)
        }
    }

    async fn check_flag<F, Fut>(self, what: &str, probe: F) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        let negate = self.negate;
        let message = self.expected(what);
        poll_until(
            self.timeout,
            self.poll_interval,
            probe,
            |flag| *flag != negate,
            |flag| format!("{}, but it was {}", message, if *flag { "true" } else { "false" }),
        )
        .await
    }

    /// Asserts that the element is visible.
    pub async fn to_be_visible(self) -> Result<()> {
        let (engine, target) = (self.engine, self.target.clone());
        self.check_flag("be visible", || engine.is_visible(&target))
            .await
    }

    /// Asserts that the element is hidden (missing or not visible).
    pub async fn to_be_hidden(self) -> Result<()> {
        self.not().to_be_visible().await
    }

    /// Asserts that the element's trimmed text equals `expected`.
    pub async fn to_have_text(self, expected: &str) -> Result<()> {
        let negate = self.negate;
        let message = self.expected(&format!("have text '{}'", expected));
        let (engine, target) = (self.engine, self.target.clone());
        poll_until(
            self.timeout,
            self.poll_interval,
            || engine.text_content(&target),
            |text| (text.as_deref().map(str::trim) == Some(expected)) != negate,
            |text| format!("{}, got {:?}", message, text),
        )
        .await
    }

    /// Asserts that the element's text contains `expected`.
    pub async fn to_contain_text(self, expected: &str) -> Result<()> {
        let negate = self.negate;
        let message = self.expected(&format!("contain text '{}'", expected));
        let (engine, target) = (self.engine, self.target.clone());
        poll_until(
            self.timeout,
            self.poll_interval,
            || engine.text_content(&target),
            |text| text.as_deref().is_some_and(|t| t.contains(expected)) != negate,
            |text| format!("{}, got {:?}", message, text),
        )
        .await
    }

    /// Asserts that the input's value equals `expected`.
    pub async fn to_have_value(self, expected: &str) -> Result<()> {
        let negate = self.negate;
        let message = self.expected(&format!("have value '{}'", expected));
        let (engine, target) = (self.engine, self.target.clone());
        poll_until(
            self.timeout,
            self.poll_interval,
            || engine.input_value(&target),
            |value| (value == expected) != negate,
            |value| format!("{}, got '{}'", message, value),
        )
        .await
    }

    /// Asserts that the checkbox is checked.
    pub async fn to_be_checked(self) -> Result<()> {
        let (engine, target) = (self.engine, self.target.clone());
        self.check_flag("be checked", || engine.is_checked(&target))
            .await
    }

    /// Asserts that the checkbox is not checked.
    pub async fn to_be_unchecked(self) -> Result<()> {
        self.not().to_be_checked().await
    }

    /// Asserts that the element is enabled.
    pub async fn to_be_enabled(self) -> Result<()> {
        let (engine, target) = (self.engine, self.target.clone());
        self.check_flag("be enabled", || engine.is_enabled(&target))
            .await
    }

    /// Asserts that the element is disabled.
    pub async fn to_be_disabled(self) -> Result<()> {
        self.not().to_be_enabled().await
    }
}

/// Page-level expectation (URL, title).
pub struct PageExpectation<'a, E: Engine + ?Sized> {
    engine: &'a E,
    timeout: Duration,
    poll_interval: Duration,
    negate: bool,
}

#[allow(clippy::wrong_self_convention)]
impl<'a, E: Engine + ?Sized> PageExpectation<'a, E> {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    /// Asserts that the current URL matches the regex `pattern`.
    pub async fn to_have_url(self, pattern: &str) -> Result<()> {
        let re = Regex::new(pattern)
            .map_err(|e| Error::InvalidArgument(format!("Invalid regex: {}", e)))?;
        let negate = self.negate;
        let engine = self.engine;
        poll_until(
            self.timeout,
            self.poll_interval,
            || async { Ok::<_, Error>(engine.current_url()) },
            |url| re.is_match(url) != negate,
            |url| {
                format!(
                    "Expected page URL {}to match /{}/, got '{}'",
                    if negate { "NOT " } else { "" },
                    pattern,
                    url
                )
            },
        )
        .await
    }

    /// Asserts that the document title equals `expected`.
    pub async fn to_have_title(self, expected: &str) -> Result<()> {
        let negate = self.negate;
        let engine = self.engine;
        poll_until(
            self.timeout,
            self.poll_interval,
            || engine.title(),
            |title| (title == expected) != negate,
            |title| {
                format!(
                    "Expected page title {}to be '{}', got '{}'",
                    if negate { "NOT " } else { "" },
                    expected,
                    title
                )
            },
        )
        .await
    }
}
