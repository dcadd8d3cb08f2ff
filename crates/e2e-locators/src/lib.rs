//! e2e-locators: Locator registry, page objects and suite linters for browser end-to-end tests
//!
//! Elements are declared once, as symbolic descriptors in a registry, and
//! resolved against a live document only when a page object acts on them.
//! The same registry source is linted offline for duplicate and hardcoded
//! selectors.
//!
//! # Examples
//!
//! ## Resolving a registry entry
//!
//! ```ignore
//! use e2e_locators::{resolve, Engine, Registry};
//!
//! async fn fill_email<E: Engine>(page: &E) -> e2e_locators::Result<()> {
//!     let registry = Registry::builtin()?;
//!     let descriptor = registry.get("LOGIN", "EMAIL_INPUT")?;
//!
//!     // Lazy reference: `[data-testid="email-input"]`
//!     let email = resolve(page, descriptor);
//!     page.fill(&email, "admin@test.com").await
//! }
//! ```
//!
//! ## Page objects
//!
//! ```ignore
//! use e2e_locators::{DashboardPage, LoginPage, Registry, SuiteConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let playwright = playwright_rs::Playwright::launch().await?;
//!     let browser = playwright.chromium().launch().await?;
//!     let page = browser.new_page().await?;
//!
//!     let registry = Registry::builtin()?;
//!     let config = SuiteConfig::from_env()?;
//!
//!     let login = LoginPage::new(&page, &registry, &config)?;
//!     login.goto().await?;
//!     login.login_with_valid_credentials().await?;
//!
//!     let dashboard = DashboardPage::new(&page, &registry, &config)?;
//!     dashboard.expect_on_dashboard_page().await?;
//!
//!     browser.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Retrying a racy click
//!
//! ```ignore
//! use e2e_locators::{click_with_retry, Descriptor, RetryOptions};
//! use std::time::Duration;
//!
//! let options = RetryOptions::new()
//!     .max_attempts(5)
//!     .backoff(Duration::from_millis(500));
//! click_with_retry(&page, &Descriptor::test_id("user-menu"), Some(options)).await?;
//! ```
//!
//! ## Linting the suite
//!
//! ```ignore
//! use e2e_locators::{lint, LintOptions};
//!
//! let report = lint::validate_locators(&LintOptions::new().root("suite"))?;
//! print!("{}", report.render_text());
//! std::process::exit(if report.is_clean() { 0 } else { 1 });
//! ```

// Offline engine (exposed for integration tests)
#[doc(hidden)]
pub mod testing;

pub mod api;
mod assertions;
mod error;
pub mod lint;
pub mod pages;
pub mod protocol;
pub mod registry;
pub mod source;

// Re-export error types
pub use error::{Error, Result};

// Re-export assertions API
pub use assertions::{Expectation, PageExpectation, expect, expect_page};

// Re-export descriptor model and resolution
pub use protocol::{Descriptor, DescriptorKind, ElementRef, Engine, RawLocator, resolve, resolve_raw};

// Re-export helpers
pub use protocol::{RetryOptions, click_with_retry, screenshot_file_name, take_screenshot};

// Re-export registry
pub use registry::{GroupDecl, LocatorEntry, LocatorGroup, QualifiedKey, Registry, ShadowedKey};

// Re-export page objects
pub use pages::{DashboardPage, LoginPage};

// Re-export configuration
pub use api::{LintOptions, SuiteConfig};

// Re-export lint report types
pub use lint::{Violation, ViolationKind, ViolationReport};
