// LoginPage - Page object for the login screen
//
// Element references come from the registry's LOGIN group and are resolved
// once at construction. They are lazy, so they stay valid after `goto()`
// or a failed login reloads the document.
//
// Actions wait for the element to be visible (bounded by the suite timeout)
// before acting. Failures are propagated unchanged; nothing here retries.

use crate::api::suite_config::SuiteConfig;
use crate::api::test_data::{LoginTestData, Messages};
use crate::assertions::{Expectation, expect, expect_page};
use crate::error::Result;
use crate::protocol::engine::Engine;
use crate::protocol::locator::ElementRef;
use crate::protocol::resolver::resolve;
use crate::protocol::screenshot::take_screenshot;
use crate::registry::Registry;
use std::path::PathBuf;

/// Registry group holding the login screen's locators
pub const LOGIN_GROUP: &str = "LOGIN";

/// Login screen facade.
///
/// # Example
///
/// ```ignore
/// use e2e_locators::{LoginPage, Registry, SuiteConfig};
///
/// let registry = Registry::builtin()?;
/// let config = SuiteConfig::from_env()?;
/// let login = LoginPage::new(&page, &registry, &config)?;
///
/// login.goto().await?;
/// login.login_with_valid_credentials().await?;
/// ```
pub struct LoginPage<'a, E: Engine + ?Sized> {
    engine: &'a E,
    config: &'a SuiteConfig,
    pub email_input: ElementRef,
    pub password_input: ElementRef,
    pub login_button: ElementRef,
    pub error_message: ElementRef,
    pub success_message: ElementRef,
    pub forgot_password_link: ElementRef,
    pub remember_me_checkbox: ElementRef,
    pub login_form: ElementRef,
    pub validation_error: ElementRef,
    pub first_attempt_label: ElementRef,
    pub toast_message: ElementRef,
    pub blocked_user: ElementRef,
}

impl<'a, E: Engine + ?Sized> LoginPage<'a, E> {
    /// Binds the page object to `engine`.
    ///
    /// Fails with `UnknownLocator` if the registry lacks one of the login entries.
    pub fn new(engine: &'a E, registry: &Registry, config: &'a SuiteConfig) -> Result<Self> {
        let locate = |key: &str| -> Result<ElementRef> {
            Ok(resolve(engine, registry.get(LOGIN_GROUP, key)?))
        };

        Ok(Self {
            engine,
            config,
            email_input: locate("EMAIL_INPUT")?,
            password_input: locate("PASSWORD_INPUT")?,
            login_button: locate("LOGIN_BUTTON")?,
            error_message: locate("ERROR_MESSAGE")?,
            success_message: locate("SUCCESS_MESSAGE")?,
            forgot_password_link: locate("FORGOT_PASSWORD_LINK")?,
            remember_me_checkbox: locate("REMEMBER_ME_CHECKBOX")?,
            login_form: locate("LOGIN_FORM")?,
            validation_error: locate("VALIDATION_ERROR")?,
            first_attempt_label: locate("FIRST_ATTEMPT_LABEL")?,
            toast_message: locate("TOAST_MESSAGE")?,
            blocked_user: locate("BLOCKED_USER")?,
        })
    }

    fn expect(&self, target: &ElementRef) -> Expectation<'a, E> {
        expect(self.engine, target.clone()).with_timeout(self.config.timeout)
    }

    async fn visible(&self, target: &ElementRef) -> Result<()> {
        self.engine.wait_visible(target, self.config.timeout).await
    }

    /// Navigates to `{base_url}/login`.
    pub async fn goto(&self) -> Result<()> {
        self.engine.navigate(&self.config.url("/login")).await
    }

    pub async fn wait_for_page_load(&self) -> Result<()> {
        self.engine.wait_for_load().await
    }

    pub async fn fill_email(&self, email: &str) -> Result<()> {
        self.visible(&self.email_input).await?;
        self.engine.fill(&self.email_input, email).await
    }

    pub async fn fill_password(&self, password: &str) -> Result<()> {
        self.visible(&self.password_input).await?;
        self.engine.fill(&self.password_input, password).await
    }

    pub async fn click_login(&self) -> Result<()> {
        self.visible(&self.login_button).await?;
        self.engine.click(&self.login_button).await
    }

    /// Fills both fields and submits.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        tracing::debug!("Logging in as {}", email);
        self.fill_email(email).await?;
        self.fill_password(password).await?;
        self.click_login().await
    }

    pub async fn login_with_valid_credentials(&self) -> Result<()> {
        self.login(LoginTestData::VALID_EMAIL, LoginTestData::VALID_PASSWORD)
            .await
    }

    pub async fn login_with_invalid_credentials(&self) -> Result<()> {
        self.login(LoginTestData::INVALID_EMAIL, LoginTestData::INVALID_PASSWORD)
            .await
    }

    pub async fn clear_email(&self) -> Result<()> {
        self.visible(&self.email_input).await?;
        self.engine.clear(&self.email_input).await
    }

    pub async fn clear_password(&self) -> Result<()> {
        self.visible(&self.password_input).await?;
        self.engine.clear(&self.password_input).await
    }

    pub async fn clear_form(&self) -> Result<()> {
        self.clear_email().await?;
        self.clear_password().await
    }

    pub async fn toggle_remember_me(&self) -> Result<()> {
        self.visible(&self.remember_me_checkbox).await?;
        self.engine.click(&self.remember_me_checkbox).await
    }

    pub async fn click_forgot_password(&self) -> Result<()> {
        self.visible(&self.forgot_password_link).await?;
        self.engine.click(&self.forgot_password_link).await
    }

    pub async fn email_value(&self) -> Result<String> {
        self.engine.input_value(&self.email_input).await
    }

    pub async fn password_value(&self) -> Result<String> {
        self.engine.input_value(&self.password_input).await
    }

    pub fn current_url(&self) -> String {
        self.engine.current_url()
    }

    /// Saves a full-page screenshot under the configured results directory.
    pub async fn screenshot(&self, name: &str) -> Result<PathBuf> {
        take_screenshot(self.engine, &self.config.results_dir, name).await
    }

    /// Email, password and submit button are all visible.
    pub async fn expect_login_form_visible(&self) -> Result<()> {
        self.expect(&self.email_input).to_be_visible().await?;
        self.expect(&self.password_input).to_be_visible().await?;
        self.expect(&self.login_button).to_be_visible().await
    }

    /// URL matches `{base_url}/login`.
    pub async fn expect_on_login_page(&self) -> Result<()> {
        let pattern = format!("{}/login", regex::escape(&self.config.base_url));
        expect_page(self.engine)
            .with_timeout(self.config.timeout)
            .to_have_url(&pattern)
            .await
    }

    pub async fn expect_error_message(&self) -> Result<()> {
        self.expect(&self.error_message).to_be_visible().await
    }

    /// Some element whose text contains `message` is visible.
    pub async fn expect_specific_error_message(&self, message: &str) -> Result<()> {
        let target = self.engine.locate_by_text(message);
        self.expect(&target).to_be_visible().await
    }

    pub async fn expect_blocked_user_message(&self) -> Result<()> {
        self.expect(&self.blocked_user).to_be_visible().await?;
        self.expect(&self.blocked_user)
            .to_have_text(Messages::USER_BLOCKED)
            .await
    }

    pub async fn expect_toast_message(&self) -> Result<()> {
        self.expect(&self.toast_message).to_be_visible().await
    }

    /// The failed-attempt counter shows the first attempt.
    pub async fn expect_first_attempt_message(&self) -> Result<()> {
        self.expect(&self.first_attempt_label).to_be_visible().await
    }

    pub async fn expect_email_empty(&self) -> Result<()> {
        self.expect(&self.email_input).to_have_value("").await
    }

    pub async fn expect_password_empty(&self) -> Result<()> {
        self.expect(&self.password_input).to_have_value("").await
    }

    pub async fn expect_remember_me_checked(&self) -> Result<()> {
        self.expect(&self.remember_me_checkbox).to_be_checked().await
    }

    pub async fn expect_remember_me_unchecked(&self) -> Result<()> {
        self.expect(&self.remember_me_checkbox)
            .to_be_unchecked()
            .await
    }

    pub async fn expect_forgot_password_link_visible(&self) -> Result<()> {
        self.expect(&self.forgot_password_link).to_be_visible().await
    }

    pub async fn expect_login_button_enabled(&self) -> Result<()> {
        self.expect(&self.login_button).to_be_enabled().await
    }

    pub async fn expect_login_button_disabled(&self) -> Result<()> {
        self.expect(&self.login_button).to_be_disabled().await
    }
}
