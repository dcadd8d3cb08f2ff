// DashboardPage - Page object for the post-login dashboard

use crate::api::suite_config::SuiteConfig;
use crate::api::test_data::Messages;
use crate::assertions::{expect, expect_page};
use crate::error::Result;
use crate::protocol::engine::Engine;
use crate::protocol::locator::ElementRef;
use crate::protocol::resolver::resolve;
use crate::protocol::retry::click_with_retry;
use crate::registry::Registry;

/// Registry group holding the dashboard's locators
pub const DASHBOARD_GROUP: &str = "DASHBOARD";

/// Dashboard facade.
///
/// The user menu is opened through `click_with_retry` with the suite's
/// retry options.
pub struct DashboardPage<'a, E: Engine + ?Sized> {
    engine: &'a E,
    registry: &'a Registry,
    config: &'a SuiteConfig,
    pub app_heading: ElementRef,
    pub user_menu: ElementRef,
    pub logout_button: ElementRef,
    pub sidebar_nav: ElementRef,
    pub main_content: ElementRef,
    pub welcome_message: ElementRef,
    pub user_profile: ElementRef,
    pub dashboard_stats: ElementRef,
    pub dashboard_title: ElementRef,
}

impl<'a, E: Engine + ?Sized> DashboardPage<'a, E> {
    pub fn new(engine: &'a E, registry: &'a Registry, config: &'a SuiteConfig) -> Result<Self> {
        let locate = |key: &str| -> Result<ElementRef> {
            Ok(resolve(engine, registry.get(DASHBOARD_GROUP, key)?))
        };

        Ok(Self {
            engine,
            registry,
            config,
            app_heading: locate("APP_HEADING")?,
            user_menu: locate("USER_MENU")?,
            logout_button: locate("LOGOUT_BUTTON")?,
            sidebar_nav: locate("SIDEBAR_NAV")?,
            main_content: locate("MAIN_CONTENT")?,
            welcome_message: locate("WELCOME_MESSAGE")?,
            user_profile: locate("USER_PROFILE")?,
            dashboard_stats: locate("DASHBOARD_STATS")?,
            dashboard_title: locate("DASHBOARD_TITLE")?,
        })
    }

    /// Document title.
    pub async fn title(&self) -> Result<String> {
        self.engine.title().await
    }

    /// Waits for load, then expects the URL to match `{base_url}/dashboard`.
    pub async fn expect_on_dashboard_page(&self) -> Result<()> {
        self.engine.wait_for_load().await?;
        let pattern = format!("{}/dashboard", regex::escape(&self.config.base_url));
        expect_page(self.engine)
            .with_timeout(self.config.timeout)
            .to_have_url(&pattern)
            .await
    }

    pub async fn expect_dashboard_title_visible(&self) -> Result<()> {
        expect(self.engine, self.dashboard_title.clone())
            .with_timeout(self.config.timeout)
            .to_be_visible()
            .await
    }

    /// Document title is the application's name.
    pub async fn expect_title_visible(&self) -> Result<()> {
        expect_page(self.engine)
            .with_timeout(self.config.timeout)
            .to_have_title(Messages::DASHBOARD_TITLE)
            .await
    }

    pub async fn open_user_menu(&self) -> Result<()> {
        let descriptor = self.registry.get(DASHBOARD_GROUP, "USER_MENU")?;
        click_with_retry(self.engine, descriptor, Some(self.config.retry.clone())).await
    }

    /// Opens the user menu and clicks logout.
    pub async fn logout(&self) -> Result<()> {
        self.open_user_menu().await?;
        self.engine
            .wait_visible(&self.logout_button, self.config.timeout)
            .await?;
        self.engine.click(&self.logout_button).await
    }
}
