// Login flow example - Page objects driving a real browser
//
// Shows: registry lookup, LoginPage/DashboardPage, retrying click, screenshot on failure
//
// Run with: cargo run -p e2e-locators --example login_flow --features playwright
// Point it at another deployment with E2E_BASE_URL.

use anyhow::Context;
use e2e_locators::{DashboardPage, LoginPage, Registry, SuiteConfig};
use playwright_rs::Playwright;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let registry = Registry::builtin()?;
    let config = SuiteConfig::from_env()?;

    let playwright = Playwright::launch().await?;
    let browser = playwright.chromium().launch().await?;
    let page = browser.new_page().await?;

    let login = LoginPage::new(&page, &registry, &config)?;
    login.goto().await?;
    login.expect_login_form_visible().await?;

    login.login_with_valid_credentials().await?;

    let dashboard = DashboardPage::new(&page, &registry, &config)?;
    if let Err(e) = dashboard.expect_on_dashboard_page().await {
        let shot = login.screenshot("login-failure").await?;
        println!("Screenshot: {}", shot.display());
        return Err(e).context("login did not reach the dashboard");
    }
    println!("Logged in: {}", dashboard.title().await?);

    dashboard.logout().await?;
    login.expect_on_login_page().await?;
    println!("Logged out");

    browser.close().await?;
    Ok(())
}
