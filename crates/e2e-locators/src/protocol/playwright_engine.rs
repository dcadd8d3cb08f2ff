// Engine implementation for a live playwright-rs Page
//
// Every call builds a fresh playwright Locator from the ElementRef's
// selector, so references stay valid across navigations. The selector
// strings rendered by the resolver (`[data-testid=...]`, `text=...`,
// `xpath=...`) are native Playwright selector syntax.
//
// Navigation waits for the `load` event, so `wait_for_load` keeps the
// trait's no-op default.

use crate::error::{Error, Result};
use crate::protocol::engine::Engine;
use crate::protocol::locator::ElementRef;
use async_trait::async_trait;
use playwright_rs::{GotoOptions, Page, ScreenshotOptions, WaitUntil};
use std::path::Path;

impl From<playwright_rs::Error> for Error {
    fn from(err: playwright_rs::Error) -> Self {
        match err {
            playwright_rs::Error::Timeout(msg) => Error::Timeout(msg),
            playwright_rs::Error::ElementNotFound(selector) => Error::ElementNotFound(selector),
            other => {
                let message = other.to_string();
                if ACTIONABILITY_FAILURES.iter().any(|m| message.contains(m)) {
                    Error::NotActionable(message)
                } else {
                    Error::Engine(message)
                }
            }
        }
    }
}

// Driver messages for an element that is there but cannot take the action yet.
const ACTIONABILITY_FAILURES: &[&str] = &[
    "intercepts pointer events",
    "not attached to the DOM",
    "detached",
    "element is not stable",
];

#[async_trait]
impl Engine for Page {
    async fn navigate(&self, url: &str) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        let options = GotoOptions::new().wait_until(WaitUntil::Load);
        self.goto(url, Some(options)).await?;
        Ok(())
    }

    async fn is_visible(&self, target: &ElementRef) -> Result<bool> {
        Ok(self.locator(target.selector()).await.is_visible().await?)
    }

    async fn fill(&self, target: &ElementRef, value: &str) -> Result<()> {
        Ok(self.locator(target.selector()).await.fill(value, None).await?)
    }

    async fn clear(&self, target: &ElementRef) -> Result<()> {
        Ok(self.locator(target.selector()).await.clear(None).await?)
    }

    async fn click(&self, target: &ElementRef) -> Result<()> {
        Ok(self.locator(target.selector()).await.click(None).await?)
    }

    async fn text_content(&self, target: &ElementRef) -> Result<Option<String>> {
        Ok(self.locator(target.selector()).await.text_content().await?)
    }

    async fn input_value(&self, target: &ElementRef) -> Result<String> {
        Ok(self.locator(target.selector()).await.input_value(None).await?)
    }

    async fn is_checked(&self, target: &ElementRef) -> Result<bool> {
        Ok(self.locator(target.selector()).await.is_checked().await?)
    }

    async fn is_enabled(&self, target: &ElementRef) -> Result<bool> {
        Ok(self.locator(target.selector()).await.is_enabled().await?)
    }

    fn current_url(&self) -> String {
        self.url()
    }

    async fn title(&self) -> Result<String> {
        Ok(Page::title(self).await?)
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        let options = ScreenshotOptions::builder().full_page(true).build();
        self.screenshot_to_file(path, Some(options)).await?;
        Ok(())
    }
}
