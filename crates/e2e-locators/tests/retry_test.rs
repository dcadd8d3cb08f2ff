// Integration tests for click_with_retry
//
// Tests cover:
// - An element that becomes visible on the second probe is clicked once
// - A never-visible element exhausts every attempt and returns the wait error
// - Zero or negative attempt counts still make exactly one attempt
// - Non-transient engine errors are returned without retrying
// - A click intercepted by another element is retried like a hidden one

use e2e_locators::testing::{MemoryElement, MemoryPage};
use e2e_locators::{Descriptor, Error, RetryOptions, click_with_retry};
use std::time::Duration;

fn fast(max_attempts: i32) -> RetryOptions {
    RetryOptions::new()
        .max_attempts(max_attempts)
        .backoff(Duration::from_millis(1))
        .visible_timeout(Duration::ZERO)
}

#[tokio::test]
async fn test_succeeds_on_second_attempt() {
    let page = MemoryPage::new()
        .with_element(MemoryElement::with_test_id("user-menu").visible_after_probes(1));

    click_with_retry(&page, &Descriptor::test_id("user-menu"), Some(fast(3)))
        .await
        .expect("Click should succeed on retry");

    assert_eq!(page.probe_count(), 2);
    assert_eq!(page.click_count(), 1);
}

#[tokio::test]
async fn test_exhausts_attempts_and_propagates_error() {
    let page = MemoryPage::new().with_element(MemoryElement::with_test_id("user-menu").hidden());

    let err = click_with_retry(&page, &Descriptor::test_id("user-menu"), Some(fast(3)))
        .await
        .expect_err("Click should fail");

    assert!(matches!(err, Error::Timeout(_)), "{:?}", err);
    assert_eq!(page.probe_count(), 3);
    assert_eq!(page.click_count(), 0);
}

#[tokio::test]
async fn test_non_positive_attempts_make_one_attempt() {
    for max_attempts in [0, -5] {
        let page = MemoryPage::new();

        let err = click_with_retry(&page, &Descriptor::css("#missing"), Some(fast(max_attempts)))
            .await
            .expect_err("Click should fail");

        assert!(matches!(err, Error::Timeout(_)), "{:?}", err);
        assert_eq!(page.probe_count(), 1, "max_attempts = {}", max_attempts);
    }
}

#[tokio::test]
async fn test_non_transient_error_is_not_retried() {
    let page =
        MemoryPage::new().with_element(MemoryElement::with_test_id("submit-button").disabled());

    let err = click_with_retry(&page, &Descriptor::test_id("submit-button"), Some(fast(5)))
        .await
        .expect_err("Click on disabled element should fail");

    assert!(matches!(err, Error::Engine(_)), "{:?}", err);
    assert_eq!(page.probe_count(), 1);
}

#[tokio::test]
async fn test_intercepted_click_is_retried() {
    let page = MemoryPage::new()
        .with_element(MemoryElement::with_test_id("user-menu").covered_for_clicks(1));

    click_with_retry(&page, &Descriptor::test_id("user-menu"), Some(fast(3)))
        .await
        .expect("Click should succeed once the element is uncovered");

    assert_eq!(page.probe_count(), 2);
    assert_eq!(page.click_count(), 1);

    let page = MemoryPage::new()
        .with_element(MemoryElement::with_test_id("user-menu").covered_for_clicks(5));

    let err = click_with_retry(&page, &Descriptor::test_id("user-menu"), Some(fast(2)))
        .await
        .expect_err("Click should fail while the element stays covered");

    assert!(matches!(err, Error::NotActionable(_)), "{:?}", err);
    assert_eq!(page.probe_count(), 2);
    assert_eq!(page.click_count(), 0);
}

#[tokio::test]
async fn test_each_descriptor_kind_is_clickable() {
    let page = MemoryPage::new()
        .with_element(MemoryElement::with_test_id("a"))
        .with_element(MemoryElement::new().text("Open settings"))
        .with_element(MemoryElement::new().id("save"))
        .with_element(MemoryElement::new().selector("xpath=//nav/a[1]"));

    for descriptor in [
        Descriptor::test_id("a"),
        Descriptor::text("Open settings"),
        Descriptor::css("#save"),
        Descriptor::xpath("//nav/a[1]"),
    ] {
        click_with_retry(&page, &descriptor, Some(fast(1)))
            .await
            .unwrap_or_else(|e| panic!("Click on {} failed: {}", descriptor, e));
    }

    assert_eq!(page.click_count(), 4);
}
