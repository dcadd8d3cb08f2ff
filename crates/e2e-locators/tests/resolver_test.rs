// Integration tests for descriptor resolution
//
// Tests cover:
// - Every descriptor kind resolves to its canonical selector
// - Resolution is lazy: references resolve before elements exist
// - Boundary descriptors (legacy strings, tagged JSON) and unknown kinds
// - Registry entries and their aliases resolve identically

use e2e_locators::testing::{MemoryDocument, MemoryElement, MemoryPage};
use e2e_locators::{
    Descriptor, DescriptorKind, Engine, Error, RawLocator, Registry, resolve, resolve_raw,
};

#[tokio::test]
async fn test_each_kind_renders_selector() {
    let page = MemoryPage::new();

    let cases = [
        (Descriptor::test_id("email-input"), DescriptorKind::TestId, "[data-testid=\"email-input\"]"),
        (Descriptor::text("Intentos: 1/"), DescriptorKind::Text, "text=Intentos: 1/"),
        (Descriptor::css("#login > button"), DescriptorKind::Css, "#login > button"),
        (Descriptor::xpath("//button[@type='submit']"), DescriptorKind::XPath, "xpath=//button[@type='submit']"),
    ];

    for (descriptor, kind, selector) in cases {
        let target = resolve(&page, &descriptor);
        assert_eq!(target.kind(), kind);
        assert_eq!(target.selector(), selector);
    }
}

#[tokio::test]
async fn test_reference_outlives_navigation() {
    let page = MemoryPage::new().with_document(
        "https://app.test/login",
        MemoryDocument::new("Login").element(MemoryElement::with_test_id("email-input")),
    );

    let email = resolve(&page, &Descriptor::test_id("email-input"));
    assert!(!page.is_visible(&email).await.unwrap());

    page.navigate("https://app.test/login").await.unwrap();
    assert!(page.is_visible(&email).await.unwrap());

    page.fill(&email, "admin@test.com").await.unwrap();
    assert_eq!(page.input_value(&email).await.unwrap(), "admin@test.com");
}

#[test]
fn test_raw_locators_from_json() {
    let page = MemoryPage::new();

    let legacy: RawLocator = serde_json::from_str(r#""[data-testid=\"login-button\"]""#).unwrap();
    assert_eq!(
        resolve_raw(&page, &legacy).unwrap().selector(),
        "[data-testid=\"login-button\"]"
    );

    let tagged: RawLocator =
        serde_json::from_str(r#"{ "type": "testid", "value": "login-button" }"#).unwrap();
    assert_eq!(
        resolve_raw(&page, &tagged).unwrap().selector(),
        "[data-testid=\"login-button\"]"
    );
}

#[test]
fn test_unknown_kind_fails_immediately() {
    let page = MemoryPage::new();
    let raw: RawLocator = serde_json::from_str(r#"{ "type": "role", "value": "button" }"#).unwrap();

    let err = resolve_raw(&page, &raw).expect_err("Unknown kind should fail");
    assert!(
        matches!(err, Error::UnsupportedDescriptorKind(ref kind) if kind == "role"),
        "{:?}",
        err
    );
}

#[test]
fn test_empty_value_is_rejected() {
    let err = Descriptor::new(DescriptorKind::TestId, "").expect_err("Empty value should fail");
    assert!(matches!(err, Error::InvalidDescriptor(_)), "{:?}", err);
}

#[test]
fn test_alias_resolves_like_canonical_entry() {
    let page = MemoryPage::new();
    let registry = Registry::builtin().expect("Failed to load registry");

    let canonical = registry.get("LOGIN", "EMAIL_INPUT").unwrap();
    let alias = registry.get("REGISTRATION", "EMAIL_INPUT").unwrap();

    assert_eq!(canonical, alias);
    assert_eq!(
        resolve(&page, canonical).selector(),
        resolve(&page, alias).selector()
    );
}
