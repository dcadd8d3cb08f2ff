// Resolver - Descriptor to ElementRef
//
// Resolution is synchronous and side-effect free: no waiting, no assertions.
// Waiting and asserting are composed by the caller (page objects, retry).

use crate::error::Result;
use crate::protocol::descriptor::{Descriptor, RawLocator};
use crate::protocol::engine::Engine;
use crate::protocol::locator::ElementRef;

/// Converts a descriptor into a lazy reference against `engine`'s document.
///
/// # Example
///
/// ```ignore
/// use e2e_locators::{resolve, Descriptor};
///
/// let email = resolve(&page, &Descriptor::test_id("email-input"));
/// page.fill(&email, "a@b.com").await?;
/// ```
pub fn resolve<E: Engine + ?Sized>(engine: &E, descriptor: &Descriptor) -> ElementRef {
    let target = match descriptor {
        Descriptor::TestId(value) => engine.locate_by_test_id(value),
        Descriptor::Text(value) => engine.locate_by_text(value),
        Descriptor::Css(selector) => engine.locate_by_css(selector),
        Descriptor::XPath(expression) => engine.locate_by_xpath(expression),
    };
    tracing::debug!("Resolved {} -> {}", descriptor, target.selector());
    target
}

/// Resolves an unvalidated boundary descriptor.
///
/// Bare strings are CSS. A tagged descriptor with an unknown `type` fails
/// immediately with `UnsupportedDescriptorKind`.
pub fn resolve_raw<E: Engine + ?Sized>(engine: &E, raw: &RawLocator) -> Result<ElementRef> {
    let descriptor = Descriptor::try_from(raw)?;
    Ok(resolve(engine, &descriptor))
}
