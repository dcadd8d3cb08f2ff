// Protocol - Descriptors, element references and the engine seam
//
// Architecture:
// - Descriptors are symbolic and document-independent
// - The resolver turns a descriptor into a lazy ElementRef via an Engine
// - Everything that waits or acts (retry, screenshots, assertions, page
//   objects) goes through the Engine trait

pub mod descriptor;
pub mod engine;
pub mod locator;
#[cfg(feature = "playwright")]
pub mod playwright_engine;
pub mod resolver;
pub mod retry;
pub mod screenshot;

pub use descriptor::{Descriptor, DescriptorKind, RawLocator, TEST_ID_ATTRIBUTE};
pub use engine::Engine;
pub use locator::ElementRef;
pub use resolver::{resolve, resolve_raw};
pub use retry::{RetryOptions, click_with_retry};
pub use screenshot::{screenshot_file_name, take_screenshot};
