// ElementRef - Lazy element reference
//
// An ElementRef is the resolver's output. Like a Playwright Locator it is
// lazy: it stores the rendered selector only and is evaluated against the
// engine's *current* document on every action. Holding one across a
// navigation is therefore safe; it simply re-matches on the new document.
//
// ElementRef never owns a live DOM node. The engine owns those.

use crate::protocol::descriptor::DescriptorKind;
use std::fmt;

/// Reference to element(s) matching a selector in the engine's current document.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ElementRef {
    kind: DescriptorKind,
    selector: String,
}

impl ElementRef {
    /// Creates a reference from an already rendered selector.
    ///
    /// Engines call this from their `locate_by_*` methods; application code
    /// should go through `resolve()`.
    pub fn new(kind: DescriptorKind, selector: impl Into<String>) -> Self {
        Self {
            kind,
            selector: selector.into(),
        }
    }

    /// Returns the selector string for this reference
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Returns the strategy the reference was built from
    pub fn kind(&self) -> DescriptorKind {
        self.kind
    }

    /// Narrows to the first matching element.
    pub fn first(&self) -> ElementRef {
        self.nth(0)
    }

    /// Narrows to the nth matching element (0-indexed).
    pub fn nth(&self, index: i32) -> ElementRef {
        ElementRef::new(self.kind, format!("{} >> nth={}", self.selector, index))
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("selector", &self.selector)
            .finish()
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector)
    }
}
