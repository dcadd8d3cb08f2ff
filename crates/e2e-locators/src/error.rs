// Error types for e2e-locators

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for e2e-locators operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when resolving locators, driving pages or linting the suite
#[derive(Debug, Error)]
pub enum Error {
    /// Group or key is not declared in the registry
    ///
    /// This is a programming error in the page object or test that asked for it.
    /// It is never retried.
    #[error("Unknown locator: {group}.{key}")]
    UnknownLocator { group: String, key: String },

    /// Group name is not declared in the registry (neither as a group nor as a category)
    #[error("Unknown locator group: {0}")]
    UnknownGroup(String),

    /// Tagged descriptor carries a `type` this crate does not understand
    ///
    /// Supported kinds are `testid`, `text`, `css` and `xpath`.
    #[error("Unsupported descriptor kind: '{0}' (expected one of: testid, text, css, xpath)")]
    UnsupportedDescriptorKind(String),

    /// Descriptor is structurally invalid (e.g. empty value)
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// Registry declaration is inconsistent (duplicate group, duplicate key, alias cycle)
    #[error("Invalid registry: {0}")]
    InvalidRegistry(String),

    /// Element not found by selector
    ///
    /// Includes the selector that was used to locate the element.
    #[error("Element not found: selector '{0}'")]
    ElementNotFound(String),

    /// Element exists but is not visible, so it cannot be interacted with
    #[error("Element not visible: selector '{0}'")]
    NotVisible(String),

    /// Element is visible but the action could not land on it (covered by
    /// another element, detached mid-action, still animating)
    #[error("Element not actionable: {0}")]
    NotActionable(String),

    /// Timeout waiting for an element or page condition
    ///
    /// Contains context about what timed out and the timeout duration.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Assertion timeout (expect API)
    #[error("Assertion timeout: {0}")]
    AssertionTimeout(String),

    /// A required source file could not be read
    #[error("Failed to read '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file was read but its contents could not be understood
    #[error("Failed to parse '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid regular expression (URL patterns, naming rules)
    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Directory walk failed
    #[error("Directory scan failed: {0}")]
    Glob(String),

    /// Invalid argument provided to method or configuration
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure reported by the underlying automation engine that has no closer match
    #[error("Engine error: {0}")]
    Engine(String),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Returns true for environment/timing failures: element missing, hidden,
    /// not actionable yet, or a wait that timed out.
    ///
    /// Only these are candidates for the bounded click retry. Registry and
    /// descriptor errors are configuration mistakes and always fatal.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::ElementNotFound(_)
            | Error::NotVisible(_)
            | Error::NotActionable(_)
            | Error::Timeout(_) => true,
            Error::Context(_, inner) => inner.is_transient(),
            _ => false,
        }
    }
}

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Error::Glob(err.to_string())
    }
}

impl From<glob::GlobError> for Error {
    fn from(err: glob::GlobError) -> Self {
        Error::Glob(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(Error::Timeout("5000ms".into()).is_transient());
        assert!(Error::ElementNotFound("#x".into()).is_transient());
        assert!(Error::NotVisible("#x".into()).is_transient());
        assert!(Error::NotActionable("#x is covered".into()).is_transient());
        assert!(!Error::Engine("element '#x' is disabled".into()).is_transient());
        assert!(!Error::UnsupportedDescriptorKind("role".into()).is_transient());
        assert!(
            !Error::UnknownLocator {
                group: "LOGIN".into(),
                key: "NOPE".into()
            }
            .is_transient()
        );
    }

    #[test]
    fn test_context_keeps_classification() {
        let err = Error::Timeout("waiting".into()).context("click login");
        assert!(err.is_transient());
        assert_eq!(err.to_string(), "click login: Timeout: waiting");
    }

    #[test]
    fn test_unknown_locator_message() {
        let err = Error::UnknownLocator {
            group: "LOGIN".into(),
            key: "SUBMIT".into(),
        };
        assert_eq!(err.to_string(), "Unknown locator: LOGIN.SUBMIT");
    }
}
