// Public API types module
//
// Configuration and test data used across page objects and linters.
// These types provide builder patterns and environment overrides.

pub mod lint_options;
pub mod suite_config;
pub mod test_data;

pub use lint_options::LintOptions;
pub use suite_config::SuiteConfig;
pub use test_data::{BaseUrls, LoginTestData, Messages};
