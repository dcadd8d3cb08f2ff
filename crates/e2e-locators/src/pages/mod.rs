// Page objects
//
// One facade per screen. Each binds an engine, the registry and the suite
// configuration for the lifetime of a single test.

pub mod dashboard;
pub mod login;

pub use dashboard::DashboardPage;
pub use login::LoginPage;
