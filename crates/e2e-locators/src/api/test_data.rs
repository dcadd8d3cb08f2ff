// Test data shared by page objects
//
// Mirrors suite/data/test-data.ts. Selectors never live here.

/// Environment origins
pub struct BaseUrls;

impl BaseUrls {
    pub const MAIN_APP: &'static str = "https://v0-react-frontend-application-gold.vercel.app";
    pub const STAGING: &'static str = "https://staging.example.com";
    pub const PRODUCTION: &'static str = "https://production.example.com";
}

/// Login form inputs
pub struct LoginTestData;

impl LoginTestData {
    pub const VALID_EMAIL: &'static str = "admin@test.com";
    pub const VALID_PASSWORD: &'static str = "password123";
    pub const INVALID_EMAIL: &'static str = "invalid@test.com";
    pub const INVALID_PASSWORD: &'static str = "wrongpassword";
    pub const INVALID_EMAIL_FORMAT: &'static str = "invalid-email";
}

/// Messages the application renders
pub struct Messages;

impl Messages {
    pub const INVALID_CREDENTIALS: &'static str = "Invalid email or password";
    pub const USER_BLOCKED: &'static str = "Usuario bloqueado después de 3 intentos fallidos";
    pub const DASHBOARD_TITLE: &'static str = "UI Automation Practice App";
}
