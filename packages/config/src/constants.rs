// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Opsdesk

// Backend API Configuration
pub const OPSDESK_API_URL: &str = "OPSDESK_API_URL";
pub const OPSDESK_API_TOKEN: &str = "OPSDESK_API_TOKEN";
pub const OPSDESK_HTTP_TIMEOUT_SECS: &str = "OPSDESK_HTTP_TIMEOUT_SECS";

// Session Monitoring
pub const OPSDESK_SESSION_POLL_SECS: &str = "OPSDESK_SESSION_POLL_SECS";
pub const OPSDESK_SESSION_PROBE_TIMEOUT_SECS: &str = "OPSDESK_SESSION_PROBE_TIMEOUT_SECS";

// Logging
pub const OPSDESK_LOG: &str = "OPSDESK_LOG";
