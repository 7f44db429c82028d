// ABOUTME: Session package - local credential cache and background validity monitoring
// ABOUTME: Detects externally revoked sessions and forces a clean local wipe

pub mod error;
pub mod monitor;
pub mod store;

pub use error::{SessionError, SessionResult};
pub use monitor::{
    CheckOutcome, MonitorConfig, SessionEvent, SessionMonitor, DEFAULT_POLL_INTERVAL,
    DEFAULT_PROBE_TIMEOUT,
};
pub use store::{CredentialStore, FileCredentialStore};
