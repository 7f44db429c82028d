// ABOUTME: Background session monitor with explicit start/stop lifecycle
// ABOUTME: Polls local and backend session validity; broadcasts invalidation events

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, RwLock};
use tokio::time;
use tracing::{debug, info, warn};

use opsdesk_gateway::{GatewayError, RemoteGateway};

use crate::store::CredentialStore;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session is gone; local artifacts have been cleared and the
    /// shell must return to the login screen.
    Invalidated { reason: String },
}

/// Outcome of one validation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Valid,
    /// The backend probe failed transiently; treated as still valid to
    /// avoid spurious logouts. No retry until the next tick or focus event.
    FailedOpen,
    Invalidated,
}

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub poll_interval: Duration,
    pub probe_timeout: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            poll_interval: DEFAULT_POLL_INTERVAL,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

/// Injectable session monitor. Constructed explicitly, started and stopped
/// by the shell, observed through a broadcast subscription.
pub struct SessionMonitor {
    gateway: Arc<dyn RemoteGateway>,
    store: Arc<dyn CredentialStore>,
    config: MonitorConfig,
    running: Arc<RwLock<bool>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionMonitor {
    pub fn new(
        gateway: Arc<dyn RemoteGateway>,
        store: Arc<dyn CredentialStore>,
        config: MonitorConfig,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(8);
        Arc::new(SessionMonitor {
            gateway,
            store,
            config,
            running: Arc::new(RwLock::new(false)),
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Start the polling loop. Idempotent; a second start is a no-op while
    /// the loop is running.
    pub async fn start(self: &Arc<Self>) {
        let mut running = self.running.write().await;
        if *running {
            return;
        }
        *running = true;
        drop(running);

        let monitor = Arc::clone(self);
        tokio::spawn(async move {
            info!(interval_secs = monitor.config.poll_interval.as_secs(), "session monitor started");
            let mut ticker = time::interval(monitor.config.poll_interval);
            // The first tick fires immediately; skip it so start() does not
            // race the shell's own initial check.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if !*monitor.running.read().await {
                    info!("session monitor stopped");
                    break;
                }
                if monitor.check_now().await == CheckOutcome::Invalidated {
                    break;
                }
            }
        });
    }

    pub async fn stop(&self) {
        *self.running.write().await = false;
    }

    /// Run one validation cycle. Also serves event-driven checks (the
    /// equivalent of tab-focus revalidation in the browser console).
    pub async fn check_now(&self) -> CheckOutcome {
        // Local check first: no stored credential means no session.
        if !self.store.has_credentials() {
            return self.invalidate("no local session").await;
        }

        // Backend cross-check is authoritative for revocation but fails
        // open on transient trouble.
        let probe = time::timeout(self.config.probe_timeout, self.gateway.session_status()).await;
        match probe {
            Ok(Ok(status)) if status.is_active() => {
                debug!("session confirmed valid");
                self.store.record_validation(chrono::Utc::now());
                CheckOutcome::Valid
            }
            Ok(Ok(_)) => self.invalidate("session revoked by backend").await,
            Ok(Err(e)) if e.is_auth_failure() => self.invalidate("backend rejected session").await,
            Ok(Err(GatewayError::Timeout(_))) | Err(_) => {
                warn!("session probe timed out; assuming still valid");
                CheckOutcome::FailedOpen
            }
            Ok(Err(e)) => {
                warn!(error = %e, "session probe failed; assuming still valid");
                CheckOutcome::FailedOpen
            }
        }
    }

    async fn invalidate(&self, reason: &str) -> CheckOutcome {
        warn!(reason, "session invalidated; clearing local artifacts");
        if let Err(e) = self.store.clear_all() {
            warn!(error = %e, "failed to clear credential cache");
        }
        // Nobody listening is fine; the shell may already be on its way out.
        let _ = self.events.send(SessionEvent::Invalidated {
            reason: reason.to_string(),
        });
        *self.running.write().await = false;
        CheckOutcome::Invalidated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionResult;
    use chrono::{DateTime, Utc};
    use opsdesk_gateway::{MockRemoteGateway, SessionStatus};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn active_status() -> SessionStatus {
        serde_json::from_str(r#"{"valid": true}"#).unwrap()
    }

    fn revoked_status() -> SessionStatus {
        serde_json::from_str(r#"{"valid": true, "revoked": true}"#).unwrap()
    }

    struct FakeStore {
        has_token: AtomicBool,
        cleared: AtomicBool,
    }

    impl FakeStore {
        fn with_token() -> Arc<Self> {
            Arc::new(FakeStore {
                has_token: AtomicBool::new(true),
                cleared: AtomicBool::new(false),
            })
        }
    }

    impl CredentialStore for FakeStore {
        fn token(&self) -> Option<String> {
            if self.has_token.load(Ordering::SeqCst) {
                Some("tok".to_string())
            } else {
                None
            }
        }
        fn last_validation(&self) -> Option<DateTime<Utc>> {
            None
        }
        fn record_validation(&self, _at: DateTime<Utc>) {}
        fn cached_endpoint(&self) -> Option<String> {
            None
        }
        fn set_cached_endpoint(&self, _url: &str) {}
        fn clear_all(&self) -> SessionResult<()> {
            self.has_token.store(false, Ordering::SeqCst);
            self.cleared.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn valid_session_passes() {
        let mut gateway = MockRemoteGateway::new();
        gateway
            .expect_session_status()
            .returning(|| Ok(active_status()));

        let store = FakeStore::with_token();
        let monitor = SessionMonitor::new(Arc::new(gateway), store.clone(), MonitorConfig::default());

        assert_eq!(monitor.check_now().await, CheckOutcome::Valid);
        assert!(!store.cleared.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn revoked_flag_is_authoritative_even_when_valid() {
        let mut gateway = MockRemoteGateway::new();
        gateway
            .expect_session_status()
            .times(1)
            .returning(|| Ok(revoked_status()));

        let store = FakeStore::with_token();
        let monitor = SessionMonitor::new(Arc::new(gateway), store.clone(), MonitorConfig::default());
        let mut events = monitor.subscribe();

        assert_eq!(monitor.check_now().await, CheckOutcome::Invalidated);
        assert!(store.cleared.load(Ordering::SeqCst));
        match events.try_recv().unwrap() {
            SessionEvent::Invalidated { reason } => {
                assert!(reason.contains("revoked"));
            }
        }
    }

    #[tokio::test]
    async fn unauthorized_probe_invalidates() {
        let mut gateway = MockRemoteGateway::new();
        gateway.expect_session_status().returning(|| {
            Err(GatewayError::Unauthorized("expired".to_string()))
        });

        let store = FakeStore::with_token();
        let monitor = SessionMonitor::new(Arc::new(gateway), store.clone(), MonitorConfig::default());

        assert_eq!(monitor.check_now().await, CheckOutcome::Invalidated);
        assert!(store.cleared.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn transient_failures_fail_open() {
        let mut gateway = MockRemoteGateway::new();
        let mut call = 0;
        gateway.expect_session_status().returning(move || {
            call += 1;
            if call == 1 {
                Err(GatewayError::Timeout("deadline elapsed".to_string()))
            } else {
                Err(GatewayError::Network("connection refused".to_string()))
            }
        });

        let store = FakeStore::with_token();
        let monitor = SessionMonitor::new(Arc::new(gateway), store.clone(), MonitorConfig::default());
        let mut events = monitor.subscribe();

        assert_eq!(monitor.check_now().await, CheckOutcome::FailedOpen);
        assert_eq!(monitor.check_now().await, CheckOutcome::FailedOpen);
        assert!(!store.cleared.load(Ordering::SeqCst));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn missing_local_credentials_invalidate_without_probe() {
        // No session_status expectation: a probe would panic the mock.
        let gateway = MockRemoteGateway::new();
        let store = FakeStore::with_token();
        store.has_token.store(false, Ordering::SeqCst);

        let monitor = SessionMonitor::new(Arc::new(gateway), store.clone(), MonitorConfig::default());
        assert_eq!(monitor.check_now().await, CheckOutcome::Invalidated);
    }
}
