#![allow(dead_code)]

use jobchat_assistant::{ChatSession, ScriptedProvider};
use jobchat_audit::SecurityLog;
use jobchat_domain::config::AuditConfig;
use jobchat_kernel::time::ManualClock;
use jobchat_storage::MemoryStore;
use jobchat_throttle::RequestThrottle;
use jobchat_vault::CredentialVault;
use jobchat_vault::algorithms::Aes;
use std::sync::Arc;
use std::time::Duration;

pub const CREDENTIAL: &str = "sk-session-credential-0123456789";
pub const PASSPHRASE: &str = "correct horse battery staple";

pub type TestSession = ChatSession<Arc<ScriptedProvider>, Arc<MemoryStore>, ManualClock>;

pub struct Harness {
    pub session: TestSession,
    pub provider: Arc<ScriptedProvider>,
    pub clock: ManualClock,
    pub store: Arc<MemoryStore>,
}

/// A locked session over an in-memory store with a manual clock.
///
/// # Panics
/// * If the vault cannot be built.
#[must_use]
pub fn harness(provider: ScriptedProvider) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let provider = Arc::new(provider);
    let clock = ManualClock::new();

    let vault = CredentialVault::<Aes>::builder()
        .store(Arc::clone(&store))
        .build()
        .expect("Vault setup failed");
    let audit = Arc::new(SecurityLog::new(Arc::clone(&store), &AuditConfig::default(), "tests"));
    let throttle =
        Arc::new(
        RequestThrottle::with_clock(10, Duration::from_secs(60), clock.clone())
            .expect("Throttle setup failed"),
    );

    let session = ChatSession::new(vault, audit, throttle, Arc::clone(&provider));

    Harness { session, provider, clock, store }
}

/// Like [`harness`], but already configured and unlocked with [`CREDENTIAL`].
///
/// # Panics
/// * If configuring the credential fails.
#[must_use]
pub fn unlocked(provider: ScriptedProvider) -> Harness {
    let mut h = harness(provider);
    h.session.configure_credentials(CREDENTIAL, PASSPHRASE).expect("configure credentials");
    h
}

/// Event names recorded so far, oldest first.
#[must_use]
pub fn events(session: &TestSession) -> Vec<&'static str> {
    session.audit().entries().iter().map(|e| e.event.as_str()).collect()
}
