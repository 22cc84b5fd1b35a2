//! Security log feature slice.
//!
//! Keeps a bounded trail of security-relevant events in the key-value store, next to the
//! credential records. Each event is also emitted through `tracing` on the `security`
//! target so it reaches the regular log sinks.
//!
//! Recording never fails the caller. Persistence problems are reported through `tracing`
//! and otherwise ignored.

mod error;
mod event;

pub use crate::error::{AuditError, AuditErrorExt};
pub use crate::event::{SecurityEvent, SecurityLogEntry};

use chrono::Utc;
use jobchat_domain::config::AuditConfig;
use jobchat_storage::KeyValueStore;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{info, warn};

/// `tracing` target for security events.
pub const SECURITY_TARGET: &str = "security";

/// A client identifier for this build, e.g. `jobchat/0.1.0 (linux)`.
#[must_use]
pub fn default_client_id() -> String {
    format!("jobchat/{} ({})", env!("CARGO_PKG_VERSION"), std::env::consts::OS)
}

/// Bounded, persisted security event log.
#[derive(Debug)]
pub struct SecurityLog<S: KeyValueStore = Arc<dyn KeyValueStore>> {
    store: S,
    key: String,
    capacity: usize,
    client_id: String,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> SecurityLog<S> {
    /// Creates a log writing to `config.log_key`.
    ///
    /// `client_id` is truncated to `config.client_id_max_chars` characters.
    pub fn new(store: S, config: &AuditConfig, client_id: impl Into<String>) -> Self {
        let client_id: String = client_id.into().chars().take(config.client_id_max_chars).collect();
        Self {
            store,
            key: config.log_key.clone(),
            capacity: config.capacity,
            client_id,
            write_lock: Mutex::new(()),
        }
    }

    /// Appends an event, dropping the oldest entries beyond capacity.
    ///
    /// `details` should be a JSON object; any other value is stored under `"value"`.
    pub fn record(&self, event: SecurityEvent, details: Value) {
        let details = match details {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => Map::from_iter([("value".to_owned(), other)]),
        };

        let rendered = Value::Object(details.clone());
        if event.is_failure() {
            warn!(target: SECURITY_TARGET, event = event.as_str(), details = %rendered, "Security event");
        } else {
            info!(target: SECURITY_TARGET, event = event.as_str(), details = %rendered, "Security event");
        }

        let entry = SecurityLogEntry {
            timestamp: Utc::now(),
            event,
            details,
            user_agent: self.client_id.clone(),
        };

        if let Err(e) = self.append(entry) {
            warn!(target: SECURITY_TARGET, error = %e, "Failed to persist security event");
        }
    }

    /// All retained entries, oldest first. An unreadable log reads as empty.
    #[must_use]
    pub fn entries(&self) -> Vec<SecurityLogEntry> {
        self.load().map(Vec::from).unwrap_or_else(|e| {
            warn!(target: SECURITY_TARGET, error = %e, "Security log is unreadable");
            Vec::new()
        })
    }

    /// Removes every entry.
    ///
    /// # Errors
    /// Returns [`AuditError::Storage`] if the store cannot be written.
    pub fn clear(&self) -> Result<(), AuditError> {
        let _guard = self.write_lock.lock();
        self.store.remove(&self.key).context("Failed to clear security log")
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    fn append(&self, entry: SecurityLogEntry) -> Result<(), AuditError> {
        let _guard = self.write_lock.lock();

        let mut entries = self.load().unwrap_or_else(|e| {
            warn!(target: SECURITY_TARGET, error = %e, "Discarding unreadable security log");
            VecDeque::new()
        });

        entries.push_back(entry);
        while entries.len() > self.capacity {
            entries.pop_front();
        }

        let encoded = serde_json::to_string(&entries).context("Failed to encode security log")?;
        self.store.set(&self.key, &encoded).context("Failed to persist security log")
    }

    fn load(&self) -> Result<VecDeque<SecurityLogEntry>, AuditError> {
        let Some(raw) = self.store.get(&self.key).context("Failed to read security log")? else {
            return Ok(VecDeque::new());
        };
        serde_json::from_str(&raw).context("Failed to decode security log")
    }
}
