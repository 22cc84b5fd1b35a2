use jobchat_audit::SecurityLog;
use jobchat_domain::config::AuditConfig;
use jobchat_storage::MemoryStore;
use std::sync::Arc;

pub const CLIENT_ID: &str = "jobchat-tests/1.0";

#[must_use]
pub fn setup_log(config: &AuditConfig) -> (SecurityLog<Arc<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (SecurityLog::new(Arc::clone(&store), config, CLIENT_ID), store)
}
