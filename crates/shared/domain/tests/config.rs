use jobchat_domain::config::{AppConfig, AssistantConfig, LoggingConfig, StorageConfig};
use serde_json::json;
use std::path::PathBuf;

#[test]
fn config_defaults_are_sane() {
    let assistant = AssistantConfig::default();
    assert!(assistant.endpoint.starts_with("https://"));
    assert_eq!(assistant.max_tokens, 1000);
    assert!(!assistant.fallback_message.is_empty());

    let storage = StorageConfig::default();
    assert_eq!(storage.data_dir, PathBuf::from(".jobchat"));

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.directory.is_none());
    assert!(logging.security_trail);
}

#[test]
fn app_config_deserializes() {
    let raw = json!({
        "vault": { "iterations": 250_000 },
        "audit": { "capacity": 20 },
        "storage": { "data_dir": "/tmp/jobchat", "file_name": "kv.json" },
        "logging": { "level": "debug", "directory": "/tmp/jobchat/logs", "json": true }
    });

    let cfg: AppConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.vault.iterations, 250_000);
    assert_eq!(cfg.vault.package_key, "encrypted_api_key");
    assert_eq!(cfg.audit.capacity, 20);
    assert_eq!(cfg.storage.file_path(), PathBuf::from("/tmp/jobchat/kv.json"));
    assert!(cfg.logging.json);
}
