//! Integration tests for the configuration control plane

use async_trait::async_trait;
use barque::adapters::database::memory::MemoryControlStore;
use barque::adapters::database::traits::ControlStore;
use barque::config::keys::ConfigValue;
use barque::config::redact::MASK;
use barque::config::schema::{Config, StorageType};
use barque::config::secret::secret_string;
use barque::control::ConfigStore;
use barque::domain::errors::{BarqueError, ConfigError, StorageError};
use serde_json::Value;
use std::sync::{Arc, Mutex};

fn filesystem_config() -> Config {
    let mut cfg = Config::default();
    cfg.storage.typ = StorageType::Filesystem;
    cfg.storage.filesystem.path = "/var/lib/barque".to_string();
    cfg
}

fn s3_config() -> Config {
    let mut cfg = Config::default();
    cfg.storage.typ = StorageType::S3;
    cfg.storage.s3.bucket = "backups".to_string();
    cfg.storage.s3.region = "eu-west-1".to_string();
    cfg.storage.s3.credentials.access_key_id = secret_string("AKIAEXAMPLE".to_string());
    cfg.storage.s3.credentials.secret_access_key = secret_string("sekrit".to_string());
    cfg
}

fn store_pair() -> (Arc<MemoryControlStore>, ConfigStore) {
    let mem = Arc::new(MemoryControlStore::new());
    let store = ConfigStore::new(mem.clone());
    (mem, store)
}

#[tokio::test]
async fn test_set_then_get_round_trips() {
    let (_, store) = store_pair();
    store.set_config(filesystem_config()).await.unwrap();

    let cfg = store.get_config().await.unwrap();
    assert_eq!(cfg.storage.typ, StorageType::Filesystem);
    assert_eq!(cfg.storage.filesystem.path, "/var/lib/barque");
}

#[tokio::test]
async fn test_reads_before_any_set_report_not_set() {
    let (_, store) = store_pair();

    assert!(matches!(
        store.get_config().await.unwrap_err(),
        BarqueError::Config(ConfigError::NotSet)
    ));
    assert!(matches!(
        store.get_config_var("pitr.enabled").await.unwrap_err(),
        BarqueError::Config(ConfigError::NotSet)
    ));
    assert!(matches!(
        store.get_config_yaml(true).await.unwrap_err(),
        BarqueError::Config(ConfigError::NotSet)
    ));
}

#[tokio::test]
async fn test_set_config_always_stamps_pitr_changed() {
    let (_, store) = store_pair();
    store.set_config(filesystem_config()).await.unwrap();
    let first = store.get_config().await.unwrap().pitr.changed;
    assert!(first > 0);

    // an identical re-set still refreshes the stamp
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    store.set_config(filesystem_config()).await.unwrap();
    let second = store.get_config().await.unwrap().pitr.changed;
    assert!(second > first);
}

#[tokio::test]
async fn test_set_config_var_noop_keeps_stamp() {
    let (_, store) = store_pair();
    store.set_config(filesystem_config()).await.unwrap();
    let stamp = store.get_config().await.unwrap().pitr.changed;

    // pitr.enabled defaults to false; re-applying false must not write
    store.set_config_var("pitr.enabled", "false").await.unwrap();
    assert_eq!(store.get_config().await.unwrap().pitr.changed, stamp);
}

#[tokio::test]
async fn test_set_config_var_transition_updates_stamp() {
    let (_, store) = store_pair();
    store.set_config(filesystem_config()).await.unwrap();
    let stamp = store.get_config().await.unwrap().pitr.changed;

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    store.set_config_var("pitr.enabled", "true").await.unwrap();

    let cfg = store.get_config().await.unwrap();
    assert!(cfg.pitr.enabled);
    assert!(cfg.pitr.changed > stamp);
    assert_eq!(
        store.get_config_var("pitr.enabled").await.unwrap(),
        ConfigValue::Bool(true)
    );
}

#[tokio::test]
async fn test_set_config_var_rejects_bad_boolean() {
    let (_, store) = store_pair();
    store.set_config(filesystem_config()).await.unwrap();

    let err = store.set_config_var("pitr.enabled", "yes").await.unwrap_err();
    assert!(matches!(
        err,
        BarqueError::Config(ConfigError::InvalidValue { .. })
    ));
}

#[tokio::test]
async fn test_set_config_var_rejects_unknown_key() {
    let (_, store) = store_pair();
    store.set_config(filesystem_config()).await.unwrap();

    let err = store.set_config_var("backup.cadence", "1h").await.unwrap_err();
    assert!(matches!(
        err,
        BarqueError::Config(ConfigError::InvalidKey(_))
    ));
}

#[tokio::test]
async fn test_set_config_var_text_key_leaves_stamp_alone() {
    let (_, store) = store_pair();
    store.set_config(s3_config()).await.unwrap();
    let stamp = store.get_config().await.unwrap().pitr.changed;

    store
        .set_config_var("storage.s3.prefix", "cluster-a")
        .await
        .unwrap();

    let cfg = store.get_config().await.unwrap();
    assert_eq!(cfg.storage.s3.prefix, "cluster-a");
    assert_eq!(cfg.pitr.changed, stamp);
}

#[tokio::test]
async fn test_get_config_var_resolves_scalars() {
    let (_, store) = store_pair();
    store.set_config(s3_config()).await.unwrap();

    assert_eq!(
        store.get_config_var("storage.type").await.unwrap(),
        ConfigValue::String("s3".to_string())
    );
    assert_eq!(
        store.get_config_var("storage.s3.region").await.unwrap(),
        ConfigValue::String("eu-west-1".to_string())
    );
}

#[tokio::test]
async fn test_yaml_export_masks_secrets_by_default() {
    let (_, store) = store_pair();
    store.set_config(s3_config()).await.unwrap();

    let redacted = store.get_config_yaml(true).await.unwrap();
    assert!(redacted.contains(MASK));
    assert!(!redacted.contains("sekrit"));
    assert!(!redacted.contains("AKIAEXAMPLE"));

    // redaction is presentation-only
    let full = store.get_config_yaml(false).await.unwrap();
    assert!(full.contains("sekrit"));
    assert!(full.contains("AKIAEXAMPLE"));
}

#[tokio::test]
async fn test_yaml_export_never_exposes_change_stamp() {
    let (_, store) = store_pair();
    store.set_config(filesystem_config()).await.unwrap();

    let yaml = store.get_config_yaml(false).await.unwrap();
    assert!(!yaml.contains("changed"));
}

#[tokio::test]
async fn test_yaml_import_round_trip() {
    let (_, store) = store_pair();

    let yaml = b"pitr:\n  enabled: true\nstorage:\n  type: filesystem\n  filesystem:\n    path: /srv/backups\n";
    store.set_config_yaml(yaml).await.unwrap();

    let cfg = store.get_config().await.unwrap();
    assert!(cfg.pitr.enabled);
    assert_eq!(cfg.storage.typ, StorageType::Filesystem);
    assert_eq!(cfg.storage.filesystem.path, "/srv/backups");
}

#[tokio::test]
async fn test_yaml_import_rejects_unknown_fields() {
    let (_, store) = store_pair();

    let yaml = b"pitr:\n  enabled: true\nretention: 7\n";
    let err = store.set_config_yaml(yaml).await.unwrap_err();
    assert!(matches!(err, BarqueError::Config(ConfigError::Decode(_))));

    // nothing was written
    assert!(matches!(
        store.get_config().await.unwrap_err(),
        BarqueError::Config(ConfigError::NotSet)
    ));
}

#[tokio::test]
async fn test_unknown_storage_tag_survives_round_trip() {
    let (_, store) = store_pair();

    let yaml = b"storage:\n  type: tape\n";
    store.set_config_yaml(yaml).await.unwrap();

    let cfg = store.get_config().await.unwrap();
    assert_eq!(cfg.storage.typ, StorageType::Unknown("tape".to_string()));

    // resolution reports the exact offending tag
    let err = store.storage_handle().await.err().unwrap();
    match err {
        BarqueError::Storage(StorageError::UnknownType(tag)) => assert_eq!(tag, "tape"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_storage_handle_without_destination_is_undefined() {
    let (_, store) = store_pair();
    store.set_config(Config::default()).await.unwrap();

    let err = store.storage_handle().await.err().unwrap();
    assert!(matches!(
        err,
        BarqueError::Storage(StorageError::Undefined)
    ));
}

// Two façades over the same document model two uncoordinated processes;
// with no coordination the later write simply stands.
#[tokio::test]
async fn test_interleaved_facades_last_write_wins() {
    let mem = Arc::new(MemoryControlStore::new());
    let a = ConfigStore::new(mem.clone());
    let b = ConfigStore::new(mem.clone());

    a.set_config(filesystem_config()).await.unwrap();
    b.set_config_var("storage.filesystem.path", "/mnt/other")
        .await
        .unwrap();

    let cfg = a.get_config().await.unwrap();
    assert_eq!(cfg.storage.filesystem.path, "/mnt/other");
}

/// Delegates to a memory store, landing one armed write on the inner store
/// after a read returns its snapshot. This is the exact interleaving of a
/// writer slipping between `set_config_var`'s no-op check and its decision.
struct RacingControlStore {
    inner: MemoryControlStore,
    after_read: Mutex<Option<(String, Value)>>,
}

impl RacingControlStore {
    fn new() -> Self {
        Self {
            inner: MemoryControlStore::new(),
            after_read: Mutex::new(None),
        }
    }

    fn arm(&self, path: &str, value: Value) {
        *self.after_read.lock().unwrap() = Some((path.to_string(), value));
    }
}

#[async_trait]
impl ControlStore for RacingControlStore {
    async fn fetch(&self) -> barque::domain::Result<Option<Value>> {
        let snapshot = self.inner.fetch().await?;
        let pending = self.after_read.lock().unwrap().take();
        if let Some(field) = pending {
            self.inner.set_fields(&[field]).await?;
        }
        Ok(snapshot)
    }

    async fn replace(&self, doc: Value) -> barque::domain::Result<()> {
        self.inner.replace(doc).await
    }

    async fn set_fields(&self, fields: &[(String, Value)]) -> barque::domain::Result<()> {
        self.inner.set_fields(fields).await
    }
}

// The no-op check reads, compares, then decides without isolation. A writer
// landing between the read and the decision is not observed: the call
// reports success for its value while the concurrent writer's value stands.
#[tokio::test]
async fn test_stale_noop_check_misses_concurrent_write() {
    let racing = Arc::new(RacingControlStore::new());
    let store = ConfigStore::new(racing.clone());

    let mut cfg = filesystem_config();
    cfg.pitr.enabled = true;
    store.set_config(cfg).await.unwrap();

    // a second writer flips the flag between this call's read and its
    // no-op decision
    racing.arm("pitr.enabled", Value::Bool(false));
    store.set_config_var("pitr.enabled", "true").await.unwrap();

    // the call succeeded as a no-op, so the concurrent false survives
    let cfg = store.get_config().await.unwrap();
    assert!(!cfg.pitr.enabled);
}
