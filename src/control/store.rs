//! The configuration control plane façade
//!
//! `ConfigStore` is a stateless façade over the singleton configuration
//! document. Many uncoordinated agent processes hold one of these against
//! the same deployment; every operation is a single short exchange with the
//! control database, and all safety derives from per-document update
//! atomicity there.
//!
//! There is no optimistic concurrency control. The no-op check
//! in [`ConfigStore::set_config_var`] reads, compares, and then writes in
//! separate statements, so a concurrent writer can land between them;
//! callers needing stronger guarantees must layer a compare-and-swap on
//! top. The integration tests pin this window.

use crate::adapters::database::traits::ControlStore;
use crate::adapters::storage::factory::create_storage;
use crate::adapters::storage::traits::Storage;
use crate::config::keys::{self, ConfigValue, PITR_CHANGED, PITR_ENABLED};
use crate::config::redact::redact;
use crate::config::schema::{Config, StorageType};
use crate::domain::errors::ConfigError;
use crate::domain::Result;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

/// Stateless façade over the shared configuration document.
pub struct ConfigStore {
    store: Arc<dyn ControlStore>,
}

impl ConfigStore {
    pub fn new(store: Arc<dyn ControlStore>) -> Self {
        Self { store }
    }

    /// Replaces the whole configuration document (creating it on first use).
    ///
    /// With the s3 tag active, the s3 settings are cast first and a failure
    /// aborts the call with nothing written. The PITR change stamp is
    /// refreshed on every whole-document set, whether or not the PITR
    /// settings changed; the single-key path below stamps only on a real
    /// transition.
    pub async fn set_config(&self, mut cfg: Config) -> Result<()> {
        if cfg.storage.typ == StorageType::S3 {
            cfg.storage.s3.cast()?;
        }

        cfg.pitr.changed = Utc::now().timestamp();
        let doc = cfg.to_document()?;
        self.store.replace(doc).await?;
        tracing::info!(storage = %cfg.storage.typ, "configuration replaced");
        Ok(())
    }

    /// Strict-decodes a YAML document and applies it via
    /// [`set_config`](Self::set_config). Unknown fields are rejected.
    pub async fn set_config_yaml(&self, buf: &[u8]) -> Result<()> {
        let cfg: Config =
            serde_yaml::from_slice(buf).map_err(|e| ConfigError::Decode(e.to_string()))?;
        self.set_config(cfg).await
    }

    /// Sets one configuration key from its textual value.
    ///
    /// `pitr.enabled` is coerced to a boolean; re-applying the stored value
    /// is a no-op (no write, no change-stamp touch), while a transition
    /// sets the flag and `pitr.changed` in the same atomic update. Every
    /// other key writes the raw string as-is and leaves the stamp alone.
    pub async fn set_config_var(&self, key: &str, value: &str) -> Result<()> {
        if !keys::is_valid_key(key) {
            return Err(ConfigError::InvalidKey(key.to_string()).into());
        }

        // Read the current value first; this doubles as the "was the
        // config ever set" check.
        let current = self.get_config_var(key).await?;

        match key {
            PITR_ENABLED => {
                let next: bool = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                    reason: "expected a boolean".to_string(),
                })?;
                if current == ConfigValue::Bool(next) {
                    tracing::debug!(key, value, "already set, skipping write");
                    return Ok(());
                }
                self.store
                    .set_fields(&[
                        (key.to_string(), Value::Bool(next)),
                        (
                            PITR_CHANGED.to_string(),
                            Value::from(Utc::now().timestamp()),
                        ),
                    ])
                    .await?;
                tracing::info!(enabled = next, "PITR mode changed");
                Ok(())
            }
            _ => {
                self.store
                    .set_fields(&[(key.to_string(), Value::String(value.to_string()))])
                    .await
            }
        }
    }

    /// Reads one configuration key as a scalar value.
    pub async fn get_config_var(&self, key: &str) -> Result<ConfigValue> {
        if !keys::is_valid_key(key) {
            return Err(ConfigError::InvalidKey(key.to_string()).into());
        }
        let doc = self.fetch_document().await?;
        Ok(keys::resolve(&doc, key)?)
    }

    /// Reads and decodes the whole configuration document.
    pub async fn get_config(&self) -> Result<Config> {
        let doc = self.fetch_document().await?;
        serde_json::from_value(doc)
            .map_err(|e| ConfigError::Decode(e.to_string()).into())
    }

    /// Serializes the configuration to YAML, optionally with secret fields
    /// masked. Redaction never touches the stored value.
    pub async fn get_config_yaml(&self, redact_secrets: bool) -> Result<String> {
        let cfg = self.get_config().await?;
        let cfg = if redact_secrets { redact(&cfg) } else { cfg };
        serde_yaml::to_string(&cfg).map_err(|e| ConfigError::Encode(e.to_string()).into())
    }

    /// Resolves the configured storage destination to a backend handle.
    ///
    /// [`StorageError::Undefined`] and [`StorageError::UnknownType`]
    /// propagate unchanged from the factory.
    ///
    /// [`StorageError::Undefined`]: crate::domain::errors::StorageError::Undefined
    /// [`StorageError::UnknownType`]: crate::domain::errors::StorageError::UnknownType
    pub async fn storage_handle(&self) -> Result<Arc<dyn Storage>> {
        let cfg = self.get_config().await?;
        create_storage(&cfg.storage).await
    }

    async fn fetch_document(&self) -> Result<Value> {
        self.store
            .fetch()
            .await?
            .ok_or_else(|| ConfigError::NotSet.into())
    }
}
