//! Shared configuration document schema
//!
//! One logical configuration object per deployment, stored as a single
//! document in the control database and mirrored field-for-field by the YAML
//! import/export form. Decoding is strict: unrecognized fields are rejected,
//! omitted fields take their zero value.

use crate::config::secret::{empty_secret, SecretString};
use crate::domain::errors::{ConfigError, StorageError};
use serde::{Deserialize, Serialize};
use url::Url;

/// Region applied when s3 settings leave it unset.
pub const DEFAULT_S3_REGION: &str = "us-east-1";

/// The singleton control object: PITR mode plus backup storage destination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub pitr: PitrConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Produces the document form written to the control store.
    ///
    /// The document carries `pitr.changed`, which the textual form never
    /// does; it is reinstated here from the in-memory value.
    pub fn to_document(&self) -> Result<serde_json::Value, ConfigError> {
        let mut doc =
            serde_json::to_value(self).map_err(|e| ConfigError::Encode(e.to_string()))?;
        doc["pitr"]["changed"] = serde_json::Value::from(self.pitr.changed);
        Ok(doc)
    }
}

/// Point-in-time-recovery options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PitrConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Epoch seconds of the last PITR-relevant mutation. Stamped by the
    /// config store, never settable directly and never exported to YAML.
    #[serde(default, skip_serializing)]
    pub changed: i64,
}

/// Backup storage destination: a tagged union over the backend variants.
///
/// Exactly one tag is active at a time. Settings sections for inactive tags
/// are carried but ignored, so flipping the tag back does not lose them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default, rename = "type")]
    pub typ: StorageType,
    #[serde(default)]
    pub s3: S3Config,
    #[serde(default)]
    pub filesystem: FilesystemConfig,
}

/// The storage tag discriminant.
///
/// Kept open rather than a closed enum: a document written by a newer agent
/// may carry a tag this build does not know, and the factory must be able to
/// report that exact value instead of failing at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StorageType {
    /// Empty tag: expected transitional state before first configuration.
    #[default]
    Undefined,
    S3,
    Filesystem,
    /// Discards all writes, returns empty reads. For dry runs and testing.
    Blackhole,
    /// A tag outside the known set, preserved verbatim.
    Unknown(String),
}

impl StorageType {
    pub fn as_str(&self) -> &str {
        match self {
            StorageType::Undefined => "",
            StorageType::S3 => "s3",
            StorageType::Filesystem => "filesystem",
            StorageType::Blackhole => "blackhole",
            StorageType::Unknown(tag) => tag,
        }
    }
}

impl From<String> for StorageType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "" => StorageType::Undefined,
            "s3" => StorageType::S3,
            "filesystem" => StorageType::Filesystem,
            "blackhole" => StorageType::Blackhole,
            _ => StorageType::Unknown(s),
        }
    }
}

impl From<StorageType> for String {
    fn from(t: StorageType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object-storage backend settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct S3Config {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub endpoint_url: String,
    #[serde(default)]
    pub bucket: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub credentials: S3Credentials,
}

impl S3Config {
    /// Validates and normalizes the settings in place.
    ///
    /// Runs before any whole-document write with the s3 tag and again when
    /// the factory constructs the backend. A failure here aborts the caller
    /// with no partial write.
    pub fn cast(&mut self) -> Result<(), StorageError> {
        if self.bucket.is_empty() {
            return Err(StorageError::InvalidSettings(
                "s3 bucket is not set".to_string(),
            ));
        }
        if self.region.is_empty() {
            self.region = DEFAULT_S3_REGION.to_string();
        }
        if !self.endpoint_url.is_empty() {
            let url = Url::parse(&self.endpoint_url).map_err(|e| {
                StorageError::InvalidSettings(format!(
                    "s3 endpoint url {}: {e}",
                    self.endpoint_url
                ))
            })?;
            match url.scheme() {
                "http" | "https" => {}
                scheme => {
                    return Err(StorageError::InvalidSettings(format!(
                        "s3 endpoint url scheme {scheme} is not supported"
                    )));
                }
            }
            self.endpoint_url = self.endpoint_url.trim_end_matches('/').to_string();
        }
        Ok(())
    }
}

/// Object-storage credentials. Static keys or a vault reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct S3Credentials {
    #[serde(default = "empty_secret")]
    pub access_key_id: SecretString,
    #[serde(default = "empty_secret")]
    pub secret_access_key: SecretString,
    #[serde(default)]
    pub vault: VaultCredentials,
}

impl Default for S3Credentials {
    fn default() -> Self {
        Self {
            access_key_id: empty_secret(),
            secret_access_key: empty_secret(),
            vault: VaultCredentials::default(),
        }
    }
}

/// Vault access for credential retrieval by the backup executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VaultCredentials {
    #[serde(default)]
    pub server: String,
    #[serde(default = "empty_secret")]
    pub secret: SecretString,
    #[serde(default = "empty_secret")]
    pub token: SecretString,
}

impl Default for VaultCredentials {
    fn default() -> Self {
        Self {
            server: String::new(),
            secret: empty_secret(),
            token: empty_secret(),
        }
    }
}

/// Filesystem backend settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesystemConfig {
    #[serde(default)]
    pub path: String,
}
