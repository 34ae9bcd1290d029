//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.
//! Validation failures abort before any write; nothing here retries.

use thiserror::Error;

/// Main Barque error type
///
/// This is the primary error type used throughout the crate. It wraps the
/// specific sub-taxonomies and provides context for error handling.
#[derive(Debug, Error)]
pub enum BarqueError {
    /// Shared configuration document errors
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Backup storage selection/backend errors
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Control database errors (connection, statement execution)
    #[error("database error: {0}")]
    Database(String),

    /// Local agent settings errors (the per-process bootstrap file)
    #[error("settings error: {0}")]
    Settings(String),

    /// Serialization/deserialization errors
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors on the shared configuration document paths
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The key is not in the schema key closure
    #[error("invalid config key: {0}")]
    InvalidKey(String),

    /// The textual value failed coercion for a typed key
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// No configuration document exists yet
    #[error("config is not set")]
    NotSet,

    /// The stored leaf has no textual representation (only bool and string do)
    #[error("unsupported value type {type_name} at {key}")]
    UnsupportedType { key: String, type_name: &'static str },

    /// A registered key that does not resolve in the current document
    #[error("key {0} does not resolve in the stored config")]
    KeyNotResolved(String),

    /// Malformed textual input or unexpected document shape
    #[error("decode config: {0}")]
    Decode(String),

    /// Failed to produce the textual or document form
    #[error("encode config: {0}")]
    Encode(String),
}

/// Errors from storage backend selection and the backends themselves
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage tag is the empty/undefined tag. This is an expected
    /// transitional state before first configuration, distinct from an
    /// unknown tag.
    #[error("storage undefined")]
    Undefined,

    /// The storage tag is not in the known set
    #[error("unknown storage type {0}")]
    UnknownType(String),

    /// Backend-specific settings failed validation/normalization
    #[error("invalid storage settings: {0}")]
    InvalidSettings(String),

    /// Opaque backend failure (network, filesystem, service)
    #[error("storage backend: {0}")]
    Backend(String),
}

impl From<std::io::Error> for BarqueError {
    fn from(err: std::io::Error) -> Self {
        BarqueError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BarqueError {
    fn from(err: serde_json::Error) -> Self {
        BarqueError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for BarqueError {
    fn from(err: toml::de::Error) -> Self {
        BarqueError::Settings(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barque_error_display() {
        let err = BarqueError::Config(ConfigError::NotSet);
        assert_eq!(err.to_string(), "config error: config is not set");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: BarqueError = ConfigError::InvalidKey("bogus.key".to_string()).into();
        assert!(matches!(err, BarqueError::Config(ConfigError::InvalidKey(_))));
        assert!(err.to_string().contains("bogus.key"));
    }

    #[test]
    fn test_storage_error_conversion() {
        let err: BarqueError = StorageError::UnknownType("tape".to_string()).into();
        assert!(matches!(
            err,
            BarqueError::Storage(StorageError::UnknownType(_))
        ));
        assert_eq!(err.to_string(), "storage error: unknown storage type tape");
    }

    #[test]
    fn test_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            key: "pitr.enabled".to_string(),
            value: "maybe".to_string(),
            reason: "expected a boolean".to_string(),
        };
        assert!(err.to_string().contains("pitr.enabled"));
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BarqueError = io_err.into();
        assert!(matches!(err, BarqueError::Io(_)));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let err = BarqueError::Database("down".to_string());
        let _: &dyn std::error::Error = &err;
        let err = StorageError::Undefined;
        let _: &dyn std::error::Error = &err;
    }
}
