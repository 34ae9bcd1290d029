//! Schema key registry
//!
//! The closed set of dotted key paths addressable by single-key operations,
//! declared as a static table rather than derived by runtime reflection.
//! Each entry pairs the path with the leaf kind the schema declares there.
//! The table is pure metadata: no database access, no I/O.
//!
//! Tests pin the table to [`crate::config::schema::Config`] in both
//! directions, so a schema change that adds or removes a leaf fails loudly
//! here instead of silently widening or narrowing the closure.

use crate::domain::errors::ConfigError;
use serde_json::Value;

/// The key of the PITR enable flag, the only key with write-time coercion
/// and change-tracking side effects.
pub const PITR_ENABLED: &str = "pitr.enabled";

/// The key of the PITR change stamp. Registered (it is part of the schema
/// closure) but carries an integer, which single-key reads do not support.
pub const PITR_CHANGED: &str = "pitr.changed";

/// Leaf type a key is declared to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Text,
}

/// One registered configuration key.
#[derive(Debug, Clone, Copy)]
pub struct ConfigKey {
    pub path: &'static str,
    pub kind: ValueKind,
}

/// Every dotted key path reachable by walking the configuration schema,
/// in schema declaration order.
pub const CONFIG_KEYS: &[ConfigKey] = &[
    ConfigKey {
        path: PITR_ENABLED,
        kind: ValueKind::Bool,
    },
    ConfigKey {
        path: PITR_CHANGED,
        kind: ValueKind::Int,
    },
    ConfigKey {
        path: "storage.type",
        kind: ValueKind::Text,
    },
    ConfigKey {
        path: "storage.s3.region",
        kind: ValueKind::Text,
    },
    ConfigKey {
        path: "storage.s3.endpoint_url",
        kind: ValueKind::Text,
    },
    ConfigKey {
        path: "storage.s3.bucket",
        kind: ValueKind::Text,
    },
    ConfigKey {
        path: "storage.s3.prefix",
        kind: ValueKind::Text,
    },
    ConfigKey {
        path: "storage.s3.credentials.access_key_id",
        kind: ValueKind::Text,
    },
    ConfigKey {
        path: "storage.s3.credentials.secret_access_key",
        kind: ValueKind::Text,
    },
    ConfigKey {
        path: "storage.s3.credentials.vault.server",
        kind: ValueKind::Text,
    },
    ConfigKey {
        path: "storage.s3.credentials.vault.secret",
        kind: ValueKind::Text,
    },
    ConfigKey {
        path: "storage.s3.credentials.vault.token",
        kind: ValueKind::Text,
    },
    ConfigKey {
        path: "storage.filesystem.path",
        kind: ValueKind::Text,
    },
];

/// Returns the registered key paths in declaration order.
pub fn valid_keys() -> impl Iterator<Item = &'static str> {
    CONFIG_KEYS.iter().map(|k| k.path)
}

/// Whether `path` is in the schema key closure.
pub fn is_valid_key(path: &str) -> bool {
    CONFIG_KEYS.iter().any(|k| k.path == path)
}

/// Looks up the registry entry for `path`.
pub fn key(path: &str) -> Option<&'static ConfigKey> {
    CONFIG_KEYS.iter().find(|k| k.path == path)
}

/// A scalar configuration value with a defined textual representation.
///
/// The closed sum replaces dynamic type inspection: a stored leaf outside
/// these variants surfaces [`ConfigError::UnsupportedType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Bool(bool),
    String(String),
}

impl std::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::String(s) => f.write_str(s),
        }
    }
}

/// Resolves a registered dotted path against a stored document.
pub fn resolve(doc: &Value, path: &str) -> Result<ConfigValue, ConfigError> {
    let mut cur = doc;
    for seg in path.split('.') {
        cur = cur
            .get(seg)
            .ok_or_else(|| ConfigError::KeyNotResolved(path.to_string()))?;
    }
    match cur {
        Value::Bool(b) => Ok(ConfigValue::Bool(*b)),
        Value::String(s) => Ok(ConfigValue::String(s.clone())),
        other => Err(ConfigError::UnsupportedType {
            key: path.to_string(),
            type_name: json_type_name(other),
        }),
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
