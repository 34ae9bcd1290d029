//! Secure credential handling using the secrecy crate
//!
//! Storage backend credentials live in the shared configuration document in
//! cleartext (the store is the source of truth), but while they sit in agent
//! memory they are wrapped in [`Secret`] so they zero on drop and never leak
//! through `Debug` output. Masking for display is a separate, explicit step
//! (see [`crate::config::redact`]).

use secrecy::{CloneableSecret, DebugSecret, ExposeSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the traits `Secret` requires
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Serde passes the cleartext through; the document store and the textual
// export are both defined to carry credentials unmasked.
impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// A string credential that zeros its memory on drop and redacts in `Debug`
pub type SecretString = Secret<SecretValue>;

/// Creates a [`SecretString`] from a plain `String`
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// An empty [`SecretString`]; used as the serde default for credential fields
#[inline]
pub fn empty_secret() -> SecretString {
    secret_string(String::new())
}

/// Compares a secret against a plain string without cloning the cleartext
#[inline]
pub fn secret_eq(secret: &SecretString, other: &str) -> bool {
    secret.expose_secret().as_ref() == other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("test-password".to_string());
        assert_eq!(secret.expose_secret().as_ref(), "test-password");
    }

    #[test]
    fn test_empty_secret() {
        assert!(empty_secret().expose_secret().is_empty());
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-data".to_string());
        let debug_output = format!("{secret:?}");
        assert!(!debug_output.contains("sensitive-data"));
    }

    #[test]
    fn test_secret_eq() {
        let secret = secret_string("abc".to_string());
        assert!(secret_eq(&secret, "abc"));
        assert!(!secret_eq(&secret, "xyz"));
    }

    #[test]
    fn test_secret_serde_cleartext() {
        #[derive(Serialize, Deserialize)]
        struct Probe {
            key: SecretString,
        }

        let probe = Probe {
            key: secret_string("k-123".to_string()),
        };
        let json = serde_json::to_string(&probe).unwrap();
        assert!(json.contains("k-123"));

        let back: Probe = serde_json::from_str(&json).unwrap();
        assert!(secret_eq(&back.key, "k-123"));
    }
}
