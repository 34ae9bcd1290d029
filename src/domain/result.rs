//! Result type alias for Barque
//!
//! Convenience alias using [`BarqueError`] as the error type. Use this for
//! all fallible operations in the crate.

use super::errors::BarqueError;

/// Result type alias for Barque operations
///
/// # Examples
///
/// ```
/// use barque::domain::{BarqueError, Result};
///
/// fn lookup(key: &str) -> Result<String> {
///     if key.is_empty() {
///         return Err(BarqueError::Other("empty key".to_string()));
///     }
///     Ok(key.to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, BarqueError>;
