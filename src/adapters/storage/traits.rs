//! Backup storage abstraction
//!
//! The capability the rest of the system programs against: read, write,
//! list, and delete named objects at the configured destination. The control
//! plane only selects and constructs an implementation; it performs no
//! backup I/O itself.

use crate::domain::Result;
use async_trait::async_trait;

/// A backup storage destination.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Writes an object under `name`, replacing any existing one.
    async fn save(&self, name: &str, data: &[u8]) -> Result<()>;

    /// Reads the object named `name` in full.
    async fn read(&self, name: &str) -> Result<Vec<u8>>;

    /// Lists object names starting with `prefix` (empty lists everything).
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Deletes the object named `name`.
    async fn delete(&self, name: &str) -> Result<()>;
}
