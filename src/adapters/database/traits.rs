//! Control store abstraction
//!
//! The seam between the config control plane and the shared database. One
//! document, addressed structurally (no caller-supplied identifier); all
//! safety derives from each operation being a single atomic statement at the
//! database layer. Implementations must not retry internally; cancellation
//! and backoff belong to the caller.

use crate::domain::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Access to the singleton configuration document.
#[async_trait]
pub trait ControlStore: Send + Sync {
    /// Reads the document. `Ok(None)` when no document exists yet.
    async fn fetch(&self) -> Result<Option<Value>>;

    /// Replaces the whole document, creating it if absent (upsert).
    async fn replace(&self, doc: Value) -> Result<()>;

    /// Sets the given dotted-path fields in one atomic update.
    ///
    /// Matched-document semantics: when no document exists this is a no-op,
    /// not an insert. Intermediate objects along each path are created.
    async fn set_fields(&self, fields: &[(String, Value)]) -> Result<()>;
}
