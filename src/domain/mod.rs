//! Domain models and types for Barque.
//!
//! The domain layer provides:
//! - **Error types** ([`BarqueError`], [`ConfigError`], [`StorageError`])
//! - **Result type alias** ([`Result`])
//! - **Shared-database topology schemas** ([`topology`]): foreign document
//!   shapes coexisting in the control database, carried for schema agreement
//!   only
//!
//! # Error handling
//!
//! All fallible operations return [`Result<T>`]:
//!
//! ```rust
//! use barque::domain::{ConfigError, Result};
//!
//! fn requires_config(present: bool) -> Result<()> {
//!     if !present {
//!         return Err(ConfigError::NotSet.into());
//!     }
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;
pub mod topology;

pub use errors::{BarqueError, ConfigError, StorageError};
pub use result::Result;
pub use topology::{
    ListShards, MemberHealth, MemberState, Optime, ReplsetStatus, ReplsetStatusMember, Shard,
    StatusOptimes,
};
