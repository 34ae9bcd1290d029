//! Control database adapters
//!
//! Trait-based access to the shared configuration document, with a pooled
//! PostgreSQL implementation for deployments and an in-memory one for tests
//! and dry runs.

pub mod factory;
pub mod memory;
pub mod postgres;
pub mod traits;

pub use factory::create_control_store;
pub use memory::MemoryControlStore;
pub use postgres::PostgresControlStore;
pub use traits::ControlStore;
