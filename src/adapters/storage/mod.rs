//! Backup storage adapters
//!
//! The `Storage` capability and its backend implementations: S3,
//! filesystem, and the write-discarding blackhole. The factory maps the
//! configured storage tag to a backend instance.

pub mod blackhole;
pub mod factory;
pub mod fs;
pub mod s3;
pub mod traits;

pub use blackhole::Blackhole;
pub use factory::create_storage;
pub use fs::FsStorage;
pub use s3::S3Storage;
pub use traits::Storage;
