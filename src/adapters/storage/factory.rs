//! Storage backend factory
//!
//! The one place that knows every backend variant. Each resolution is
//! independent and cheap: no caching, no retries.

use crate::adapters::storage::blackhole::Blackhole;
use crate::adapters::storage::fs::FsStorage;
use crate::adapters::storage::s3::S3Storage;
use crate::adapters::storage::traits::Storage;
use crate::config::schema::{StorageConfig, StorageType};
use crate::domain::errors::StorageError;
use crate::domain::Result;
use std::sync::Arc;

/// Resolves the configured storage tag to a concrete backend.
///
/// # Errors
///
/// - [`StorageError::Undefined`] for the empty tag (not yet configured)
/// - [`StorageError::UnknownType`] for a tag outside the known set,
///   carrying the offending value
/// - [`StorageError::InvalidSettings`] when s3 settings fail to cast
pub async fn create_storage(cfg: &StorageConfig) -> Result<Arc<dyn Storage>> {
    match &cfg.typ {
        StorageType::S3 => {
            let mut s3 = cfg.s3.clone();
            s3.cast()?;
            Ok(Arc::new(S3Storage::new(s3).await?) as Arc<dyn Storage>)
        }
        StorageType::Filesystem => {
            Ok(Arc::new(FsStorage::new(cfg.filesystem.clone())) as Arc<dyn Storage>)
        }
        StorageType::Blackhole => Ok(Arc::new(Blackhole::new()) as Arc<dyn Storage>),
        StorageType::Undefined => Err(StorageError::Undefined.into()),
        StorageType::Unknown(tag) => Err(StorageError::UnknownType(tag.clone()).into()),
    }
}
