//! Blackhole storage backend
//!
//! Discards every write and returns empty reads. Selected with the
//! `blackhole` tag for dry runs and testing.

use crate::adapters::storage::traits::Storage;
use crate::domain::Result;
use async_trait::async_trait;

/// The no-op destination.
#[derive(Debug, Default)]
pub struct Blackhole;

impl Blackhole {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Storage for Blackhole {
    async fn save(&self, _name: &str, _data: &[u8]) -> Result<()> {
        Ok(())
    }

    async fn read(&self, _name: &str) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }

    async fn list(&self, _prefix: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn delete(&self, _name: &str) -> Result<()> {
        Ok(())
    }
}
