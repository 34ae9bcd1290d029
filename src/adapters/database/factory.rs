//! Control store factory
//!
//! Builds the control store from local agent settings.

use crate::adapters::database::postgres::PostgresControlStore;
use crate::adapters::database::traits::ControlStore;
use crate::config::settings::DatabaseSettings;
use crate::domain::Result;
use std::sync::Arc;

/// Connects to the shared control database and ensures its schema.
///
/// # Errors
///
/// Returns an error if the pool cannot be built or the schema migration
/// fails.
pub async fn create_control_store(settings: &DatabaseSettings) -> Result<Arc<dyn ControlStore>> {
    tracing::info!("Connecting control store");
    let store = PostgresControlStore::connect(settings).await?;
    store.ensure_schema().await?;
    Ok(Arc::new(store) as Arc<dyn ControlStore>)
}
