//! PostgreSQL control store
//!
//! The shared configuration document kept as a JSONB singleton row. Every
//! trait operation is exactly one SQL statement, so atomicity is the
//! database's per-statement guarantee, the same contract the rest of the
//! control plane is designed around. Targeted field updates go through a
//! `jsonb` deep-set helper installed by the migration, which creates
//! intermediate objects the way a `$set` on a dotted path would.

use crate::adapters::database::traits::ControlStore;
use crate::config::settings::DatabaseSettings;
use crate::domain::{BarqueError, Result};
use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;
use tokio_postgres::types::ToSql;
use tokio_postgres::NoTls;

/// Control store backed by a pooled PostgreSQL connection.
pub struct PostgresControlStore {
    pool: Pool,
}

impl PostgresControlStore {
    /// Creates the pool from local agent settings. Does not touch the
    /// schema; call [`ensure_schema`](Self::ensure_schema) once after.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self> {
        let pg_config: tokio_postgres::Config = settings
            .uri
            .expose_secret()
            .as_ref()
            .parse()
            .map_err(|e| BarqueError::Settings(format!("Invalid database.uri: {e}")))?;

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let manager = Manager::from_config(pg_config, NoTls, manager_config);

        let timeout = Duration::from_secs(settings.connect_timeout_seconds);
        let pool = Pool::builder(manager)
            .max_size(settings.max_connections)
            .wait_timeout(Some(timeout))
            .create_timeout(Some(timeout))
            .recycle_timeout(Some(timeout))
            .build()
            .map_err(|e| BarqueError::Database(format!("Failed to create connection pool: {e}")))?;

        Ok(Self { pool })
    }

    /// Installs the control table and the jsonb deep-set helper.
    pub async fn ensure_schema(&self) -> Result<()> {
        let client = self.client().await?;
        let migration_sql = include_str!("../../../migrations/001_control_schema.sql");
        client
            .batch_execute(migration_sql)
            .await
            .map_err(|e| BarqueError::Database(format!("Failed to apply control schema: {e}")))?;
        tracing::debug!("control schema ensured");
        Ok(())
    }

    async fn client(&self) -> Result<deadpool_postgres::Object> {
        self.pool
            .get()
            .await
            .map_err(|e| BarqueError::Database(format!("Failed to get connection from pool: {e}")))
    }
}

#[async_trait]
impl ControlStore for PostgresControlStore {
    async fn fetch(&self) -> Result<Option<Value>> {
        let client = self.client().await?;
        let row = client
            .query_opt("SELECT doc FROM barque_config WHERE singleton", &[])
            .await
            .map_err(|e| BarqueError::Database(format!("fetch config document: {e}")))?;
        match row {
            Some(row) => {
                let doc: Value = row
                    .try_get(0)
                    .map_err(|e| BarqueError::Database(format!("read config document: {e}")))?;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    async fn replace(&self, doc: Value) -> Result<()> {
        let client = self.client().await?;
        client
            .execute(
                "INSERT INTO barque_config (singleton, doc) VALUES (TRUE, $1) \
                 ON CONFLICT (singleton) DO UPDATE SET doc = EXCLUDED.doc",
                &[&doc],
            )
            .await
            .map_err(|e| BarqueError::Database(format!("replace config document: {e}")))?;
        Ok(())
    }

    async fn set_fields(&self, fields: &[(String, Value)]) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let client = self.client().await?;

        // One UPDATE statement with the deep-set helper applied per field.
        // No upsert: a missing document means nothing matches, like a
        // targeted update against an absent document.
        let paths: Vec<Vec<String>> = fields
            .iter()
            .map(|(path, _)| path.split('.').map(String::from).collect())
            .collect();

        let mut expr = String::from("doc");
        let mut params: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(fields.len() * 2);
        for (i, ((_, value), path)) in fields.iter().zip(paths.iter()).enumerate() {
            expr = format!("barque_jsonb_set_deep({expr}, ${}, ${})", 2 * i + 1, 2 * i + 2);
            params.push(path);
            params.push(value);
        }
        let sql = format!("UPDATE barque_config SET doc = {expr} WHERE singleton");

        client
            .execute(&sql, &params)
            .await
            .map_err(|e| BarqueError::Database(format!("set config fields: {e}")))?;
        Ok(())
    }
}
