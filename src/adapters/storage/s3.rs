//! S3 storage backend
//!
//! Built from cast (validated/normalized) s3 settings. Static credentials
//! from the shared configuration take precedence; with none configured the
//! client falls back to the ambient AWS environment (instance profile,
//! environment variables). A non-empty endpoint URL switches the client to
//! path-style addressing for S3-compatible services.

use crate::adapters::storage::traits::Storage;
use crate::config::schema::S3Config;
use crate::domain::errors::StorageError;
use crate::domain::Result;
use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use secrecy::ExposeSecret;

/// Storage on an S3 bucket (or compatible service).
pub struct S3Storage {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3Storage {
    /// Constructs the backend from settings that already passed
    /// [`S3Config::cast`].
    pub async fn new(cfg: S3Config) -> Result<Self> {
        let access_key = cfg.credentials.access_key_id.expose_secret();
        let client = if !access_key.is_empty() {
            let creds = Credentials::new(
                access_key.as_ref(),
                cfg.credentials.secret_access_key.expose_secret().as_ref(),
                None,
                None,
                "barque-config",
            );
            let mut builder = aws_sdk_s3::Config::builder()
                .behavior_version(BehaviorVersion::latest())
                .region(Region::new(cfg.region.clone()))
                .credentials_provider(creds);
            if !cfg.endpoint_url.is_empty() {
                builder = builder
                    .endpoint_url(cfg.endpoint_url.clone())
                    .force_path_style(true);
            }
            Client::from_conf(builder.build())
        } else {
            let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(cfg.region.clone()))
                .load()
                .await;
            Client::new(&shared)
        };

        Ok(Self {
            client,
            bucket: cfg.bucket,
            prefix: cfg.prefix.trim_matches('/').to_string(),
        })
    }

    fn full_key(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{name}", self.prefix)
        }
    }

    fn strip_key<'a>(&self, key: &'a str) -> &'a str {
        if self.prefix.is_empty() {
            key
        } else {
            key.strip_prefix(&self.prefix)
                .map(|rest| rest.trim_start_matches('/'))
                .unwrap_or(key)
        }
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn save(&self, name: &str, data: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(self.full_key(name))
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(|e| StorageError::Backend(format!("put {name}: {e}")))?;
        tracing::debug!(name, bytes = data.len(), "saved object to s3");
        Ok(())
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(self.full_key(name))
            .send()
            .await
            .map_err(|e| StorageError::Backend(format!("get {name}: {e}")))?;
        let body = resp
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Backend(format!("read {name} body: {e}")))?;
        Ok(body.into_bytes().to_vec())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(self.full_key(prefix))
            .into_paginator()
            .send();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| StorageError::Backend(format!("list {prefix}: {e}")))?;
            for object in page.contents() {
                if let Some(key) = object.key() {
                    names.push(self.strip_key(key).to_string());
                }
            }
        }
        Ok(names)
    }

    async fn delete(&self, name: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(self.full_key(name))
            .send()
            .await
            .map_err(|e| StorageError::Backend(format!("delete {name}: {e}")))?;
        Ok(())
    }
}
