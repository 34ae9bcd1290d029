//! Filesystem storage backend
//!
//! Objects are plain files under the configured root path. Object names may
//! contain `/`, which maps to subdirectories created on demand.

use crate::adapters::storage::traits::Storage;
use crate::config::schema::FilesystemConfig;
use crate::domain::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// Storage rooted at a local directory.
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(cfg: FilesystemConfig) -> Self {
        Self {
            root: PathBuf::from(cfg.path),
        }
    }

    fn object_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[async_trait]
impl Storage for FsStorage {
    async fn save(&self, name: &str, data: &[u8]) -> Result<()> {
        let path = self.object_path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, data).await?;
        tracing::debug!(name, bytes = data.len(), "saved object");
        Ok(())
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.object_path(name)).await?)
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut dirs = vec![self.root.clone()];
        while let Some(dir) = dirs.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                // an unused destination directory simply has no objects
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    dirs.push(path);
                } else if file_type.is_file() {
                    let Ok(rel) = path.strip_prefix(&self.root) else {
                        continue;
                    };
                    let name = rel
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/");
                    if name.starts_with(prefix) {
                        names.push(name);
                    }
                }
            }
        }
        names.sort();
        Ok(names)
    }

    async fn delete(&self, name: &str) -> Result<()> {
        fs::remove_file(self.object_path(name)).await?;
        Ok(())
    }
}
