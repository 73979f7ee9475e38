// File-backed durable storage - a JSON object of key to string value
use crate::application::durable_storage::DurableStorage;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Sibling file the next contents are staged in before the rename.
    fn staging_path(&self) -> Result<PathBuf> {
        let name = self
            .path
            .file_name()
            .with_context(|| format!("Storage path {} has no file name", self.path.display()))?;
        let mut staged = name.to_os_string();
        staged.push(".tmp");
        Ok(self.path.with_file_name(staged))
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read storage file {}", self.path.display()));
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("Storage file {} is not a JSON object of strings", self.path.display()))
    }
}

#[async_trait]
impl DurableStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut values = self.read_all().await?;
        Ok(values.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        // A corrupt file is replaced rather than blocking every future write.
        let mut values = match self.read_all().await {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable storage file");
                BTreeMap::new()
            }
        };
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create storage directory {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(&values)?;
        let staged = self.staging_path()?;
        tokio::fs::write(&staged, json)
            .await
            .with_context(|| format!("Failed to write storage file {}", staged.display()))?;
        tokio::fs::rename(&staged, &self.path)
            .await
            .with_context(|| format!("Failed to replace storage file {}", self.path.display()))?;

        Ok(())
    }
}
