//! Local-disk resume storage.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use jobboard_core::ports::{FileStore, ResumeType, StoreError};

/// Stores resumes under a local directory and serves them beneath the
/// public base URL. A production deployment would swap this for an object
/// store behind the same port.
pub struct LocalFileStore {
    root: PathBuf,
    public_base: String,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(&self, bytes: Vec<u8>, resume_type: ResumeType) -> Result<String, StoreError> {
        let file_name = format!("{}.{}", Uuid::new_v4(), resume_type.extension());

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        let path = self.root.join(&file_name);
        fs::write(&path, &bytes)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Stored resume");

        Ok(format!(
            "{}/uploads/{}",
            self.public_base.trim_end_matches('/'),
            file_name
        ))
    }

    async fn remove(&self, url: &str) -> Result<(), StoreError> {
        let file_name = url
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty() && !name.contains(".."))
            .ok_or_else(|| StoreError::Remove(format!("Not a stored file URL: {url}")))?;

        fs::remove_file(self.root.join(file_name))
            .await
            .map_err(|e| StoreError::Remove(e.to_string()))?;

        tracing::debug!(file = %file_name, "Removed resume");
        Ok(())
    }
}
