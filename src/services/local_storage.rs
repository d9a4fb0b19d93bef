use std::path::Path;

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::{
    application::{
        error::ApplicationError, services::identifier::new_identifier, services::StorageService,
    },
    domain::{
        config::local::{Provider, StorageConfig},
        models::file::{is_valid_locator, object_path, FileData, FileEntity},
    },
    services::error::StorageError,
};

/// Flat directory of `<identifier>.<extension>` files under the storage root.
pub struct LocalStorageService {
    storage_root: String,
    base_url: String,
}

impl LocalStorageService {
    /// Creates the storage root if it is missing.
    pub async fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let storage_root = config.storage_root.trim_end_matches('/').to_string();

        fs::create_dir_all(&storage_root)
            .await
            .map_err(|e| StorageError::from_io(e, &storage_root))?;

        Ok(Self {
            storage_root,
            base_url: config.base_url.clone(),
        })
    }

    pub fn storage_root(&self) -> &str {
        &self.storage_root
    }

    fn locate(&self, identifier: &str, extension: &str) -> Result<String, StorageError> {
        if !is_valid_locator(identifier, extension) {
            warn!(identifier, extension, "Rejected malformed file locator");
            return Err(StorageError::NotFound(identifier.to_string()));
        }
        Ok(object_path(&self.storage_root, identifier, extension))
    }

    async fn write_new(path: &str, content: &[u8]) -> Result<(), StorageError> {
        // create_new fails with AlreadyExists instead of truncating an existing file
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
            .map_err(|e| StorageError::from_io(e, path))?;

        let written = async {
            file.write_all(content).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            if let Err(cleanup) = fs::remove_file(path).await {
                warn!(path, error = %cleanup, "Failed to remove partially written file");
            }
            return Err(StorageError::Io {
                path: path.to_string(),
                source: e,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    fn provider(&self) -> Provider {
        Provider::Local
    }

    async fn save_file(&self, file_data: FileData) -> Result<FileEntity, ApplicationError> {
        let file = FileEntity::new(
            new_identifier(),
            &file_data,
            &self.storage_root,
            &self.base_url,
            Provider::Local,
        );

        Self::write_new(&file.path, &file_data.content).await?;

        info!(
            unique_id = %file.unique_id,
            path = %file.path,
            size = file.size,
            "Stored file"
        );

        Ok(file)
    }

    async fn retrieve_file(
        &self,
        identifier: &str,
        extension: &str,
    ) -> Result<Vec<u8>, ApplicationError> {
        let path = self.locate(identifier, extension)?;

        let bytes = fs::read(Path::new(&path))
            .await
            .map_err(|e| StorageError::from_io(e, &path))?;

        debug!(path = %path, size = bytes.len(), "Retrieved file");
        Ok(bytes)
    }

    async fn delete_file(&self, identifier: &str, extension: &str) -> Result<(), ApplicationError> {
        let path = self.locate(identifier, extension)?;

        fs::remove_file(Path::new(&path))
            .await
            .map_err(|e| StorageError::from_io(e, &path))?;

        info!(path = %path, "Deleted file");
        Ok(())
    }
}
