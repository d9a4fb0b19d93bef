use std::{collections::HashMap, sync::RwLock};

use async_trait::async_trait;

use crate::{
    application::{error::ApplicationError, repositories::metadata_repository::MetadataRepository},
    domain::models::file::FileEntity,
};

/// Process-local metadata store. Records are lost on restart while the stored bytes stay.
#[derive(Default)]
pub struct InMemoryMetadataRepository {
    files: RwLock<HashMap<String, FileEntity>>,
}

impl InMemoryMetadataRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> ApplicationError {
    ApplicationError::Unexpected("Metadata store lock poisoned".to_string())
}

#[async_trait]
impl MetadataRepository for InMemoryMetadataRepository {
    async fn create_metadata(&self, file: &FileEntity) -> Result<FileEntity, ApplicationError> {
        let mut files = self.files.write().map_err(poisoned)?;

        if files.contains_key(&file.unique_id) {
            return Err(ApplicationError::Conflict("File".to_string()));
        }

        files.insert(file.unique_id.clone(), file.clone());
        Ok(file.clone())
    }

    async fn get_metadata(&self, unique_id: &str) -> Result<FileEntity, ApplicationError> {
        self.files
            .read()
            .map_err(poisoned)?
            .get(unique_id)
            .cloned()
            .ok_or_else(|| ApplicationError::NotFound("File".to_string()))
    }

    async fn delete_metadata(&self, unique_id: &str) -> Result<FileEntity, ApplicationError> {
        self.files
            .write()
            .map_err(poisoned)?
            .remove(unique_id)
            .ok_or_else(|| ApplicationError::NotFound("File".to_string()))
    }
}
