use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::models::file::FileEntity};

/// Durable record of stored files, keyed by identifier.
#[async_trait]
pub trait MetadataRepository: Send + Sync {
    async fn create_metadata(&self, file: &FileEntity) -> Result<FileEntity, ApplicationError>;
    async fn get_metadata(&self, unique_id: &str) -> Result<FileEntity, ApplicationError>;
    async fn delete_metadata(&self, unique_id: &str) -> Result<FileEntity, ApplicationError>;
}
