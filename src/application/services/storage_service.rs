use async_trait::async_trait;

use crate::{
    application::error::ApplicationError,
    domain::{
        config::local::Provider,
        models::file::{FileData, FileEntity},
    },
};

/// Byte persistence for one backend.
///
/// Every failure is already normalized: missing objects are `NotFound`, an occupied path on
/// save is `Conflict`, anything else is `Unexpected`.
#[async_trait]
pub trait StorageService: Send + Sync {
    fn provider(&self) -> Provider;
    async fn save_file(&self, file_data: FileData) -> Result<FileEntity, ApplicationError>;
    async fn retrieve_file(
        &self,
        identifier: &str,
        extension: &str,
    ) -> Result<Vec<u8>, ApplicationError>;
    async fn delete_file(&self, identifier: &str, extension: &str) -> Result<(), ApplicationError>;
}
