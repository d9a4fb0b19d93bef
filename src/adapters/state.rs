use std::sync::Arc;

use crate::{
    adapters::storage_registry::StorageRegistry,
    application::{repositories::metadata_repository::MetadataRepository, services::translation::Locale},
};

#[derive(Clone)]
pub struct AppState {
    pub storage_services: StorageRegistry,
    pub metadata_repository: Arc<dyn MetadataRepository>,
    pub default_locale: Locale,
    pub storage_root: String,
}
