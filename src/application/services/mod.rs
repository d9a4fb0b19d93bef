pub mod identifier;
pub mod storage_service;
pub mod translation;
pub mod validation_service;

pub use storage_service::StorageService;
