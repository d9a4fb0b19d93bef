pub mod file_dto;
pub mod metadata_dto;
pub mod response_dto;
