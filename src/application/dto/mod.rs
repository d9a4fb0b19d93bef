pub mod upload_dto;
