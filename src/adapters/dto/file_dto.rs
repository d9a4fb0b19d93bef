use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{config::local::Provider, models::file::FileEntity};

#[derive(Debug, Serialize, Deserialize)]
pub struct FileResponse {
    #[serde(rename = "uniqueId")]
    pub unique_id: String,
    pub name: String,
    pub extension: String,
    pub size: u64,
    pub mimetype: String,
    pub path: String,
    pub url: String,
    pub provider: Provider,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<FileEntity> for FileResponse {
    fn from(file: FileEntity) -> Self {
        Self {
            unique_id: file.unique_id,
            name: file.name,
            extension: file.extension,
            size: file.size,
            mimetype: file.mimetype,
            path: file.path,
            url: file.url,
            provider: file.provider,
            created_at: file.created_at,
            updated_at: file.updated_at,
        }
    }
}
