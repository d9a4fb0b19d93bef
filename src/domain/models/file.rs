use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::config::local::Provider;

/// Uploaded file as handed to a storage provider.
#[derive(Debug, Clone, Serialize)]
pub struct FileData {
    #[serde(skip_serializing)]
    pub content: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
}

impl FileData {
    pub fn new(content: Vec<u8>, filename: String, mime_type: String) -> Self {
        Self {
            content,
            filename,
            mime_type,
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn extension(&self) -> String {
        extension_of(&self.filename)
    }
}

/// Metadata of one stored file. Built once by `save_file`, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntity {
    pub unique_id: String,
    pub name: String,
    pub extension: String,
    pub size: u64,
    pub mimetype: String,
    pub path: String,
    pub url: String,
    pub provider: Provider,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FileEntity {
    pub fn new(
        unique_id: String,
        file: &FileData,
        storage_root: &str,
        base_url: &str,
        provider: Provider,
    ) -> Self {
        let extension = file.extension();
        let path = object_path(storage_root, &unique_id, &extension);
        let url = format!("{}/{}", base_url.trim_end_matches('/'), path);
        let now = Utc::now();

        Self {
            unique_id,
            name: file.filename.clone(),
            extension,
            size: file.size(),
            mimetype: file.mime_type.clone(),
            path,
            url,
            provider,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Extension of the last path segment of `filename`, reduced to ASCII alphanumerics.
///
/// Both `/` and `\` count as separators so a client-side path never leaks into the
/// extension. A name without a dot, or a dotfile like `.env`, has no extension.
pub fn extension_of(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();

    match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            ext.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
        }
        _ => String::new(),
    }
}

/// `<storage_root>/<identifier>.<extension>`, or `<storage_root>/<identifier>` when the
/// extension is empty. Shared by save, retrieve and delete on every backend.
pub fn object_path(storage_root: &str, identifier: &str, extension: &str) -> String {
    let root = storage_root.trim_end_matches('/');
    if extension.is_empty() {
        format!("{}/{}", root, identifier)
    } else {
        format!("{}/{}.{}", root, identifier, extension)
    }
}

/// Whether a caller-supplied identifier/extension pair could have been produced by a save.
pub fn is_valid_locator(identifier: &str, extension: &str) -> bool {
    !identifier.is_empty()
        && identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        && extension.chars().all(|c| c.is_ascii_alphanumeric())
}
