use async_trait::async_trait;
use reqwest::{multipart, Client, Response, StatusCode};

use crate::{
    application::{
        error::ApplicationError, services::identifier::new_identifier, services::StorageService,
    },
    domain::{
        config::{
            local::{Provider, StorageConfig},
            secrets::SupabaseSecrets,
        },
        models::file::{is_valid_locator, object_path, FileData, FileEntity},
    },
    services::error::StorageError,
};

/// Supabase Storage bucket. Objects are keyed by the same `<root>/<id>.<ext>` path the
/// local backend uses on disk.
pub struct SupabaseStorageService {
    client: Client,
    storage_url: String,
    api_key: String,
    bucket_name: String,
    storage_root: String,
    public_url: String,
}

impl SupabaseStorageService {
    /// Only the storage root is taken from `config`; entity urls point at the bucket's
    /// public object endpoint instead of the app.
    pub fn new(secrets: SupabaseSecrets, config: &StorageConfig) -> Self {
        let storage_url = secrets.storage_url.trim_end_matches('/').to_string();
        let public_url = format!("{}/object/public/{}", storage_url, secrets.bucket_name);

        Self {
            client: Client::new(),
            storage_url,
            api_key: secrets.api_key,
            bucket_name: secrets.bucket_name,
            storage_root: config
                .storage_root
                .trim_start_matches("./")
                .trim_matches('/')
                .to_string(),
            public_url,
        }
    }

    fn object_url(&self, object_key: &str) -> String {
        format!(
            "{}/object/{}/{}",
            self.storage_url, self.bucket_name, object_key
        )
    }

    fn new_entity(&self, file_data: &FileData) -> FileEntity {
        FileEntity::new(
            new_identifier(),
            file_data,
            &self.storage_root,
            &self.public_url,
            Provider::Supabase,
        )
    }

    fn locate(&self, identifier: &str, extension: &str) -> Result<String, StorageError> {
        if !is_valid_locator(identifier, extension) {
            return Err(StorageError::NotFound(identifier.to_string()));
        }
        Ok(self.object_url(&object_path(&self.storage_root, identifier, extension)))
    }

    /// Maps a non-success response onto the storage error taxonomy.
    async fn check(response: Response, action: &str) -> Result<Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_failure(status, &body, action))
    }
}

fn classify_failure(status: StatusCode, body: &str, action: &str) -> StorageError {
    // Supabase reports some conflicts as 400 with a "Duplicate" error body
    match status {
        StatusCode::NOT_FOUND => StorageError::NotFound(body.to_string()),
        StatusCode::CONFLICT => StorageError::AlreadyExists(body.to_string()),
        StatusCode::BAD_REQUEST if body.contains("Duplicate") => {
            StorageError::AlreadyExists(body.to_string())
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            StorageError::InvalidCredentials(format!("{} rejected with status {}", action, status))
        }
        _ => StorageError::ProviderError(format!(
            "{} failed with status {}: {}",
            action, status, body
        )),
    }
}

#[async_trait]
impl StorageService for SupabaseStorageService {
    fn provider(&self) -> Provider {
        Provider::Supabase
    }

    async fn save_file(&self, file_data: FileData) -> Result<FileEntity, ApplicationError> {
        let file = self.new_entity(&file_data);

        let file_part = multipart::Part::bytes(file_data.content)
            .file_name(file_data.filename)
            .mime_str(&file_data.mime_type)
            .map_err(|e| StorageError::ProviderError(e.to_string()))?;

        let form = multipart::Form::new().part("file", file_part);

        let response = self
            .client
            .post(self.object_url(&file.path))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .header("x-upsert", "false")
            .multipart(form)
            .send()
            .await
            .map_err(StorageError::from)?;

        Self::check(response, "Upload").await?;

        Ok(file)
    }

    async fn retrieve_file(
        &self,
        identifier: &str,
        extension: &str,
    ) -> Result<Vec<u8>, ApplicationError> {
        let url = self.locate(identifier, extension)?;

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(StorageError::from)?;

        let bytes = Self::check(response, "Download")
            .await?
            .bytes()
            .await
            .map_err(|e| StorageError::NetworkError(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete_file(&self, identifier: &str, extension: &str) -> Result<(), ApplicationError> {
        let url = self.locate(identifier, extension)?;

        let response = self
            .client
            .delete(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(StorageError::from)?;

        Self::check(response, "Delete").await?;

        Ok(())
    }
}
