use async_trait::async_trait;
use sqlx::query_as;

use crate::{
    application::{error::ApplicationError, repositories::metadata_repository::MetadataRepository},
    domain::models::file::FileEntity,
};

pub struct PgMetadataRepository {
    pool: sqlx::PgPool,
}

impl PgMetadataRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), ApplicationError> {
        let query = r#"
            CREATE TABLE IF NOT EXISTS files (
                unique_id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                extension TEXT NOT NULL,
                size BIGINT NOT NULL,
                mimetype TEXT NOT NULL,
                path TEXT NOT NULL UNIQUE,
                url TEXT NOT NULL,
                provider TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
        "#;

        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}

fn map_db_error(error: sqlx::Error) -> ApplicationError {
    match error {
        sqlx::Error::RowNotFound => ApplicationError::NotFound("File".to_string()),
        sqlx::Error::Database(ref db_error) if db_error.is_unique_violation() => {
            ApplicationError::Conflict("File".to_string())
        }
        other => ApplicationError::Unexpected(format!("Database error: {}", other)),
    }
}

#[async_trait]
impl MetadataRepository for PgMetadataRepository {
    async fn create_metadata(&self, file: &FileEntity) -> Result<FileEntity, ApplicationError> {
        let query = r#"
            INSERT INTO files (
                unique_id, name, extension, size, mimetype,
                path, url, provider, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
        "#;

        query_as::<_, FileEntity>(query)
            .bind(&file.unique_id)
            .bind(&file.name)
            .bind(&file.extension)
            .bind(file.size.min(i64::MAX as u64) as i64)
            .bind(&file.mimetype)
            .bind(&file.path)
            .bind(&file.url)
            .bind(file.provider.as_str())
            .bind(file.created_at)
            .bind(file.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn get_metadata(&self, unique_id: &str) -> Result<FileEntity, ApplicationError> {
        let query = "SELECT * FROM files WHERE unique_id = $1";

        query_as::<_, FileEntity>(query)
            .bind(unique_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn delete_metadata(&self, unique_id: &str) -> Result<FileEntity, ApplicationError> {
        let query = "DELETE FROM files WHERE unique_id = $1 RETURNING *";

        query_as::<_, FileEntity>(query)
            .bind(unique_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
