use sqlx::{postgres::PgRow, FromRow, Row};

use crate::domain::{config::local::Provider, models::file::FileEntity};

impl FromRow<'_, PgRow> for FileEntity {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let size: i64 = row.try_get("size")?;
        let provider: String = row.try_get("provider")?;
        let provider = provider
            .parse::<Provider>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(FileEntity {
            unique_id: row.try_get("unique_id")?,
            name: row.try_get("name")?,
            extension: row.try_get("extension")?,
            size: size.max(0) as u64,
            mimetype: row.try_get("mimetype")?,
            path: row.try_get("path")?,
            url: row.try_get("url")?,
            provider,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
