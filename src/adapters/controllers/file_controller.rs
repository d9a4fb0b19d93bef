use axum::{
    body::Body,
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
    Extension, Json,
};
use tracing::{info, warn};

use crate::{
    adapters::{
        dto::{file_dto::FileResponse, response_dto::ResponseEntity},
        error::LocalizedError,
        state::AppState,
    },
    application::{
        dto::upload_dto::UploadFileParam,
        error::{ApplicationError, ErrorKind},
        services::{
            translation::{Locale, STATUS_CREATED, STATUS_DELETED, STATUS_OK},
            validation_service::{validate, violation},
            StorageService,
        },
    },
    domain::{
        config::local::Provider,
        models::file::{FileData, FileEntity},
    },
};

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

pub struct FileController;

impl FileController {
    /// POST /api/v1/files
    /// Multipart: one or more `files` parts plus a `provider` text field
    pub async fn upload_file(
        State(app_state): State<AppState>,
        Extension(locale): Extension<Locale>,
        multipart: Multipart,
    ) -> Result<(StatusCode, Json<ResponseEntity<Vec<FileResponse>>>), LocalizedError> {
        let param = read_upload_form(multipart, locale)
            .await
            .map_err(|e| e.localized(locale))?;

        validate(locale, &param).map_err(|e| e.localized(locale))?;

        let service = requested_service(&app_state, &param.provider, locale)
            .map_err(|e| e.localized(locale))?;

        let mut stored: Vec<FileEntity> = Vec::with_capacity(param.files.len());
        for file_data in param.files {
            match store_file(&app_state, service.as_ref(), file_data).await {
                Ok(file) => stored.push(file),
                Err(e) => {
                    rollback(&app_state, service.as_ref(), &stored).await;
                    return Err(e.localized(locale));
                }
            }
        }

        info!(
            provider = %service.provider(),
            count = stored.len(),
            "Upload completed"
        );

        let data = stored.into_iter().map(FileResponse::from).collect();
        Ok((
            StatusCode::CREATED,
            Json(ResponseEntity::success(locale, STATUS_CREATED, Some(data))),
        ))
    }

    /// GET /api/v1/files/{identifier}
    pub async fn get_file_detail(
        State(app_state): State<AppState>,
        Extension(locale): Extension<Locale>,
        Path(identifier): Path<String>,
    ) -> Result<Json<ResponseEntity<FileResponse>>, LocalizedError> {
        let file = app_state
            .metadata_repository
            .get_metadata(&identifier)
            .await
            .map_err(|e| e.localized(locale))?;

        Ok(Json(ResponseEntity::success(
            locale,
            STATUS_OK,
            Some(FileResponse::from(file)),
        )))
    }

    /// GET /api/v1/files/{identifier}/content
    pub async fn download_file(
        State(app_state): State<AppState>,
        Extension(locale): Extension<Locale>,
        Path(identifier): Path<String>,
    ) -> Result<Response, LocalizedError> {
        let (file, bytes) = retrieve(&app_state, &identifier)
            .await
            .map_err(|e| e.localized(locale))?;

        let content_type = HeaderValue::from_str(&file.mimetype)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_MIME_TYPE));

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CONTENT_LENGTH, bytes.len())
            .header(
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", disposition_filename(&file)),
            )
            .body(Body::from(bytes))
            .map_err(|e| ApplicationError::Unexpected(e.to_string()).localized(locale))
    }

    /// DELETE /api/v1/files/{identifier}
    pub async fn delete_file(
        State(app_state): State<AppState>,
        Extension(locale): Extension<Locale>,
        Path(identifier): Path<String>,
    ) -> Result<Json<ResponseEntity<()>>, LocalizedError> {
        let file = app_state
            .metadata_repository
            .get_metadata(&identifier)
            .await
            .map_err(|e| e.localized(locale))?;

        let service = app_state
            .storage_services
            .for_stored(file.provider)
            .map_err(|e| e.localized(locale))?;

        if let Err(e) = service.delete_file(&file.unique_id, &file.extension).await {
            if e.kind() == ErrorKind::NotFound {
                warn!(unique_id = %file.unique_id, "Dropping metadata of a file missing from storage");
                if let Err(cleanup) = app_state.metadata_repository.delete_metadata(&file.unique_id).await {
                    warn!(unique_id = %file.unique_id, error = %cleanup, "Failed to drop stale metadata");
                }
            }
            return Err(e.localized(locale));
        }

        app_state
            .metadata_repository
            .delete_metadata(&file.unique_id)
            .await
            .map_err(|e| e.localized(locale))?;

        info!(unique_id = %file.unique_id, "File deleted");

        Ok(Json(ResponseEntity::success(locale, STATUS_DELETED, None)))
    }
}

fn invalid_form(locale: Locale, field: &str, error: MultipartError) -> ApplicationError {
    warn!("Invalid multipart data in field '{}': {}", field, error);
    ApplicationError::ValidationFailed(vec![violation(locale, field, "invalid", "", &[])])
}

async fn read_upload_form(
    mut multipart: Multipart,
    locale: Locale,
) -> Result<UploadFileParam, ApplicationError> {
    let mut files = Vec::new();
    let mut provider = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| invalid_form(locale, "files", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "files" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_MIME_TYPE)
                    .to_string();
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| invalid_form(locale, "files", e))?
                    .to_vec();

                files.push(FileData::new(content, filename, mime_type));
            }
            "provider" => {
                provider = field
                    .text()
                    .await
                    .map_err(|e| invalid_form(locale, "provider", e))?
                    .trim()
                    .to_string();
            }
            _ => {}
        }
    }

    Ok(UploadFileParam { files, provider })
}

/// Storage service for a validated provider name; a known but unconfigured provider is
/// reported like any other value outside the allowed set.
fn requested_service(
    app_state: &AppState,
    provider: &str,
    locale: Locale,
) -> Result<std::sync::Arc<dyn StorageService>, ApplicationError> {
    provider
        .parse::<Provider>()
        .ok()
        .and_then(|provider| app_state.storage_services.get(provider))
        .ok_or_else(|| {
            let configured = app_state
                .storage_services
                .providers()
                .iter()
                .map(Provider::as_str)
                .collect::<Vec<_>>()
                .join(" ");

            ApplicationError::ValidationFailed(vec![violation(
                locale,
                "provider",
                "oneof",
                provider,
                &[("values", configured.as_str())],
            )])
        })
}

/// Saves the bytes, then records the metadata. Bytes whose metadata cannot be recorded
/// are removed again.
async fn store_file(
    app_state: &AppState,
    service: &dyn StorageService,
    file_data: FileData,
) -> Result<FileEntity, ApplicationError> {
    let file = service.save_file(file_data).await?;

    if let Err(e) = app_state.metadata_repository.create_metadata(&file).await {
        if let Err(cleanup) = service.delete_file(&file.unique_id, &file.extension).await {
            warn!(unique_id = %file.unique_id, error = %cleanup, "Failed to remove orphaned file");
        }
        return Err(e);
    }

    Ok(file)
}

async fn rollback(app_state: &AppState, service: &dyn StorageService, stored: &[FileEntity]) {
    for file in stored {
        if let Err(e) = service.delete_file(&file.unique_id, &file.extension).await {
            warn!(unique_id = %file.unique_id, error = %e, "Rollback could not delete file");
        }
        if let Err(e) = app_state.metadata_repository.delete_metadata(&file.unique_id).await {
            warn!(unique_id = %file.unique_id, error = %e, "Rollback could not delete metadata");
        }
    }
}

async fn retrieve(
    app_state: &AppState,
    identifier: &str,
) -> Result<(FileEntity, Vec<u8>), ApplicationError> {
    let file = app_state.metadata_repository.get_metadata(identifier).await?;
    let service = app_state.storage_services.for_stored(file.provider)?;
    let bytes = service
        .retrieve_file(&file.unique_id, &file.extension)
        .await?;
    Ok((file, bytes))
}

fn disposition_filename(file: &FileEntity) -> String {
    let name: String = file
        .name
        .chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .collect();

    if name.is_empty() || !name.is_ascii() {
        if file.extension.is_empty() {
            file.unique_id.clone()
        } else {
            format!("{}.{}", file.unique_id, file.extension)
        }
    } else {
        name
    }
}
