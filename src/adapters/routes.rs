use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::adapters::{
    controllers::{file_controller::FileController, health_controller::HealthController},
    middleware::resolve_locale,
    state::AppState,
};

pub fn create_router(app_state: AppState, max_upload_size: usize) -> Router {
    let api_routes = Router::new()
        .route("/api/v1/health", get(HealthController::health_check))
        .route("/api/v1/files", post(FileController::upload_file))
        .route(
            "/api/v1/files/{identifier}",
            get(FileController::get_file_detail).delete(FileController::delete_file),
        )
        .route(
            "/api/v1/files/{identifier}/content",
            get(FileController::download_file),
        )
        .layer(DefaultBodyLimit::max(max_upload_size))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            resolve_locale,
        ));

    // FileEntity urls are `<base_url>/<path>`, so the local root is served under its own path
    let router = match storage_mount(&app_state.storage_root) {
        Some(mount) => api_routes.nest_service(&mount, ServeDir::new(&app_state.storage_root)),
        None => api_routes,
    };

    router.with_state(app_state)
}

fn storage_mount(storage_root: &str) -> Option<String> {
    let trimmed = storage_root.trim_start_matches("./").trim_matches('/');
    if trimmed.is_empty() || trimmed == "." {
        None
    } else {
        Some(format!("/{}", trimmed))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc, Mutex,
        },
    };

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        adapters::{
            dto::{file_dto::FileResponse, response_dto::ResponseEntity},
            repositories::InMemoryMetadataRepository,
            storage_registry::StorageRegistry,
        },
        application::{
            error::{ApplicationError, ErrorKind},
            repositories::metadata_repository::MetadataRepository,
            services::{translation::Locale, StorageService},
        },
        domain::{
            config::local::{Provider, StorageConfig},
            models::file::FileEntity,
        },
        services::LocalStorageService,
    };

    const BOUNDARY: &str = "storage-test-boundary";

    /// In-memory metadata whose `create_metadata` fails on the `fail_on`-th call.
    struct FlakyMetadataRepository {
        inner: InMemoryMetadataRepository,
        fail_on: usize,
        calls: AtomicUsize,
        created: Mutex<Vec<String>>,
    }

    impl FlakyMetadataRepository {
        fn failing_on(fail_on: usize) -> Self {
            Self {
                inner: InMemoryMetadataRepository::new(),
                fail_on,
                calls: AtomicUsize::new(0),
                created: Mutex::new(Vec::new()),
            }
        }

        fn created(&self) -> Vec<String> {
            self.created.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MetadataRepository for FlakyMetadataRepository {
        async fn create_metadata(&self, file: &FileEntity) -> Result<FileEntity, ApplicationError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call == self.fail_on {
                return Err(ApplicationError::Unexpected("metadata store unavailable".into()));
            }

            let created = self.inner.create_metadata(file).await?;
            self.created.lock().unwrap().push(created.unique_id.clone());
            Ok(created)
        }

        async fn get_metadata(&self, unique_id: &str) -> Result<FileEntity, ApplicationError> {
            self.inner.get_metadata(unique_id).await
        }

        async fn delete_metadata(&self, unique_id: &str) -> Result<FileEntity, ApplicationError> {
            self.inner.delete_metadata(unique_id).await
        }
    }

    fn stored_files(temp_dir: &TempDir) -> usize {
        std::fs::read_dir(temp_dir.path().join("file")).unwrap().count()
    }

    async fn test_app(temp_dir: &TempDir) -> Router {
        test_app_with(temp_dir, Arc::new(InMemoryMetadataRepository::new())).await
    }

    async fn test_app_with(
        temp_dir: &TempDir,
        metadata_repository: Arc<dyn MetadataRepository>,
    ) -> Router {
        let config = StorageConfig {
            storage_root: temp_dir.path().join("file").to_string_lossy().to_string(),
            base_url: "http://localhost:8080".to_string(),
        };
        let local = LocalStorageService::new(&config).await.unwrap();

        let mut services: HashMap<Provider, Arc<dyn StorageService>> = HashMap::new();
        services.insert(Provider::Local, Arc::new(local));

        let app_state = AppState {
            storage_services: StorageRegistry::new(services),
            metadata_repository,
            default_locale: Locale::En,
            storage_root: config.storage_root.clone(),
        };

        create_router(app_state, 1024 * 1024)
    }

    /// `files` entries are (filename, content type, content).
    fn upload_request(
        files: &[(&str, &str, &str)],
        provider: Option<&str>,
        language: &str,
    ) -> Request<Body> {
        let mut body = String::new();
        for (filename, content_type, content) in files {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n{content}\r\n"
            ));
        }
        if let Some(provider) = provider {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"provider\"\r\n\r\n{provider}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/files")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::ACCEPT_LANGUAGE, language)
            .body(Body::from(body))
            .unwrap()
    }

    fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    async fn upload(app: &Router, filename: &str, content: &str) -> FileResponse {
        let response = app
            .clone()
            .oneshot(upload_request(
                &[(filename, "text/plain", content)],
                Some("local"),
                "en",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: ResponseEntity<Vec<FileResponse>> =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        body.data.unwrap().remove(0)
    }

    #[tokio::test]
    async fn test_file_lifecycle() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir).await;

        let file = upload(&app, "a.txt", "hello").await;
        assert_eq!(file.extension, "txt");
        assert_eq!(file.name, "a.txt");
        assert_eq!(file.size, 5);
        assert_eq!(file.provider, Provider::Local);

        let detail_uri = format!("/api/v1/files/{}", file.unique_id);
        let content_uri = format!("{}/content", detail_uri);

        let response = app.clone().oneshot(request(Method::GET, &detail_uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Success");
        assert_eq!(body["data"]["uniqueId"], file.unique_id.as_str());
        assert_eq!(body["data"]["mimetype"], "text/plain");

        let response = app.clone().oneshot(request(Method::GET, &content_uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
        assert_eq!(body_bytes(response).await, b"hello");

        let response = app.clone().oneshot(request(Method::DELETE, &detail_uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "File deleted successfully");

        let response = app.clone().oneshot(request(Method::GET, &content_uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app.clone().oneshot(request(Method::DELETE, &detail_uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "File not found");
    }

    #[tokio::test]
    async fn test_upload_many_files() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir).await;

        let response = app
            .clone()
            .oneshot(upload_request(
                &[("a.txt", "text/plain", "one"), ("b.csv", "text/csv", "two")],
                Some("local"),
                "id",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: ResponseEntity<Vec<FileResponse>> =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body.message, "Berkas berhasil diunggah");

        let files = body.data.unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[1].extension, "csv");
        assert_ne!(files[0].path, files[1].path);
    }

    #[tokio::test]
    async fn test_failed_upload_rolls_back_saved_files() {
        let temp_dir = TempDir::new().unwrap();
        let repository = Arc::new(FlakyMetadataRepository::failing_on(2));
        let app = test_app_with(&temp_dir, repository.clone()).await;

        let response = app
            .clone()
            .oneshot(upload_request(
                &[("a.txt", "text/plain", "one"), ("b.txt", "text/plain", "two")],
                Some("local"),
                "en",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["message"],
            "An unexpected error occurred"
        );

        let created = repository.created();
        assert_eq!(created.len(), 1);
        assert_eq!(
            repository.get_metadata(&created[0]).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(stored_files(&temp_dir), 0);
    }

    #[tokio::test]
    async fn test_metadata_failure_removes_saved_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let repository = Arc::new(FlakyMetadataRepository::failing_on(1));
        let app = test_app_with(&temp_dir, repository.clone()).await;

        let response = app
            .clone()
            .oneshot(upload_request(
                &[("a.txt", "text/plain", "hello")],
                Some("local"),
                "en",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert!(repository.created().is_empty());
        assert_eq!(stored_files(&temp_dir), 0);
    }

    #[tokio::test]
    async fn test_delete_drops_metadata_of_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let repository = Arc::new(InMemoryMetadataRepository::new());
        let app = test_app_with(&temp_dir, repository.clone()).await;

        let file = upload(&app, "a.txt", "hello").await;
        std::fs::remove_file(&file.path).unwrap();

        let response = app
            .clone()
            .oneshot(request(
                Method::DELETE,
                &format!("/api/v1/files/{}", file.unique_id),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "File not found");

        assert_eq!(
            repository.get_metadata(&file.unique_id).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_upload_without_provider_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir).await;

        let response = app
            .clone()
            .oneshot(upload_request(&[("a.txt", "text/plain", "hello")], None, "id"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Data tidak valid");
        let items = body["error"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["field"], "provider");
        assert_eq!(items[0]["message"], "provider wajib diisi");
    }

    #[tokio::test]
    async fn test_upload_to_unconfigured_provider_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir).await;

        let response = app
            .clone()
            .oneshot(upload_request(
                &[("a.txt", "text/plain", "hello")],
                Some("supabase"),
                "en",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["error"][0]["field"], "provider");
        assert_eq!(body["error"][0]["message"], "provider must be one of [local]");
        assert_eq!(body["error"][0]["value"], "supabase");
    }

    #[tokio::test]
    async fn test_unknown_identifier_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir).await;

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/api/v1/files/does-not-exist"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "File not found");
    }

    #[tokio::test]
    async fn test_health() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_app(&temp_dir).await;

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/api/v1/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["providers"], serde_json::json!(["local"]));
    }

    #[test]
    fn test_storage_mount() {
        assert_eq!(storage_mount("storage/file").as_deref(), Some("/storage/file"));
        assert_eq!(storage_mount("./storage/file/").as_deref(), Some("/storage/file"));
        assert_eq!(storage_mount("./"), None);
        assert_eq!(storage_mount("."), None);
    }
}
