use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::{
    adapters::dto::response_dto::ResponseEntity,
    application::{
        error::ApplicationError,
        services::translation::{
            translate, Locale, STATUS_CONFLICT, STATUS_ERROR, STATUS_INVALID_DATA,
            STATUS_NOT_FOUND,
        },
    },
};

/// An [`ApplicationError`] paired with the locale its response is rendered in.
#[derive(Debug)]
pub struct LocalizedError {
    pub error: ApplicationError,
    pub locale: Locale,
}

impl ApplicationError {
    pub fn localized(self, locale: Locale) -> LocalizedError {
        LocalizedError {
            error: self,
            locale,
        }
    }
}

fn context_message(locale: Locale, key: &str, context: &str) -> String {
    let context_key = format!("context.{}", context.to_lowercase());
    let translated = translate(locale, &context_key, &[]);
    let context = if translated == context_key {
        context.to_string()
    } else {
        translated
    };
    translate(locale, key, &[("context", context.as_str())])
}

impl IntoResponse for LocalizedError {
    fn into_response(self) -> Response {
        let locale = self.locale;

        let (status, body) = match self.error {
            ApplicationError::NotFound(ref context) => {
                warn!("{} not found", context);
                (
                    StatusCode::NOT_FOUND,
                    ResponseEntity::failure(context_message(locale, STATUS_NOT_FOUND, context), None),
                )
            }
            ApplicationError::Conflict(ref context) => {
                warn!("{} already exists", context);
                (
                    StatusCode::CONFLICT,
                    ResponseEntity::failure(context_message(locale, STATUS_CONFLICT, context), None),
                )
            }
            ApplicationError::ValidationFailed(items) => {
                warn!("Validation failed on {} field(s)", items.len());
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ResponseEntity::failure(
                        translate(locale, STATUS_INVALID_DATA, &[]),
                        Some(items),
                    ),
                )
            }
            ApplicationError::Unexpected(ref msg) => {
                error!("Unexpected error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ResponseEntity::failure(translate(locale, STATUS_ERROR, &[]), None),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
