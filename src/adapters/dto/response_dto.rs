use serde::{Deserialize, Serialize};

use crate::{
    application::services::translation::{translate, Locale},
    domain::models::validation::ValidationItem,
};

/// JSON envelope shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseEntity<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Vec<ValidationItem>>,
}

impl<T> ResponseEntity<T> {
    pub fn success(locale: Locale, message_key: &str, data: Option<T>) -> Self {
        Self {
            message: translate(locale, message_key, &[]),
            data,
            error: None,
        }
    }
}

impl ResponseEntity<()> {
    pub fn failure(message: String, error: Option<Vec<ValidationItem>>) -> Self {
        Self {
            message,
            data: None,
            error,
        }
    }
}
