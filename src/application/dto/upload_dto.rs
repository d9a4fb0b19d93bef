use std::borrow::Cow;

use serde::Serialize;
use validator::{Validate, ValidationError};

use crate::domain::{config::local::Provider, models::file::FileData};

/// Parsed upload form, checked by the validation service before anything is stored.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct UploadFileParam {
    #[validate(length(min = 1, code = "required"))]
    pub files: Vec<FileData>,
    #[validate(custom(function = "validate_provider"))]
    pub provider: String,
}

fn validate_provider(provider: &str) -> Result<(), ValidationError> {
    if provider.is_empty() {
        return Err(ValidationError::new("required"));
    }

    if provider.parse::<Provider>().is_err() {
        let values = Provider::ALL
            .iter()
            .map(Provider::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        let mut error = ValidationError::new("oneof");
        error.add_param(Cow::from("values"), &values);
        error.add_param(Cow::from("value"), &provider);
        return Err(error);
    }

    Ok(())
}
