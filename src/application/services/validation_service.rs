use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    application::{
        error::ApplicationError,
        services::translation::{translate, Locale},
    },
    domain::models::validation::ValidationItem,
};

/// Checks `input` against its declared constraints.
///
/// On failure the error is always `ApplicationError::ValidationFailed`, one item per
/// violated constraint, ordered by field name and then constraint code. Messages are
/// rendered in `locale`.
pub fn validate<T: Validate>(locale: Locale, input: &T) -> Result<(), ApplicationError> {
    input
        .validate()
        .map_err(|errors| ApplicationError::ValidationFailed(to_items(locale, &errors)))
}

/// Single violation built outside of a `Validate` derive, e.g. for a malformed form field.
pub fn violation(
    locale: Locale,
    field: &str,
    code: &str,
    value: &str,
    args: &[(&str, &str)],
) -> ValidationItem {
    let mut all_args = vec![("field", field)];
    all_args.extend_from_slice(args);

    ValidationItem {
        field: field.to_string(),
        message: translate(locale, code, &all_args),
        value: value.to_string(),
    }
}

fn to_items(locale: Locale, errors: &ValidationErrors) -> Vec<ValidationItem> {
    let mut violations: Vec<(String, &ValidationError)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let field = field.to_string();
            field_errors
                .iter()
                .map(move |error| (field.clone(), error))
        })
        .collect();

    violations.sort_by(|(a_field, a), (b_field, b)| {
        a_field.cmp(b_field).then_with(|| a.code.cmp(&b.code))
    });

    violations
        .into_iter()
        .map(|(field, error)| to_item(locale, field, error))
        .collect()
}

fn to_item(locale: Locale, field: String, error: &ValidationError) -> ValidationItem {
    let param = |name: &str| error.params.get(name).map(render_value).unwrap_or_default();

    let values = param("values");
    let min = param("min");
    let max = param("max");
    let args = [
        ("field", field.as_str()),
        ("values", values.as_str()),
        ("min", min.as_str()),
        ("max", max.as_str()),
    ];

    let code = match error.code.as_ref() {
        "required" | "oneof" => error.code.as_ref(),
        _ => "invalid",
    };

    ValidationItem {
        message: translate(locale, code, &args),
        value: param("value"),
        field,
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) if items.is_empty() => String::new(),
        other => other.to_string(),
    }
}
