use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::ACCEPT_LANGUAGE, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{adapters::state::AppState, application::services::translation::Locale};

/// Stores the request [`Locale`] in the request extensions for the handlers.
pub async fn resolve_locale(
    State(app_state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let locale = request_locale(request.headers(), app_state.default_locale);
    request.extensions_mut().insert(locale);
    next.run(request).await
}

/// First supported language of `Accept-Language`, ignoring quality weights.
pub fn request_locale(headers: &HeaderMap, fallback: Locale) -> Locale {
    headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            value
                .split(',')
                .filter_map(|tag| Locale::supported(tag.split(';').next().unwrap_or_default()))
                .next()
        })
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_request_locale() {
        assert_eq!(request_locale(&headers_with("id"), Locale::En), Locale::Id);
        assert_eq!(
            request_locale(&headers_with("fr-FR, id;q=0.8, en;q=0.5"), Locale::En),
            Locale::Id
        );
        assert_eq!(request_locale(&headers_with("de"), Locale::Id), Locale::Id);
        assert_eq!(request_locale(&HeaderMap::new(), Locale::En), Locale::En);
    }
}
