//! Locale negotiation middleware and locale endpoints.

use axum::extract::{Path, Request};
use axum::http::HeaderValue;
use axum::http::header::{ACCEPT_LANGUAGE, COOKIE, SET_COOKIE};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ApiError;
use crate::i18n::cookie::read_cookie;
use crate::i18n::{Bundle, LOCALE_KEY, Locale, LocaleCookie, bundle, resolve_initial_locale};

/// Locale chosen for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLocale(pub Locale);

/// Resolve the request's locale and make sure the visitor ends up with a
/// valid `locale` cookie.
pub async fn negotiate_locale(mut req: Request, next: Next) -> Response {
    let headers = req.headers();

    let cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|h| read_cookie(h, LOCALE_KEY))
        .map(str::to_string);
    let accept_language = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let has_valid_cookie = cookie.as_deref().is_some_and(|c| c.parse::<Locale>().is_ok());
    let locale = resolve_initial_locale(cookie.as_deref(), accept_language.as_deref());
    req.extensions_mut().insert(RequestLocale(locale));

    let mut response = next.run(req).await;

    // A handler that already set the cookie (explicit selection) wins.
    let handler_set_cookie = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .any(|v| v.as_bytes().starts_with(format!("{}=", LOCALE_KEY).as_bytes()));

    if !has_valid_cookie && !handler_set_cookie {
        debug!("Negotiated locale {} from {:?}", locale, accept_language);
        if let Ok(value) = HeaderValue::from_str(&LocaleCookie::new(locale).to_string()) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}

#[derive(Debug, Serialize)]
pub struct LanguageOption {
    code: Locale,
    label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    current: Locale,
    languages: Vec<LanguageOption>,
}

/// `GET /api/languages` - selector options and the current locale.
pub async fn list_languages(Extension(RequestLocale(current)): Extension<RequestLocale>) -> Json<LanguagesResponse> {
    let languages = Locale::ALL
        .into_iter()
        .map(|code| LanguageOption {
            code,
            label: code.label(),
        })
        .collect();

    Json(LanguagesResponse { current, languages })
}

#[derive(Debug, Deserialize)]
pub struct SetLocaleRequest {
    locale: String,
}

/// `POST /api/locale` - explicit selection from the language selector.
pub async fn set_locale(Json(body): Json<SetLocaleRequest>) -> Result<Response, ApiError> {
    let locale = body
        .locale
        .parse::<Locale>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    debug!("Locale selected: {}", locale);
    let cookie = LocaleCookie::new(locale).to_string();
    Ok((
        [(SET_COOKIE, cookie)],
        Json(serde_json::json!({ "locale": locale })),
    )
        .into_response())
}

/// `GET /api/i18n/:locale` - the whole bundle.
pub async fn get_bundle(Path(code): Path<String>) -> Result<Json<&'static Bundle>, ApiError> {
    let locale = code
        .parse::<Locale>()
        .map_err(|e| ApiError::NotFound(e.to_string()))?;
    Ok(Json(bundle(locale)))
}
