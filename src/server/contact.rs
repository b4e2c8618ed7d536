//! Contact relay endpoint.

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use super::{ApiError, AppState};
use crate::contact::{ContactSubmission, RelayError};

const UNEXPECTED: &str = "Unexpected error";

/// `POST /api/contact` - forward a submission to the form processor.
///
/// - upstream 2xx: `200 {ok: true, data}`
/// - upstream non-2xx: `502 {ok: false, status, data}`
/// - bad input, missing config, transport failure: `500 {error}`
pub async fn submit_contact(State(state): State<AppState>, req: Request) -> Response {
    let submission = match read_submission(req, &state).await {
        Ok(submission) => submission,
        Err(e) => return e.into_response(),
    };

    match state.relay.relay(&submission).await {
        Ok(outcome) if outcome.is_success() => {
            Json(json!({ "ok": true, "data": outcome.data })).into_response()
        }
        Ok(outcome) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "ok": false, "status": outcome.status, "data": outcome.data })),
        )
            .into_response(),
        Err(RelayError::MissingEndpoint) => {
            warn!("Contact submission received but FORM_ENDPOINT is not set");
            ApiError::Internal("Form endpoint missing".to_string()).into_response()
        }
        Err(e) => {
            warn!("Contact relay failed: {}", e);
            ApiError::Internal(UNEXPECTED.to_string()).into_response()
        }
    }
}

/// Accept JSON, multipart or URL-encoded bodies.
async fn read_submission(req: Request, state: &AppState) -> Result<ContactSubmission, ApiError> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let malformed = |reason: String| {
        warn!("Malformed contact submission: {}", reason);
        ApiError::Internal(UNEXPECTED.to_string())
    };

    if content_type.contains("application/json") {
        let Json(submission) = Json::<ContactSubmission>::from_request(req, state)
            .await
            .map_err(|e| malformed(e.body_text()))?;
        Ok(submission)
    } else if content_type.contains("multipart/form-data") {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| malformed(e.body_text()))?;

        let mut submission = ContactSubmission::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| malformed(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let value = field.text().await.map_err(|e| malformed(e.body_text()))?;
            match name.as_str() {
                "name" => submission.name = value,
                "email" => submission.email = value,
                "message" => submission.message = value,
                "h-captcha-response" | "g-recaptcha-response" if !value.is_empty() => {
                    submission.captcha_token = Some(value)
                }
                _ => {}
            }
        }
        Ok(submission)
    } else {
        let Form(submission) = Form::<ContactSubmission>::from_request(req, state)
            .await
            .map_err(|e| malformed(e.body_text()))?;
        Ok(submission)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactConfigResponse {
    configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    captcha_site_key: Option<String>,
}

/// `GET /api/contact/config` - what the contact page needs to render the
/// form and the invisible CAPTCHA.
pub async fn contact_config(State(state): State<AppState>) -> Json<ContactConfigResponse> {
    let captcha_site_key = state.captcha_site_key.as_deref().map(str::to_string);
    Json(ContactConfigResponse {
        configured: state.relay.endpoint().is_some() && captcha_site_key.is_some(),
        captcha_site_key,
    })
}
