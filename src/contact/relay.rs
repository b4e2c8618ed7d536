//! Server-side relay to the third-party form processor.
//!
//! Submissions are forwarded as URL-encoded form data. The upstream
//! answer is passed back untouched: parsed JSON when the upstream says
//! it is JSON, the raw body text otherwise.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use super::ContactSubmission;

/// Hosted form service used when only a form id is configured.
pub const FORM_SERVICE_BASE: &str = "https://submit-form.com/";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("form endpoint missing")]
    MissingEndpoint,

    #[error("invalid form endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Turn a configured form id or full URL into the endpoint URL.
pub fn form_endpoint(id_or_url: &str) -> Result<Url, RelayError> {
    let id_or_url = id_or_url.trim();
    if id_or_url.is_empty() {
        return Err(RelayError::MissingEndpoint);
    }
    if id_or_url.starts_with("http") {
        Ok(Url::parse(id_or_url)?)
    } else {
        // Plain concatenation: the id is a path under the service, never a
        // relative reference that could switch hosts.
        Ok(Url::parse(&format!("{}{}", FORM_SERVICE_BASE, id_or_url))?)
    }
}

/// Configured relay target.
#[derive(Debug, Clone)]
enum Target {
    Missing,
    Invalid(url::ParseError),
    Ready(Url),
}

/// Upstream response.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayOutcome {
    pub status: u16,
    pub data: Value,
}

impl RelayOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Forwards contact submissions to the form processor.
#[derive(Debug, Clone)]
pub struct FormRelay {
    client: reqwest::Client,
    target: Target,
}

impl FormRelay {
    pub fn new(client: reqwest::Client, endpoint: Option<Url>) -> Self {
        let target = endpoint.map_or(Target::Missing, Target::Ready);
        Self { client, target }
    }

    /// Build a relay from the configured id/URL.
    ///
    /// A missing or unparsable endpoint is not an error here; requests fail
    /// with [`RelayError::MissingEndpoint`] or [`RelayError::InvalidEndpoint`]
    /// instead, so the rest of the site keeps serving.
    ///
    /// # Errors
    /// Returns error only if the HTTP client cannot be built.
    pub fn from_settings(endpoint: Option<&str>, timeout: Duration) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let target = match endpoint.map(form_endpoint) {
            None | Some(Err(RelayError::MissingEndpoint)) => Target::Missing,
            Some(Err(RelayError::InvalidEndpoint(e))) => Target::Invalid(e),
            Some(Err(e)) => return Err(e),
            Some(Ok(url)) => Target::Ready(url),
        };
        Ok(Self { client, target })
    }

    /// The usable endpoint, or why there is none.
    pub fn target(&self) -> Result<&Url, RelayError> {
        match &self.target {
            Target::Ready(url) => Ok(url),
            Target::Missing => Err(RelayError::MissingEndpoint),
            Target::Invalid(e) => Err(RelayError::InvalidEndpoint(*e)),
        }
    }

    pub fn endpoint(&self) -> Option<&Url> {
        self.target().ok()
    }

    pub async fn relay(&self, submission: &ContactSubmission) -> Result<RelayOutcome, RelayError> {
        let endpoint = self.target()?;

        let mut fields = vec![
            ("name", submission.name.as_str()),
            ("email", submission.email.as_str()),
            ("message", submission.message.as_str()),
        ];
        if let Some(token) = submission.token() {
            fields.push(("h-captcha-response", token));
        }
        // Honeypot, always empty from us.
        fields.push(("_gotcha", ""));

        debug!("Relaying contact submission to {}", endpoint);
        let response = self
            .client
            .post(endpoint.clone())
            .header(ACCEPT, "application/json")
            .form(&fields)
            .send()
            .await?;

        let status = response.status().as_u16();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));
        let text = response.text().await?;

        let data = if is_json {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        } else {
            Value::String(text)
        };

        let outcome = RelayOutcome { status, data };
        if outcome.is_success() {
            info!("Contact submission relayed (status {})", status);
        } else {
            warn!("Form processor rejected submission (status {})", status);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_id() {
        let url = form_endpoint("FqnExample1").unwrap();
        assert_eq!(url.as_str(), "https://submit-form.com/FqnExample1");
    }

    #[test]
    fn test_endpoint_from_url() {
        let url = form_endpoint("http://127.0.0.1:9000/f/abc").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/f/abc");
    }

    #[test]
    fn test_endpoint_errors() {
        assert!(matches!(form_endpoint("  "), Err(RelayError::MissingEndpoint)));
        assert!(matches!(form_endpoint("http://"), Err(RelayError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_endpoint_id_stays_on_service_host() {
        let url = form_endpoint("//evil.example/x").unwrap();
        assert_eq!(url.host_str(), Some("submit-form.com"));

        let url = form_endpoint("abc?src=site").unwrap();
        assert_eq!(url.as_str(), "https://submit-form.com/abc?src=site");
    }

    #[tokio::test]
    async fn test_relay_with_invalid_endpoint() {
        let relay = FormRelay::from_settings(Some("http://"), Duration::from_secs(1)).unwrap();
        assert!(relay.endpoint().is_none());
        assert!(matches!(relay.target(), Err(RelayError::InvalidEndpoint(_))));

        let err = relay.relay(&ContactSubmission::default()).await.unwrap_err();
        assert!(matches!(err, RelayError::InvalidEndpoint(_)));
    }

    #[tokio::test]
    async fn test_relay_without_endpoint() {
        let relay = FormRelay::from_settings(None, Duration::from_secs(1)).unwrap();
        let err = relay.relay(&ContactSubmission::default()).await.unwrap_err();
        assert!(matches!(err, RelayError::MissingEndpoint));
    }
}
