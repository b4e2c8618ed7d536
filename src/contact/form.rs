//! Contact form state on the visitor's side.
//!
//! The form validates locally, asks the invisible CAPTCHA for a token,
//! then posts to the relay endpoint. There are no retries; a failed
//! attempt leaves the form in `Error` and the visitor may submit again.

use std::future::Future;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::{ContactSubmission, RelayError, ValidationIssue};
use crate::i18n::session::{LocalStorage, LocaleSession};
use crate::inquiry::{InquirySession, absolute_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

/// Where to submit, and the CAPTCHA site key.
#[derive(Debug, Clone, Default)]
pub struct ContactSettings {
    pub relay_url: Option<Url>,
    pub captcha_site_key: Option<String>,
}

#[derive(Debug, Error)]
#[error("captcha challenge failed: {0}")]
pub struct CaptchaError(pub String);

/// The invisible CAPTCHA widget.
pub trait CaptchaChallenge {
    /// Run the challenge and return a response token.
    fn execute(&mut self) -> impl Future<Output = Result<String, CaptchaError>>;

    /// Make the widget ready for the next attempt.
    fn reset(&mut self);
}

/// Delivers a submission to the relay endpoint.
pub trait ContactTransport {
    /// Returns the HTTP status of the relay's answer.
    fn send(
        &self,
        url: &Url,
        submission: &ContactSubmission,
    ) -> impl Future<Output = Result<u16, RelayError>>;
}

/// Posts submissions as JSON with reqwest.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ContactTransport for HttpTransport {
    async fn send(&self, url: &Url, submission: &ContactSubmission) -> Result<u16, RelayError> {
        let response = self.client.post(url.clone()).json(submission).send().await?;
        Ok(response.status().as_u16())
    }
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    settings: ContactSettings,
    pub name: String,
    pub email: String,
    pub message: String,
    artwork_link: Option<String>,
    status: SubmissionStatus,
    errors: Vec<ValidationIssue>,
}

impl ContactForm {
    pub fn new(settings: ContactSettings) -> Self {
        Self {
            settings,
            name: String::new(),
            email: String::new(),
            message: String::new(),
            artwork_link: None,
            status: SubmissionStatus::Idle,
            errors: Vec::new(),
        }
    }

    /// Consume a pending inquiry: show the artwork link and start the
    /// message with the localized inquiry text.
    pub fn prefill_from_inquiry<S: LocalStorage>(
        &mut self,
        inquiry: &mut InquirySession,
        origin: &str,
        locale: &LocaleSession<S>,
    ) {
        if let Some(image_url) = inquiry.take() {
            self.artwork_link = Some(absolute_url(origin, &image_url));
            self.message = locale.t("contact.prefilled");
        }
    }

    pub fn artwork_link(&self) -> Option<&str> {
        self.artwork_link.as_deref()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    pub fn submission(&self) -> ContactSubmission {
        ContactSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
            captcha_token: None,
        }
    }

    /// Translation key of the submit button.
    pub fn button_key(&self) -> &'static str {
        match self.status {
            SubmissionStatus::Submitting => "contact.form.sending",
            _ => "contact.form.send",
        }
    }

    /// Translation key of the feedback line, if any.
    pub fn status_key(&self) -> Option<&'static str> {
        match self.status {
            SubmissionStatus::Success => Some("contact.status.success"),
            SubmissionStatus::Error => Some("contact.status.error"),
            _ => None,
        }
    }

    /// Run local validation; returns `true` if the form may be sent.
    pub fn validate(&mut self) -> bool {
        self.errors = self.submission().validate();
        self.errors.is_empty()
    }

    pub async fn submit<C, T>(&mut self, captcha: &mut C, transport: &T) -> SubmissionStatus
    where
        C: CaptchaChallenge,
        T: ContactTransport,
    {
        if self.status == SubmissionStatus::Submitting {
            return self.status;
        }

        let relay_url = match (&self.settings.relay_url, &self.settings.captcha_site_key) {
            (Some(url), Some(key)) if !key.is_empty() => url.clone(),
            _ => {
                warn!("Contact form not configured");
                self.status = SubmissionStatus::Error;
                return self.status;
            }
        };

        if !self.validate() {
            self.status = SubmissionStatus::Idle;
            return self.status;
        }

        self.status = SubmissionStatus::Submitting;
        self.status = self.deliver(captcha, transport, &relay_url).await;
        captcha.reset();
        self.status
    }

    async fn deliver<C, T>(&self, captcha: &mut C, transport: &T, url: &Url) -> SubmissionStatus
    where
        C: CaptchaChallenge,
        T: ContactTransport,
    {
        let token = match captcha.execute().await {
            Ok(token) if !token.is_empty() => token,
            Ok(_) => {
                warn!("Captcha returned an empty token");
                return SubmissionStatus::Error;
            }
            Err(e) => {
                warn!("{}", e);
                return SubmissionStatus::Error;
            }
        };

        let submission = ContactSubmission {
            captcha_token: Some(token),
            ..self.submission()
        };

        match transport.send(url, &submission).await {
            Ok(status) if (200..300).contains(&status) => SubmissionStatus::Success,
            Ok(status) => {
                debug!("Relay answered {}", status);
                SubmissionStatus::Error
            }
            Err(e) => {
                warn!("Contact submission failed: {}", e);
                SubmissionStatus::Error
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use parking_lot::Mutex;

    use crate::i18n::Locale;
    use crate::i18n::session::MemoryStorage;

    struct FakeCaptcha {
        token: Option<String>,
        resets: usize,
    }

    impl FakeCaptcha {
        fn solving() -> Self {
            Self {
                token: Some("tok-123".into()),
                resets: 0,
            }
        }

        fn failing() -> Self {
            Self {
                token: None,
                resets: 0,
            }
        }
    }

    impl CaptchaChallenge for FakeCaptcha {
        async fn execute(&mut self) -> Result<String, CaptchaError> {
            self.token.clone().ok_or_else(|| CaptchaError("closed".into()))
        }

        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    #[derive(Clone)]
    struct FakeTransport {
        status: u16,
        sent: Arc<Mutex<Vec<ContactSubmission>>>,
    }

    impl FakeTransport {
        fn answering(status: u16) -> Self {
            Self {
                status,
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl ContactTransport for FakeTransport {
        async fn send(&self, _url: &Url, submission: &ContactSubmission) -> Result<u16, RelayError> {
            self.sent.lock().push(submission.clone());
            Ok(self.status)
        }
    }

    fn settings() -> ContactSettings {
        ContactSettings {
            relay_url: Some(Url::parse("http://localhost/api/contact").unwrap()),
            captcha_site_key: Some("site-key".into()),
        }
    }

    fn filled(settings: ContactSettings) -> ContactForm {
        let mut form = ContactForm::new(settings);
        form.name = "Ada".into();
        form.email = "ada@example.com".into();
        form.message = "Hello".into();
        form
    }

    #[tokio::test]
    async fn test_success() {
        let mut form = filled(settings());
        let mut captcha = FakeCaptcha::solving();
        let transport = FakeTransport::answering(200);

        assert_eq!(form.submit(&mut captcha, &transport).await, SubmissionStatus::Success);
        assert_eq!(form.status_key(), Some("contact.status.success"));
        assert_eq!(captcha.resets, 1);

        let sent = transport.sent.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].token(), Some("tok-123"));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_error() {
        for status in [400, 422, 502] {
            let mut form = filled(settings());
            let mut captcha = FakeCaptcha::solving();
            let transport = FakeTransport::answering(status);
            assert_eq!(form.submit(&mut captcha, &transport).await, SubmissionStatus::Error);
        }
    }

    #[tokio::test]
    async fn test_validation_blocks_send() {
        let mut form = filled(settings());
        form.email = "not-an-email".into();
        let mut captcha = FakeCaptcha::solving();
        let transport = FakeTransport::answering(200);

        assert_eq!(form.submit(&mut captcha, &transport).await, SubmissionStatus::Idle);
        assert_eq!(form.errors(), &[ValidationIssue::EmailInvalid]);
        assert!(transport.sent.lock().is_empty());
        assert_eq!(captcha.resets, 0);
    }

    #[tokio::test]
    async fn test_missing_config_is_error() {
        let mut form = filled(ContactSettings {
            captcha_site_key: None,
            ..settings()
        });
        let mut captcha = FakeCaptcha::solving();
        let transport = FakeTransport::answering(200);

        assert_eq!(form.submit(&mut captcha, &transport).await, SubmissionStatus::Error);
        assert!(transport.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn test_captcha_failure_is_error_and_resets() {
        let mut form = filled(settings());
        let mut captcha = FakeCaptcha::failing();
        let transport = FakeTransport::answering(200);

        assert_eq!(form.submit(&mut captcha, &transport).await, SubmissionStatus::Error);
        assert_eq!(captcha.resets, 1);
        assert!(transport.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn test_resubmit_after_error() {
        let mut form = filled(settings());
        let mut captcha = FakeCaptcha::solving();

        let failing = FakeTransport::answering(500);
        assert_eq!(form.submit(&mut captcha, &failing).await, SubmissionStatus::Error);

        let working = FakeTransport::answering(200);
        assert_eq!(form.submit(&mut captcha, &working).await, SubmissionStatus::Success);
    }

    #[test]
    fn test_prefill_from_inquiry() {
        let mut inquiry = InquirySession::new();
        inquiry.set("/images/paintings/still-life/full/work-3.svg");
        let locale = LocaleSession::new(Locale::Es, MemoryStorage::default());

        let mut form = ContactForm::new(settings());
        form.prefill_from_inquiry(&mut inquiry, "https://art.example", &locale);

        assert_eq!(
            form.artwork_link(),
            Some("https://art.example/images/paintings/still-life/full/work-3.svg")
        );
        assert_eq!(form.message, "Hola, me interesa esta pintura. ¿Sigue disponible?");
        assert_eq!(inquiry.image_url(), None);
    }

    #[test]
    fn test_prefill_without_inquiry() {
        let mut inquiry = InquirySession::new();
        let locale = LocaleSession::new(Locale::En, MemoryStorage::default());
        let mut form = ContactForm::new(settings());
        form.prefill_from_inquiry(&mut inquiry, "https://art.example", &locale);
        assert_eq!(form.artwork_link(), None);
        assert!(form.message.is_empty());
        assert_eq!(form.button_key(), "contact.form.send");
    }
}
