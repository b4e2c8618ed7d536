//! Contact form payload and validation.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// What the visitor typed into the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default, deserialize_with = "loose_string")]
    pub name: String,

    #[serde(default, deserialize_with = "loose_string")]
    pub email: String,

    #[serde(default, deserialize_with = "loose_string")]
    pub message: String,

    /// CAPTCHA response token. Older clients send the reCAPTCHA field name.
    #[serde(
        rename = "h-captcha-response",
        alias = "g-recaptcha-response",
        default,
        deserialize_with = "loose_token",
        skip_serializing_if = "Option::is_none"
    )]
    pub captcha_token: Option<String>,
}

/// Accept any scalar where text is expected: numbers and `true` are
/// stringified, while `null`, `false`, `0`, arrays and objects become empty.
fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) if n.as_f64() != Some(0.0) => n.to_string(),
        _ => String::new(),
    };
    Ok(text)
}

fn loose_token<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    loose_string(deserializer).map(|t| Some(t).filter(|t| !t.is_empty()))
}

/// A reason the form cannot be submitted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationIssue {
    NameRequired,
    EmailRequired,
    EmailInvalid,
    MessageRequired,
}

impl ValidationIssue {
    /// Translation key of the inline message.
    pub fn message_key(self) -> &'static str {
        match self {
            Self::NameRequired => "contact.validation.nameRequired",
            Self::EmailRequired => "contact.validation.emailRequired",
            Self::EmailInvalid => "contact.validation.emailInvalid",
            Self::MessageRequired => "contact.validation.messageRequired",
        }
    }
}

impl ContactSubmission {
    /// Token, if one was given and is not blank.
    pub fn token(&self) -> Option<&str> {
        self.captcha_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Check required fields and the email shape.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push(ValidationIssue::NameRequired);
        }

        let email = self.email.trim();
        if email.is_empty() {
            issues.push(ValidationIssue::EmailRequired);
        } else if !is_plausible_email(email) {
            issues.push(ValidationIssue::EmailInvalid);
        }

        if self.message.trim().is_empty() {
            issues.push(ValidationIssue::MessageRequired);
        }

        issues
    }
}

/// `local@domain.tld`, no whitespace.
pub fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}
