//! Inquiry prefill.
//!
//! Carries the artwork a visitor asked about from the gallery viewer to
//! the contact form. Holds at most one image reference and is cleared
//! once the contact form reads it.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquirySession {
    image_url: Option<String>,
}

impl InquirySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, image_url: impl Into<String>) {
        self.image_url = Some(image_url.into());
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn clear(&mut self) {
        self.image_url = None;
    }

    /// Read and clear.
    pub fn take(&mut self) -> Option<String> {
        self.image_url.take()
    }
}

/// Make an image reference absolute against the site origin.
pub fn absolute_url(origin: &str, image_url: &str) -> String {
    if image_url.starts_with("http") {
        image_url.to_string()
    } else {
        format!("{}{}", origin.trim_end_matches('/'), image_url)
    }
}
