//! HTTP server.
//!
//! Routes:
//! - `GET  /health`
//! - `GET  /api/languages`
//! - `POST /api/locale`
//! - `GET  /api/i18n/:locale`
//! - `GET  /api/gallery?category=`
//! - `GET  /api/gallery/:category/:index`
//! - `POST /api/contact`
//! - `GET  /api/contact/config`
//!
//! Every route goes through the locale negotiation middleware.

mod contact;
mod error;
mod gallery;
mod locale;


use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Router, middleware};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Config;
use crate::contact::{FormRelay, RelayError};

pub use error::ApiError;
pub use locale::RequestLocale;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Relay to the form processor.
    pub relay: Arc<FormRelay>,

    /// Public origin, for absolute artwork links.
    pub site_origin: Arc<str>,

    /// Site key handed to the contact page's CAPTCHA.
    pub captcha_site_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(relay: FormRelay, config: &Config) -> Self {
        Self {
            relay: Arc::new(relay),
            site_origin: config.site_origin.as_str().into(),
            captcha_site_key: config.captcha_site_key.as_deref().map(Into::into),
        }
    }

    /// Build the state from configuration.
    ///
    /// A bad `FORM_ENDPOINT` only disables the contact relay.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let relay = FormRelay::from_settings(config.form_endpoint.as_deref(), config.relay_timeout)?;
        match relay.target() {
            Ok(url) => info!("Contact relay target: {}", url),
            Err(RelayError::MissingEndpoint) => {
                warn!("FORM_ENDPOINT not set, contact submissions will fail")
            }
            Err(e) => warn!("FORM_ENDPOINT unusable ({}), contact submissions will fail", e),
        }
        if config.captcha_site_key.is_none() {
            warn!("CAPTCHA_SITE_KEY not set, the contact form will report an error");
        }
        Ok(Self::new(relay, config))
    }
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/languages", get(locale::list_languages))
        .route("/api/locale", post(locale::set_locale))
        .route("/api/i18n/:locale", get(locale::get_bundle))
        .route("/api/gallery", get(gallery::list_gallery))
        .route("/api/gallery/:category/:index", get(gallery::viewer))
        .route("/api/contact", post(contact::submit_contact))
        .route("/api/contact/config", get(contact::contact_config))
        .layer(middleware::from_fn(locale::negotiate_locale))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Bind and serve until Ctrl+C.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(config)?;
    let address = config.socket_addr();

    let listener = TcpListener::bind(address).await?;
    info!("📡 Listening on: {}", address);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
