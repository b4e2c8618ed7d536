//! Atelier - Art-portfolio site service.
//!
//! Localized content, a gallery with a lightbox viewer, and a contact
//! form relayed to a third-party form processor.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `i18n` - Translation bundles, locale negotiation and the locale session
//! - `gallery` - Artwork catalog and viewer navigation
//! - `inquiry` - Artwork prefill carried from the viewer to the contact form
//! - `contact` - Contact form state machine and upstream relay
//! - `server` - axum HTTP API

pub mod config;
pub mod contact;
pub mod gallery;
pub mod i18n;
pub mod inquiry;
pub mod server;
