//! Initial locale negotiation.

use super::{DEFAULT_LOCALE, Locale};

/// Pick the initial locale for a visitor.
///
/// Priority: persisted cookie -> Accept-Language -> default.
/// Garbage in either input is ignored, never an error.
pub fn resolve_initial_locale(cookie: Option<&str>, accept_language: Option<&str>) -> Locale {
    if let Some(locale) = cookie.and_then(|c| c.parse::<Locale>().ok()) {
        return locale;
    }
    pick_from_accept_language(accept_language)
}

/// Pick the first supported primary subtag from an Accept-Language header.
///
/// Quality weights are dropped; the listed order decides.
pub fn pick_from_accept_language(header: Option<&str>) -> Locale {
    let Some(header) = header else {
        return DEFAULT_LOCALE;
    };

    header
        .split(',')
        .filter_map(|part| part.trim().split(';').next())
        .map(str::to_lowercase)
        .filter(|tag| !tag.is_empty())
        .find_map(|tag| tag.split('-').next().and_then(|p| p.parse::<Locale>().ok()))
        .unwrap_or(DEFAULT_LOCALE)
}
