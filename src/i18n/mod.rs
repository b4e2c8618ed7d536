//! Internationalization (i18n) module.
//!
//! Handles loading translations and resolving the active locale.
//!
//! - `lookup` - Dotted-key lookup and `{var}` interpolation
//! - `negotiate` - Initial locale from cookie / Accept-Language
//! - `cookie` - The persisted `locale` cookie
//! - `session` - Per-visitor active locale with persistence

mod lookup;
pub mod cookie;
mod negotiate;
pub mod session;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub use lookup::{Bundle, translate, translate_with};
pub use cookie::LocaleCookie;
pub use negotiate::{pick_from_accept_language, resolve_initial_locale};
pub use session::LocaleSession;

/// Name of the cookie and of the local-storage key holding the locale.
pub const LOCALE_KEY: &str = "locale";

/// Locale used when nothing else matches.
pub const DEFAULT_LOCALE: Locale = Locale::En;

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
    Tr,
}

impl Locale {
    /// Every supported locale, in selector order.
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Es, Locale::Tr];

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Tr => "tr",
        }
    }

    /// Name of the language in that language, for the selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Español",
            Self::Tr => "Türkçe",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.code() == s)
            .ok_or_else(|| LocaleError::Unsupported(s.to_string()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    #[error("unsupported locale: {0:?}")]
    Unsupported(String),
}

/// Global translation store: Locale -> Bundle.
/// Bundles are embedded at compile time, no file I/O at runtime.
static BUNDLES: Lazy<HashMap<Locale, Bundle>> = Lazy::new(|| {
    let sources = [
        (Locale::En, include_str!("en.json")),
        (Locale::Es, include_str!("es.json")),
        (Locale::Tr, include_str!("tr.json")),
    ];

    let mut map = HashMap::new();
    for (locale, json) in sources {
        let bundle = Bundle::from_json(json).unwrap_or_else(|e| {
            warn!("Failed to parse {} bundle: {}", locale, e);
            Bundle::empty()
        });
        map.insert(locale, bundle);
    }
    map
});

/// Get the bundle for a locale.
pub fn bundle(locale: Locale) -> &'static Bundle {
    // Every Locale variant is inserted above.
    &BUNDLES[&locale]
}

/// Get text for a key in a specific language.
/// Supports nested keys via dot notation, e.g., "paintings.title".
pub fn get_text(locale: Locale, key: &str) -> String {
    translate(bundle(locale), key)
}
