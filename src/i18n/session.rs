//! Per-visitor locale state.
//!
//! A `LocaleSession` owns the active locale for one visitor and is the
//! only writer of it. Every change is persisted twice: as a `Set-Cookie`
//! (read back by the server on the next request) and into client
//! local storage.

use std::collections::HashMap;
use std::fmt::Display;

use tracing::debug;

use super::{Bundle, LOCALE_KEY, Locale, LocaleCookie, LocaleError, bundle, translate, translate_with};

/// Client-side key/value storage (browser local storage).
pub trait LocalStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
}

/// In-memory local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }
}

/// Active locale for one visitor.
#[derive(Debug)]
pub struct LocaleSession<S: LocalStorage> {
    locale: Locale,
    storage: S,
    /// Cookies written since the session started, oldest first.
    pending_cookies: Vec<LocaleCookie>,
}

impl<S: LocalStorage> LocaleSession<S> {
    /// Start a session with the locale chosen for the first render.
    pub fn new(initial: Locale, storage: S) -> Self {
        Self {
            locale: initial,
            storage,
            pending_cookies: Vec::new(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn bundle(&self) -> &'static Bundle {
        bundle(self.locale)
    }

    /// Translate a key in the active locale.
    pub fn t(&self, key: &str) -> String {
        translate(self.bundle(), key)
    }

    /// Translate a key and fill `{var}` placeholders.
    pub fn t_with(&self, key: &str, vars: &[(&str, &dyn Display)]) -> String {
        translate_with(self.bundle(), key, vars)
    }

    /// Switch to a locale given by code, as offered by the selector.
    pub fn set_locale_code(&mut self, code: &str) -> Result<(), LocaleError> {
        let next = code.parse::<Locale>()?;
        self.set_locale(next);
        Ok(())
    }

    /// Switch locale and persist the choice.
    pub fn set_locale(&mut self, next: Locale) {
        debug!("Locale changed: {} -> {}", self.locale, next);
        self.locale = next;
        self.pending_cookies.push(LocaleCookie::new(next));
        self.storage.set_item(LOCALE_KEY, next.code());
    }

    /// Adopt the locale stored on the client if it differs from the
    /// one used for the initial render. Call once, after mount.
    ///
    /// Returns `true` if the locale changed.
    pub fn reconcile_after_mount(&mut self) -> bool {
        let stored = self
            .storage
            .get_item(LOCALE_KEY)
            .and_then(|v| v.parse::<Locale>().ok());

        match stored {
            Some(stored) if stored != self.locale => {
                self.set_locale(stored);
                true
            }
            _ => false,
        }
    }

    /// Take the cookies to send with the next response.
    pub fn take_cookies(&mut self) -> Vec<LocaleCookie> {
        std::mem::take(&mut self.pending_cookies)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
