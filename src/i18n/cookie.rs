//! The `locale` cookie.

use std::fmt;

use super::{LOCALE_KEY, Locale};

/// One year.
pub const COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 365;

/// A `Set-Cookie` for the locale, scoped to the whole site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleCookie {
    pub locale: Locale,
}

impl LocaleCookie {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl fmt::Display for LocaleCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; Path=/; Max-Age={}",
            LOCALE_KEY, self.locale, COOKIE_MAX_AGE_SECS
        )
    }
}

/// Find a cookie value in a `Cookie` request header.
pub fn read_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| k.trim() == name)
        .map(|(_, v)| v.trim())
}
