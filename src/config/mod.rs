//! Configuration module for the Atelier site service.
//!
//! Loads configuration from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // HTTP
    pub bind_addr: IpAddr,
    pub port: u16,

    /// Public origin of the site, used to build absolute artwork links.
    pub site_origin: String,

    // Contact form
    /// Form processor id or full URL. Optional so the site still boots;
    /// submissions fail with a configuration error until it is set.
    pub form_endpoint: Option<String>,

    /// Site key of the invisible CAPTCHA shown on the contact page.
    pub captcha_site_key: Option<String>,

    /// Timeout for the upstream form request.
    pub relay_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            site_origin: "http://localhost:3000".to_string(),
            form_endpoint: None,
            captcha_site_key: None,
            relay_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`. Unparseable values fall back
    /// to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // Empty values count as unset
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = var("BIND_ADDR")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.bind_addr);

        let port = var("PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        let site_origin = var("SITE_ORIGIN")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or(defaults.site_origin);

        let relay_timeout = var("RELAY_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.relay_timeout);

        Self {
            bind_addr,
            port,
            site_origin,
            form_endpoint: var("FORM_ENDPOINT"),
            captcha_site_key: var("CAPTCHA_SITE_KEY"),
            relay_timeout,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}
