use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://grtc-new-node-backend.onrender.com/api";
pub const DEFAULT_VERIFY_URL: &str = "https://grtcindia.in/grtc-server/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_URL_VAR: &str = "PORTAL_API_URL";
const VERIFY_URL_VAR: &str = "PORTAL_VERIFY_URL";
const TIMEOUT_VAR: &str = "PORTAL_HTTP_TIMEOUT_SECS";

/// Remote endpoints and transport settings for the portal API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalConfig {
    api_base_url: Url,
    verification_base_url: Url,
    request_timeout: Duration,
}

impl PortalConfig {
    /// Build a config for `api_base_url` with default verification endpoint and timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the URL is not http(s).
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: parse_base_url(API_URL_VAR, api_base_url)?,
            verification_base_url: parse_base_url(VERIFY_URL_VAR, DEFAULT_VERIFY_URL)?,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Read `PORTAL_API_URL`, `PORTAL_VERIFY_URL` and `PORTAL_HTTP_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`PortalConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api = read(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.into());
        let verify = read(VERIFY_URL_VAR).unwrap_or_else(|| DEFAULT_VERIFY_URL.into());
        let timeout = match read(TIMEOUT_VAR) {
            Some(raw) => parse_timeout(&raw)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_base_url: parse_base_url(API_URL_VAR, &api)?,
            verification_base_url: parse_base_url(VERIFY_URL_VAR, &verify)?,
            request_timeout: timeout,
        })
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the URL is not http(s).
    pub fn with_api_base_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.api_base_url = parse_base_url(API_URL_VAR, url)?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the URL is not http(s).
    pub fn with_verification_base_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.verification_base_url = parse_base_url(VERIFY_URL_VAR, url)?;
        Ok(self)
    }

    #[must_use]
    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    #[must_use]
    pub fn verification_base_url(&self) -> &Url {
        &self.verification_base_url
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

fn parse_base_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidUrl {
        var,
        value: raw.to_string(),
    };
    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid());
    }
    Ok(url)
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            var: TIMEOUT_VAR,
            value: raw.to_string(),
        }),
    }
}
