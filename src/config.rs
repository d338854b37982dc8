//! Runtime configuration for the router and its session source. Values come
//! from CLI arguments with environment fallbacks; empty values count as unset.
//! Secrets are held in `SecretString` and stay out of `Debug` output.

use crate::{
    guard::SessionFailurePolicy,
    session::{HttpSessionProvider, Session, SessionError, SessionSource, StaticSessionProvider},
};
use secrecy::SecretString;
use std::time::Duration;
use url::Url;

/// Default session query timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// History base, normalized to `""` or `/prefix` without trailing slash.
    pub base_path: String,
    pub auth_url: Option<Url>,
    pub anon_key: Option<SecretString>,
    pub access_token: Option<SecretString>,
    pub request_timeout: Duration,
    pub on_session_error: SessionFailurePolicy,
    /// Fixed session answer that bypasses the auth service.
    pub assume_session: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            auth_url: None,
            anon_key: None,
            access_token: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            on_session_error: SessionFailurePolicy::default(),
            assume_session: None,
        }
    }
}

impl AppConfig {
    /// Picks the session provider: a fixed answer when one is assumed,
    /// otherwise the auth service.
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] when neither is configured or the HTTP
    /// provider cannot be built.
    pub fn session_source(&self) -> Result<SessionSource, SessionError> {
        if let Some(present) = self.assume_session {
            let provider = if present {
                StaticSessionProvider::signed_in(Session::anonymous())
            } else {
                StaticSessionProvider::signed_out()
            };
            return Ok(SessionSource::Static(provider));
        }

        let auth_url = self.auth_url.as_ref().ok_or_else(|| {
            SessionError::Config("no session source: set an auth URL or assume a session".into())
        })?;

        HttpSessionProvider::new(
            auth_url,
            self.anon_key.clone(),
            self.access_token.clone(),
            self.request_timeout,
        )
        .map(SessionSource::Http)
    }
}

/// Normalizes a history base path: `""`, `"/"` and `"./"` mean no prefix,
/// anything else gets a leading slash and loses trailing ones.
#[must_use]
pub fn normalize_base_path(value: &str) -> String {
    let trimmed = value.trim().trim_start_matches('.').trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Trims a raw value and drops it when empty.
#[must_use]
pub fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses the auth service base URL, accepting only http(s).
///
/// # Errors
/// Returns a message suitable for a CLI usage error.
pub fn parse_auth_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value.trim()).map_err(|err| format!("invalid auth URL: {err}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(format!("unsupported auth URL scheme: {scheme}")),
    }
}
