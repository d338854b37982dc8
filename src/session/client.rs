//! Session lookup against the hosted auth service. The access token is sent as
//! a bearer credential together with the project's public API key; neither is
//! ever logged.

use super::{Session, SessionError, SessionProvider};
use crate::APP_USER_AGENT;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Path of the "current user" endpoint, relative to the auth base URL.
pub const USER_PATH: &str = "/auth/v1/user";
/// Maximum number of error body characters kept in errors.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Debug)]
pub struct HttpSessionProvider {
    client: Client,
    user_url: Url,
    anon_key: Option<SecretString>,
    access_token: Option<SecretString>,
}

impl HttpSessionProvider {
    /// Builds a provider for the auth service at `auth_url`.
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] if the endpoint URL or HTTP client
    /// cannot be built.
    pub fn new(
        auth_url: &Url,
        anon_key: Option<SecretString>,
        access_token: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, SessionError> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| SessionError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            user_url: endpoint_url(auth_url, USER_PATH)?,
            anon_key,
            access_token,
        })
    }

    #[must_use]
    pub fn user_url(&self) -> &Url {
        &self.user_url
    }

    #[instrument(skip_all, fields(url = %self.user_url))]
    async fn fetch_session(&self) -> Result<Option<Session>, SessionError> {
        let Some(access_token) = &self.access_token else {
            debug!("no access token configured, treating as signed out");
            return Ok(None);
        };

        let mut request = self
            .client
            .get(self.user_url.clone())
            .bearer_auth(access_token.expose_secret());
        if let Some(anon_key) = &self.anon_key {
            request = request.header("apikey", anon_key.expose_secret());
        }

        let response = request.send().await.map_err(map_request_error)?;
        handle_session_response(response).await
    }
}

impl SessionProvider for HttpSessionProvider {
    async fn current_session(&self) -> Result<Option<Session>, SessionError> {
        self.fetch_session().await
    }
}

/// Builds an endpoint URL from a base URL, keeping any path prefix on the base.
fn endpoint_url(base: &Url, path: &str) -> Result<Url, SessionError> {
    let base = base.as_str().trim_end_matches('/');
    let url = format!("{base}/{}", path.trim_start_matches('/'));
    Url::parse(&url).map_err(|err| SessionError::Config(format!("Invalid auth URL {url}: {err}")))
}

fn map_request_error(err: reqwest::Error) -> SessionError {
    if err.is_timeout() {
        SessionError::Timeout("Session query timed out.".to_string())
    } else {
        SessionError::Network(format!("Unable to reach the auth service: {err}"))
    }
}

/// Decodes the session payload; 204/401/403 mean no session.
async fn handle_session_response(response: Response) -> Result<Option<Session>, SessionError> {
    let status = response.status();
    if matches!(
        status,
        StatusCode::NO_CONTENT | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
    ) {
        debug!(status = status.as_u16(), "no session");
        return Ok(None);
    }

    if status.is_success() {
        return response
            .json::<Session>()
            .await
            .map(Some)
            .map_err(|err| SessionError::Parse(format!("Failed to decode session: {err}")));
    }

    let body = response.text().await.unwrap_or_default();
    Err(SessionError::Http {
        status: status.as_u16(),
        message: sanitize_body(&body),
    })
}

/// Trims and truncates error bodies before they reach logs or output.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
