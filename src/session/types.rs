use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque proof of authentication. The guard only looks at its presence.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Session {
    #[serde(rename = "id")]
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Session {
    /// A session with no identifying data, used when presence is all we know.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            user_id: String::new(),
            email: None,
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_decodes_user_payload_and_ignores_extra_fields() {
        let session: Session = serde_json::from_str(
            r#"{"id":"8d0f","email":"ada@example.com","aud":"authenticated","role":"authenticated"}"#,
        )
        .unwrap();
        assert_eq!(session.user_id, "8d0f");
        assert_eq!(session.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn session_email_is_optional() {
        let session: Session = serde_json::from_str(r#"{"id":"8d0f"}"#).unwrap();
        assert_eq!(session.email, None);
    }

    #[test]
    fn http_error_display_includes_status() {
        let err = SessionError::Http {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (500): boom");
    }
}
