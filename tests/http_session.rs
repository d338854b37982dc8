//! Session queries against a throwaway auth service bound to a local port.

use anyhow::Result;
use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::get,
};
use secrecy::SecretString;
use serde_json::json;
use std::time::Duration;
use tokio::net::TcpListener;
use url::Url;
use waypoint::{
    guard::{Decision, NavigationGuard},
    routes::{Location, SIGN_IN, app_routes},
    session::{HttpSessionProvider, SessionError, SessionProvider},
};

const ANON_KEY: &str = "public-anon-key";

async fn user(headers: HeaderMap) -> Response {
    let apikey = headers.get("apikey").and_then(|value| value.to_str().ok());
    if apikey != Some(ANON_KEY) {
        return (StatusCode::BAD_REQUEST, "missing apikey").into_response();
    }

    match headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        Some("Bearer valid") => Json(json!({
            "id": "5e1f",
            "email": "ada@example.com",
            "aud": "authenticated"
        }))
        .into_response(),
        Some("Bearer expired") => (
            StatusCode::FORBIDDEN,
            Json(json!({ "msg": "token is expired" })),
        )
            .into_response(),
        Some("Bearer broken") => (StatusCode::OK, "not json").into_response(),
        Some("Bearer outage") => (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("  upstream down {}", "x".repeat(400)),
        )
            .into_response(),
        Some("Bearer slow") => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            StatusCode::NO_CONTENT.into_response()
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "msg": "invalid JWT" })),
        )
            .into_response(),
    }
}

async fn spawn_auth_service() -> Result<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new().route("/auth/v1/user", get(user));

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(Url::parse(&format!("http://{addr}"))?)
}

fn provider(base: &Url, token: Option<&str>) -> Result<HttpSessionProvider> {
    Ok(HttpSessionProvider::new(
        base,
        Some(SecretString::from(ANON_KEY)),
        token.map(SecretString::from),
        Duration::from_millis(500),
    )?)
}

#[tokio::test]
async fn valid_token_yields_session() -> Result<()> {
    let base = spawn_auth_service().await?;
    let session = provider(&base, Some("valid"))?.current_session().await?;

    let session = session.expect("session should be present");
    assert_eq!(session.user_id, "5e1f");
    assert_eq!(session.email.as_deref(), Some("ada@example.com"));
    Ok(())
}

#[tokio::test]
async fn rejected_tokens_mean_no_session() -> Result<()> {
    let base = spawn_auth_service().await?;

    for token in ["invalid", "expired"] {
        let session = provider(&base, Some(token))?.current_session().await?;
        assert_eq!(session, None, "token {token}");
    }
    Ok(())
}

#[tokio::test]
async fn server_errors_are_reported_with_truncated_body() -> Result<()> {
    let base = spawn_auth_service().await?;
    let result = provider(&base, Some("outage"))?.current_session().await;

    match result {
        Err(SessionError::Http { status, message }) => {
            assert_eq!(status, 503);
            assert!(message.starts_with("upstream down"));
            assert_eq!(message.chars().count(), 200);
        }
        other => panic!("expected http error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn undecodable_body_is_a_parse_error() -> Result<()> {
    let base = spawn_auth_service().await?;
    let result = provider(&base, Some("broken"))?.current_session().await;

    assert!(matches!(result, Err(SessionError::Parse(_))));
    Ok(())
}

#[tokio::test]
async fn slow_service_times_out() -> Result<()> {
    let base = spawn_auth_service().await?;
    let result = provider(&base, Some("slow"))?.current_session().await;

    assert!(matches!(result, Err(SessionError::Timeout(_))));
    Ok(())
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let base = Url::parse(&format!("http://{addr}"))?;
    let result = provider(&base, Some("valid"))?.current_session().await;

    assert!(matches!(result, Err(SessionError::Network(_))));
    Ok(())
}

#[tokio::test]
async fn guard_falls_back_to_sign_in_when_the_service_fails() -> Result<()> {
    let base = spawn_auth_service().await?;
    let guard = NavigationGuard::new(provider(&base, Some("outage"))?);
    let target = app_routes()?.resolve("/dashboard");

    assert_eq!(
        guard.check(&target, &Location::start()).await,
        Decision::Redirect(SIGN_IN)
    );
    Ok(())
}
