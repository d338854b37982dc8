//! Session query capability used by the navigation guard. Providers only answer
//! "is there a session right now"; storage and refresh of credentials belong to
//! the auth service. Providers must never log token material.

mod client;
mod types;

pub use client::HttpSessionProvider;
pub use types::{Session, SessionError};

use std::{future::Future, sync::Arc};

/// Answers whether a session is present. `Ok(None)` means signed out and is
/// not an error; `Err` is reserved for transport or backend failures.
pub trait SessionProvider: Send + Sync {
    fn current_session(&self) -> impl Future<Output = Result<Option<Session>, SessionError>> + Send;
}

impl<P: SessionProvider> SessionProvider for Arc<P> {
    fn current_session(&self) -> impl Future<Output = Result<Option<Session>, SessionError>> + Send {
        (**self).current_session()
    }
}

/// Provider with a fixed answer, for offline runs and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticSessionProvider {
    session: Option<Session>,
}

impl StaticSessionProvider {
    #[must_use]
    pub fn signed_in(session: Session) -> Self {
        Self {
            session: Some(session),
        }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self { session: None }
    }
}

impl SessionProvider for StaticSessionProvider {
    async fn current_session(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.session.clone())
    }
}

/// The providers the CLI can hand to a router.
#[derive(Debug)]
pub enum SessionSource {
    Http(HttpSessionProvider),
    Static(StaticSessionProvider),
}

impl SessionProvider for SessionSource {
    async fn current_session(&self) -> Result<Option<Session>, SessionError> {
        match self {
            Self::Http(provider) => provider.current_session().await,
            Self::Static(provider) => provider.current_session().await,
        }
    }
}
