//! Navigation guard: decides per navigation whether to continue or redirect
//! based on session presence. The decision itself is the pure [`decide`]; the
//! [`NavigationGuard`] adapter queries the session once per attempt and always
//! produces exactly one decision, including when the query fails.
//!
//! UX only; real access control must live on the API.

use crate::{
    routes::{DASHBOARD, Location, SIGN_IN},
    session::SessionProvider,
};
use std::{fmt, str::FromStr};
use tracing::{debug, info, warn};

/// Outcome of a guard run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Continue,
    /// Redirect to the route with this name.
    Redirect(&'static str),
}

/// What a failed session query means for the navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionFailurePolicy {
    /// Decide as if no session were present.
    #[default]
    SignedOut,
    /// Send everything except the sign-in page to sign-in.
    Strict,
}

impl SessionFailurePolicy {
    pub const VARIANTS: [&'static str; 2] = ["signed-out", "strict"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SignedOut => "signed-out",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for SessionFailurePolicy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SessionFailurePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "signed-out" | "signed_out" => Ok(Self::SignedOut),
            "strict" => Ok(Self::Strict),
            other => Err(format!("invalid session failure policy: {other}")),
        }
    }
}

/// Rules in order, first match wins:
/// signed in and heading to `/` goes to the dashboard; protected targets
/// without a session go to sign-in; everything else continues.
#[must_use]
pub fn decide(target: &Location, session_present: bool) -> Decision {
    if session_present && target.path == "/" {
        return Decision::Redirect(DASHBOARD);
    }

    if target.meta.requires_auth && !session_present {
        return Decision::Redirect(SIGN_IN);
    }

    Decision::Continue
}

fn decide_without_session(target: &Location, policy: SessionFailurePolicy) -> Decision {
    match policy {
        SessionFailurePolicy::SignedOut => decide(target, false),
        SessionFailurePolicy::Strict if target.name.as_deref() == Some(SIGN_IN) => {
            Decision::Continue
        }
        SessionFailurePolicy::Strict => Decision::Redirect(SIGN_IN),
    }
}

#[derive(Debug)]
pub struct NavigationGuard<P> {
    provider: P,
    on_session_error: SessionFailurePolicy,
}

impl<P: SessionProvider> NavigationGuard<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            on_session_error: SessionFailurePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: SessionFailurePolicy) -> Self {
        self.on_session_error = policy;
        self
    }

    /// Queries the session once and decides. Never fails: query errors are
    /// logged and handled by the failure policy.
    pub async fn check(&self, to: &Location, from: &Location) -> Decision {
        let decision = match self.provider.current_session().await {
            Ok(session) => decide(to, session.is_some()),
            Err(err) => {
                warn!(
                    error = %err,
                    policy = %self.on_session_error,
                    to = %to.full_path,
                    "session query failed"
                );
                decide_without_session(to, self.on_session_error)
            }
        };

        match decision {
            Decision::Redirect(name) => info!(
                to = %to.full_path,
                from = %from.full_path,
                redirect = name,
                "navigation redirected"
            ),
            Decision::Continue => debug!(
                to = %to.full_path,
                from = %from.full_path,
                "navigation allowed"
            ),
        }

        decision
    }

    /// Callback form of [`NavigationGuard::check`] for hosts that pass a
    /// continuation; `next` runs exactly once.
    pub async fn before_each<F>(&self, to: &Location, from: &Location, next: F)
    where
        F: FnOnce(Decision),
    {
        next(self.check(to, from).await);
    }
}
