//! History-mode router that runs every navigation through the guard.
//!
//! Navigations are serialized: the router state lock is held from resolution
//! until the final location is committed, so attempts complete one at a time in
//! the order they were triggered. A redirect starts a new guarded attempt
//! towards the named route, keeping the original source location.

use crate::{
    guard::{Decision, NavigationGuard},
    routes::{Location, RouteTable, path::same_path},
    session::SessionProvider,
};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

/// Longest redirect chain accepted before a navigation is failed.
pub const MAX_REDIRECTS: usize = 10;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("redirect to unknown route {0}")]
    UnknownRoute(String),
    #[error("navigation to {0} exceeded {MAX_REDIRECTS} redirects")]
    RedirectLoop(String),
}

/// A committed navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub location: Location,
    /// Full paths that were redirected away from, in order.
    pub redirected_from: Vec<String>,
}

impl Navigation {
    #[must_use]
    pub fn was_redirected(&self) -> bool {
        !self.redirected_from.is_empty()
    }
}

#[derive(Clone, Copy, Debug)]
enum Mode {
    Push,
    Replace,
}

#[derive(Debug)]
struct State {
    current: Location,
    history: Vec<String>,
}

#[derive(Debug)]
pub struct Router<'a, P> {
    table: &'a RouteTable,
    base_path: String,
    guard: NavigationGuard<P>,
    state: Mutex<State>,
}

impl<'a, P: SessionProvider> Router<'a, P> {
    /// `base_path` must already be normalized (see
    /// [`crate::config::normalize_base_path`]).
    #[must_use]
    pub fn new(table: &'a RouteTable, base_path: &str, guard: NavigationGuard<P>) -> Self {
        Self {
            table,
            base_path: base_path.to_string(),
            guard,
            state: Mutex::new(State {
                current: Location::start(),
                history: Vec::new(),
            }),
        }
    }

    /// Navigates to `url` and appends the result to the history.
    ///
    /// # Errors
    /// Fails when a redirect names an unknown route or the redirect chain
    /// exceeds [`MAX_REDIRECTS`]. The current location is left unchanged.
    pub async fn push(&self, url: &str) -> Result<Navigation, Error> {
        self.navigate(url, Mode::Push).await
    }

    /// Navigates to `url` and overwrites the last history entry.
    ///
    /// # Errors
    /// Same as [`Router::push`].
    pub async fn replace(&self, url: &str) -> Result<Navigation, Error> {
        self.navigate(url, Mode::Replace).await
    }

    pub async fn current(&self) -> Location {
        self.state.lock().await.current.clone()
    }

    pub async fn history(&self) -> Vec<String> {
        self.state.lock().await.history.clone()
    }

    /// Link target for a location, including the base path.
    #[must_use]
    pub fn href(&self, location: &Location) -> String {
        format!("{}{}", self.base_path, location.full_path)
    }

    /// Removes the base path from a browser URL. URLs outside the base are
    /// returned untouched.
    #[must_use]
    pub fn strip_base<'u>(&self, url: &'u str) -> &'u str {
        let url = url.trim();
        if self.base_path.is_empty() {
            return url;
        }

        let Some(prefix) = url.get(..self.base_path.len()) else {
            return url;
        };
        if !same_path(prefix, &self.base_path) {
            return url;
        }
        let rest = &url[prefix.len()..];
        match rest.chars().next() {
            None => "/",
            Some('/' | '?' | '#') => rest,
            Some(_) => url,
        }
    }

    async fn navigate(&self, url: &str, mode: Mode) -> Result<Navigation, Error> {
        let mut state = self.state.lock().await;
        let from = state.current.clone();
        let mut target = self.table.resolve(self.strip_base(url));
        let mut redirected_from = Vec::new();

        while let Decision::Redirect(name) = self.guard.check(&target, &from).await {
            if redirected_from.len() >= MAX_REDIRECTS {
                return Err(Error::RedirectLoop(url.trim().to_string()));
            }
            redirected_from.push(target.full_path.clone());
            target = self
                .table
                .resolve_name(name)
                .map_err(|_| Error::UnknownRoute(name.to_string()))?;
        }

        match mode {
            Mode::Push => state.history.push(target.full_path.clone()),
            Mode::Replace => match state.history.last_mut() {
                Some(last) => last.clone_from(&target.full_path),
                None => state.history.push(target.full_path.clone()),
            },
        }
        state.current = target.clone();

        debug!(
            to = %target.full_path,
            redirects = redirected_from.len(),
            "navigation committed"
        );

        Ok(Navigation {
            location: target,
            redirected_from,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        routes::{DASHBOARD, RouteEntry, RouteMeta, SIGN_IN, View, app_routes},
        session::{Session, StaticSessionProvider},
    };

    fn app_router(signed_in: bool, base: &str) -> Router<'static, StaticSessionProvider> {
        let provider = if signed_in {
            StaticSessionProvider::signed_in(Session::anonymous())
        } else {
            StaticSessionProvider::signed_out()
        };
        Router::new(app_routes().unwrap(), base, NavigationGuard::new(provider))
    }

    #[test]
    fn strip_base_only_removes_a_whole_prefix() {
        let router = app_router(false, "/app");
        assert_eq!(router.strip_base("/app"), "/");
        assert_eq!(router.strip_base("/app/session"), "/session");
        assert_eq!(router.strip_base("/APP/session"), "/session");
        assert_eq!(router.strip_base("/app?x=1"), "?x=1");
        assert_eq!(router.strip_base("/apple"), "/apple");
        assert_eq!(router.strip_base("/other"), "/other");
        assert_eq!(router.strip_base("/é"), "/é");

        let bare = app_router(false, "");
        assert_eq!(bare.strip_base("/session"), "/session");
    }

    #[test]
    fn href_prefixes_base_path() {
        let router = app_router(false, "/app");
        let location = app_routes().unwrap().resolve("/session?id=3");
        assert_eq!(router.href(&location), "/app/session?id=3");
    }

    #[tokio::test]
    async fn starts_at_unmatched_root() {
        let router = app_router(true, "");
        assert_eq!(router.current().await, Location::start());
        assert!(router.history().await.is_empty());
    }

    #[tokio::test]
    async fn redirect_is_followed_and_recorded() {
        let router = app_router(false, "");
        let navigation = router.push("/dashboard").await.unwrap();

        assert_eq!(navigation.location.name.as_deref(), Some(SIGN_IN));
        assert_eq!(navigation.redirected_from, vec!["/dashboard".to_string()]);
        assert!(navigation.was_redirected());
        assert_eq!(router.history().await, vec!["/".to_string()]);
    }

    #[tokio::test]
    async fn replace_overwrites_last_entry() {
        let router = app_router(true, "");
        router.push("/session").await.unwrap();
        router.replace("/preferences").await.unwrap();

        assert_eq!(router.history().await, vec!["/preferences".to_string()]);
        assert_eq!(router.current().await.name.as_deref(), Some("Preferences"));
    }

    #[tokio::test]
    async fn replace_on_empty_history_pushes() {
        let router = app_router(true, "");
        router.replace("/session").await.unwrap();
        assert_eq!(router.history().await, vec!["/session".to_string()]);
    }

    #[tokio::test]
    async fn self_redirecting_table_fails_with_loop_error() {
        let table = RouteTable::new(vec![
            RouteEntry::new("/", View::SignIn)
                .named(SIGN_IN)
                .meta(RouteMeta::protected()),
        ])
        .unwrap();
        let router = Router::new(
            &table,
            "",
            NavigationGuard::new(StaticSessionProvider::signed_out()),
        );

        assert_eq!(
            router.push("/").await,
            Err(Error::RedirectLoop("/".to_string()))
        );
        assert_eq!(router.current().await, Location::start());
        assert!(router.history().await.is_empty());
    }

    #[tokio::test]
    async fn redirect_to_missing_route_is_an_error() {
        let table =
            RouteTable::new(vec![RouteEntry::new("/", View::SignIn).named(SIGN_IN)]).unwrap();
        let router = Router::new(
            &table,
            "",
            NavigationGuard::new(StaticSessionProvider::signed_in(Session::anonymous())),
        );

        assert_eq!(
            router.push("/").await,
            Err(Error::UnknownRoute(DASHBOARD.to_string()))
        );
    }
}
