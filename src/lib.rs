//! # Waypoint (client-side navigation with a session gate)
//!
//! `waypoint` declares the route table of the console single-page app and the
//! guard that runs before every navigation.
//!
//! ## Route Table
//!
//! The table is a static tree built once per process. The sign-in page lives at
//! `/`. A layout wrapper, also mounted at `/`, requires authentication and owns
//! the dashboard, session and preferences pages. Children inherit the parent's
//! path prefix and metadata, so every page under the layout is protected.
//!
//! ## Navigation Guard
//!
//! Before each navigation the guard queries the session collaborator once and
//! applies three rules, first match wins:
//!
//! 1. Signed in and heading to `/`: redirect to `Dashboard`.
//! 2. Target requires auth and no session: redirect to `SignIn`.
//! 3. Otherwise: continue.
//!
//! A failing session query never leaves a navigation hanging; the configured
//! [`guard::SessionFailurePolicy`] decides what it means.
//!
//! The guard is UX only. Access control for the data behind these pages must
//! live on the API.

pub mod cli;
pub mod config;
pub mod guard;
pub mod navigation;
pub mod routes;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
