//! Route declarations for the console app. The table is built once per
//! process and is read-only afterwards; redirect targets are referenced by the
//! names declared here.

pub mod path;
mod table;
mod types;

pub use table::{Error, RouteTable};
pub use types::{Location, MatchedRoute, Record, RouteEntry, RouteMeta, View};

use std::sync::OnceLock;

pub const SIGN_IN: &str = "SignIn";
pub const DASHBOARD: &str = "Dashboard";
pub const SESSION: &str = "Session";
pub const PREFERENCES: &str = "Preferences";

/// Declarations of the console app, in matching order.
#[must_use]
pub fn app_entries() -> Vec<RouteEntry> {
    vec![
        RouteEntry::new("/", View::SignIn).named(SIGN_IN),
        RouteEntry::new("/", View::DashboardLayout)
            .meta(RouteMeta::protected())
            .children(vec![
                RouteEntry::new("dashboard", View::Dashboard).named(DASHBOARD),
                RouteEntry::new("session", View::Session).named(SESSION),
                RouteEntry::new("preferences", View::Preferences).named(PREFERENCES),
            ]),
    ]
}

/// The validated app table, built on first use.
///
/// # Errors
/// Returns the validation error of [`app_entries`], which is a programming
/// error caught by the tests below.
pub fn app_routes() -> Result<&'static RouteTable, Error> {
    static TABLE: OnceLock<Result<RouteTable, Error>> = OnceLock::new();
    TABLE
        .get_or_init(|| RouteTable::new(app_entries()))
        .as_ref()
        .map_err(Clone::clone)
}
