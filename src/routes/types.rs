//! Data types for route declarations and resolved locations.

use serde::Serialize;

/// Views referenced by the route table. Their rendering lives elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum View {
    SignIn,
    Dashboard,
    DashboardLayout,
    Session,
    Preferences,
}

/// Metadata attached to a route declaration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RouteMeta {
    pub requires_auth: bool,
}

impl RouteMeta {
    /// Metadata for routes that need a session.
    #[must_use]
    pub const fn protected() -> Self {
        Self {
            requires_auth: true,
        }
    }

    /// Combines a parent's metadata with a child's. Flags set anywhere on the
    /// matched chain stay set.
    #[must_use]
    pub const fn merge(self, child: Self) -> Self {
        Self {
            requires_auth: self.requires_auth || child.requires_auth,
        }
    }
}

/// One declaration in the route tree.
///
/// Top-level paths are absolute; child paths are relative to the parent. An
/// entry with children acts as a layout wrapper and is not routable on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: String,
    pub name: Option<String>,
    pub view: View,
    pub meta: RouteMeta,
    pub children: Vec<RouteEntry>,
}

impl RouteEntry {
    #[must_use]
    pub fn new(path: impl Into<String>, view: View) -> Self {
        Self {
            path: path.into(),
            name: None,
            view,
            meta: RouteMeta::default(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    #[must_use]
    pub fn children(mut self, children: Vec<RouteEntry>) -> Self {
        self.children = children;
        self
    }
}

/// A record on the matched chain of a location, outermost first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchedRoute {
    pub path: String,
    pub name: Option<String>,
    pub view: View,
    pub meta: RouteMeta,
}

/// A routable leaf of the table with its full path and inherited metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Record {
    pub path: String,
    pub name: Option<String>,
    pub meta: RouteMeta,
    pub matched: Vec<MatchedRoute>,
}

/// The outcome of resolving a URL against the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Normalized path, without base, query or fragment.
    pub path: String,
    /// Path plus query and fragment as requested.
    pub full_path: String,
    pub query: Option<String>,
    pub hash: Option<String>,
    pub name: Option<String>,
    /// Metadata merged across `matched`, root to leaf.
    pub meta: RouteMeta,
    pub matched: Vec<MatchedRoute>,
}

impl Location {
    /// The location a router reports before its first navigation.
    #[must_use]
    pub fn start() -> Self {
        Self {
            path: "/".to_string(),
            full_path: "/".to_string(),
            query: None,
            hash: None,
            name: None,
            meta: RouteMeta::default(),
            matched: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        !self.matched.is_empty()
    }

    /// Views to render for this location, layout first.
    #[must_use]
    pub fn views(&self) -> Vec<View> {
        self.matched.iter().map(|route| route.view).collect()
    }
}
