use crate::routes::{RouteTable, View, app_routes};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RouteListing {
    pub path: String,
    pub href: String,
    pub name: Option<String>,
    pub protected: bool,
    pub views: Vec<View>,
}

/// Routable entries of `table`, with links under `base_path`.
#[must_use]
pub fn listing(table: &RouteTable, base_path: &str) -> Vec<RouteListing> {
    table
        .records()
        .iter()
        .map(|record| RouteListing {
            path: record.path.clone(),
            href: format!("{base_path}{}", record.path),
            name: record.name.clone(),
            protected: record.meta.requires_auth,
            views: record.matched.iter().map(|route| route.view).collect(),
        })
        .collect()
}

/// Print the app route table
///
/// # Errors
/// Returns an error if the table is invalid or cannot be serialized
pub fn handle(base_path: &str) -> Result<()> {
    let table = app_routes()?;
    println!(
        "{}",
        serde_json::to_string_pretty(&listing(table, base_path))?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_marks_protected_routes_and_prefixes_base() {
        let routes = listing(app_routes().unwrap(), "/app");

        assert_eq!(routes.len(), 4);
        assert_eq!(routes[0].href, "/app/");
        assert!(!routes[0].protected);
        assert_eq!(routes[0].views, vec![View::SignIn]);

        assert_eq!(routes[1].href, "/app/dashboard");
        assert!(routes[1].protected);
        assert_eq!(routes[1].views, vec![View::DashboardLayout, View::Dashboard]);
    }

    #[test]
    fn listing_serializes_to_json() {
        let routes = listing(app_routes().unwrap(), "");
        let json = serde_json::to_value(&routes).unwrap();

        assert_eq!(json[2]["path"], "/session");
        assert_eq!(json[2]["name"], "Session");
        assert_eq!(json[2]["protected"], true);
        assert_eq!(json[2]["views"][1], "Session");
    }
}
