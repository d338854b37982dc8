//! Path helpers shared by the route table and the router.

/// Ensures a leading slash and drops trailing slashes, keeping `/` for root.
pub fn normalize(path: &str) -> String {
    let trimmed = path.trim();
    let mut normalized = String::with_capacity(trimmed.len() + 1);
    if !trimmed.starts_with('/') {
        normalized.push('/');
    }
    normalized.push_str(trimmed);

    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }

    normalized
}

/// Joins a relative child path onto its parent's full path.
pub fn join(parent: &str, child: &str) -> String {
    let child = child.trim();
    if child.is_empty() {
        return normalize(parent);
    }
    normalize(&format!("{}/{}", parent.trim_end_matches('/'), child))
}

/// Splits a URL into path, query and fragment. Empty parts become `None`.
pub fn split_url(url: &str) -> (&str, Option<&str>, Option<&str>) {
    let (rest, hash) = match url.split_once('#') {
        Some((rest, hash)) => (rest, non_empty(hash)),
        None => (url, None),
    };
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, non_empty(query)),
        None => (rest, None),
    };
    (path, query, hash)
}

/// Compares two normalized paths the way the router matches them.
pub fn same_path(left: &str, right: &str) -> bool {
    left.eq_ignore_ascii_case(right)
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_leading_and_strips_trailing_slash() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("//"), "/");
        assert_eq!(normalize("dashboard"), "/dashboard");
        assert_eq!(normalize(" /dashboard/ "), "/dashboard");
    }

    #[test]
    fn join_nests_child_under_parent() {
        assert_eq!(join("/", "dashboard"), "/dashboard");
        assert_eq!(join("/app", "session"), "/app/session");
        assert_eq!(join("/app/", "session/"), "/app/session");
        assert_eq!(join("/app", ""), "/app");
    }

    #[test]
    fn split_url_separates_query_and_fragment() {
        assert_eq!(split_url("/session"), ("/session", None, None));
        assert_eq!(
            split_url("/session?id=4#notes"),
            ("/session", Some("id=4"), Some("notes"))
        );
        assert_eq!(split_url("/session#a?b"), ("/session", None, Some("a?b")));
        assert_eq!(split_url("/?#"), ("/", None, None));
    }

    #[test]
    fn same_path_ignores_ascii_case() {
        assert!(same_path("/Dashboard", "/dashboard"));
        assert!(!same_path("/dashboard", "/session"));
    }
}
