//! Validated route table and path resolution.

use super::{
    path::{join, normalize, same_path, split_url},
    types::{Location, MatchedRoute, Record, RouteEntry, RouteMeta},
};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("duplicate route name: {0}")]
    DuplicateName(String),
    #[error("route path {0} overlaps an earlier route")]
    OverlappingPath(String),
    #[error("invalid route path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },
    #[error("no route named {0}")]
    UnknownName(String),
    #[error("route name {0} is on a layout; only leaf routes can be named")]
    NamedLayout(String),
}

/// Route tree flattened into routable leaves, in declaration order.
#[derive(Clone, Debug)]
pub struct RouteTable {
    records: Vec<Record>,
}

impl RouteTable {
    /// Builds the table and rejects duplicate names, names on layouts,
    /// overlapping leaf paths and misplaced absolute/relative paths.
    ///
    /// # Errors
    /// Returns the first configuration error found, in declaration order.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, Error> {
        let mut records = Vec::new();
        flatten(&entries, None, &[], &mut records)?;

        let mut seen_names = HashSet::new();
        for name in records.iter().filter_map(|record| record.name.as_deref()) {
            if !seen_names.insert(name) {
                return Err(Error::DuplicateName(name.to_string()));
            }
        }

        let mut seen_paths = HashSet::new();
        for record in &records {
            if !seen_paths.insert(record.path.to_ascii_lowercase()) {
                return Err(Error::OverlappingPath(record.path.clone()));
            }
        }

        Ok(Self { records })
    }

    /// Routable leaves in declaration order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Resolves a URL (path with optional query and fragment). The first leaf
    /// whose full path matches wins; unknown paths resolve unmatched.
    #[must_use]
    pub fn resolve(&self, url: &str) -> Location {
        let (raw_path, query, hash) = split_url(url.trim());
        let path = normalize(raw_path);

        let mut full_path = path.clone();
        if let Some(query) = query {
            full_path.push('?');
            full_path.push_str(query);
        }
        if let Some(hash) = hash {
            full_path.push('#');
            full_path.push_str(hash);
        }

        let record = self
            .records
            .iter()
            .find(|record| same_path(&record.path, &path));

        debug!(
            path = %path,
            route = record.and_then(|r| r.name.as_deref()).unwrap_or("-"),
            "resolved location"
        );

        match record {
            Some(record) => Location {
                path,
                full_path,
                query: query.map(str::to_string),
                hash: hash.map(str::to_string),
                name: record.name.clone(),
                meta: record.meta,
                matched: record.matched.clone(),
            },
            None => Location {
                path,
                full_path,
                query: query.map(str::to_string),
                hash: hash.map(str::to_string),
                name: None,
                meta: RouteMeta::default(),
                matched: Vec::new(),
            },
        }
    }

    /// Resolves a route by name, as used for redirects.
    ///
    /// # Errors
    /// Returns [`Error::UnknownName`] when no declaration carries `name`.
    pub fn resolve_name(&self, name: &str) -> Result<Location, Error> {
        let record = self
            .records
            .iter()
            .find(|record| record.name.as_deref() == Some(name))
            .ok_or_else(|| Error::UnknownName(name.to_string()))?;

        Ok(Location {
            path: record.path.clone(),
            full_path: record.path.clone(),
            query: None,
            hash: None,
            name: record.name.clone(),
            meta: record.meta,
            matched: record.matched.clone(),
        })
    }
}

fn flatten(
    entries: &[RouteEntry],
    parent: Option<&str>,
    ancestors: &[MatchedRoute],
    records: &mut Vec<Record>,
) -> Result<(), Error> {
    for entry in entries {
        let path = match parent {
            None if !entry.path.trim().starts_with('/') => {
                return Err(Error::InvalidPath {
                    path: entry.path.clone(),
                    reason: "top-level paths must start with '/'",
                });
            }
            None => normalize(&entry.path),
            Some(_) if entry.path.trim().starts_with('/') => {
                return Err(Error::InvalidPath {
                    path: entry.path.clone(),
                    reason: "child paths must be relative",
                });
            }
            Some(parent) => join(parent, &entry.path),
        };

        let mut chain = ancestors.to_vec();
        chain.push(MatchedRoute {
            path: path.clone(),
            name: entry.name.clone(),
            view: entry.view,
            meta: entry.meta,
        });

        if entry.children.is_empty() {
            let meta = chain
                .iter()
                .fold(RouteMeta::default(), |merged, route| merged.merge(route.meta));
            records.push(Record {
                path,
                name: entry.name.clone(),
                meta,
                matched: chain,
            });
        } else if let Some(name) = &entry.name {
            return Err(Error::NamedLayout(name.clone()));
        } else {
            flatten(&entry.children, Some(&path), &chain, records)?;
        }
    }

    Ok(())
}
