use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single `path -> url` entry from a mapping file.
///
/// YAML is expected to be a list of maps:
///
/// ```yaml
/// - path: /urlshort
///   url: https://github.com/gophercises/urlshort
/// ```
///
/// JSON is expected to be an array of objects with the same fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathMapping {
    pub path: String,
    pub url: String,
}

impl PathMapping {
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

/// Immutable table of request paths to destination URLs.
///
/// Built once before serving starts and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, String>,
}

impl RouteTable {
    /// Builds a table from `entries`.
    ///
    /// Fails on the first repeated path; no partial table is returned.
    pub fn build(entries: impl IntoIterator<Item = PathMapping>) -> Result<Self> {
        let mut routes = HashMap::new();
        for PathMapping { path, url } in entries {
            if routes.contains_key(&path) {
                return Err(CoreError::DuplicatePath(path));
            }
            routes.insert(path, url);
        }
        Ok(Self { routes })
    }

    /// Parses a YAML list of mappings and builds the table.
    pub fn from_yaml(data: &[u8]) -> Result<Self> {
        let entries: Vec<PathMapping> = serde_yaml::from_slice(data)
            .map_err(|e| CoreError::MalformedMappings(e.to_string()))?;
        Self::build(entries)
    }

    /// Parses a JSON array of mappings and builds the table.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let entries: Vec<PathMapping> = serde_json::from_slice(data)
            .map_err(|e| CoreError::MalformedMappings(e.to_string()))?;
        Self::build(entries)
    }

    /// Exact-match lookup.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.routes.get(path).map(String::as_str)
    }

    /// Looks up a request path after trimming trailing slashes and whitespace.
    pub fn resolve(&self, request_path: &str) -> Option<&str> {
        self.lookup(normalize_path(request_path))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn normalize_path(path: &str) -> &str {
    path.trim_end_matches(|c: char| c == '/' || c.is_whitespace())
}
