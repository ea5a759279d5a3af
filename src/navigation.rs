//! Navigation context: the location a screen is mounted at, route parameter
//! matching, and redirects. The navigator is a trait so a real router and the
//! in-memory [`History`] are interchangeable.

use crate::api::AppError;
use std::{
    collections::BTreeMap,
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
};
use url::{form_urlencoded, Url};

const LOCATION_BASE: &str = "http://localhost/";

/// A parsed location: path plus query parameters (first value wins).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: BTreeMap<String, String>,
}

impl Location {
    /// Parses a path with optional query string, or an absolute URL.
    ///
    /// # Errors
    /// Returns an error if the input cannot be parsed as a URL reference.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let url = Url::parse(LOCATION_BASE)
            .and_then(|base| base.join(input.trim()))
            .map_err(|err| AppError::Config(format!("Invalid location {input}: {err}")))?;

        let mut query = BTreeMap::new();
        for (key, value) in url.query_pairs() {
            query
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }

        Ok(Self {
            path: url.path().to_string(),
            query,
        })
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Matches the path against a pattern such as `/auth/:authType` and returns
    /// the captured parameters. Trailing slashes are ignored.
    #[must_use]
    pub fn route_params(&self, pattern: &str) -> Option<BTreeMap<String, String>> {
        let pattern_segments: Vec<&str> = segments(pattern).collect();
        let path_segments: Vec<&str> = segments(&self.path).collect();
        if pattern_segments.len() != path_segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (expected, actual) in pattern_segments.into_iter().zip(path_segments) {
            if let Some(name) = expected.strip_prefix(':') {
                params.insert(name.to_string(), actual.to_string());
            } else if expected != actual {
                return None;
            }
        }
        Some(params)
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Where to go next: a path and ordered query parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    path: String,
    query: Vec<(String, String)>,
}

impl Redirect {
    #[must_use]
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            return formatter.write_str(&self.path);
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.query)
            .finish();
        write!(formatter, "{}?{query}", self.path)
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, to: &Redirect);
}

/// In-memory navigator that records every redirect.
#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<Vec<Redirect>>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent redirect, if any.
    #[must_use]
    pub fn current(&self) -> Option<Redirect> {
        self.lock().last().cloned()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<Redirect> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Redirect>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for History {
    fn navigate(&self, to: &Redirect) {
        tracing::debug!(to = %to, "navigate");
        self.lock().push(to.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_path_and_query() {
        let location = Location::parse("/auth/reset-password?code=abc123&code=ignored").expect("location");
        assert_eq!(location.path(), "/auth/reset-password");
        assert_eq!(location.query("code"), Some("abc123"));
        assert_eq!(location.query("missing"), None);
    }

    #[test]
    fn parse_absolute_url_and_decodes_query() {
        let location =
            Location::parse("https://admin.example.com/auth/register?registrationToken=a%2Bb%20c")
                .expect("location");
        assert_eq!(location.path(), "/auth/register");
        assert_eq!(location.query("registrationToken"), Some("a+b c"));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Location::parse("http://[::1").is_err());
    }

    #[test]
    fn route_params_capture_segments() {
        let location = Location::parse("/auth/register-admin/").expect("location");
        let params = location.route_params("/auth/:authType").expect("match");
        assert_eq!(params.get("authType").map(String::as_str), Some("register-admin"));

        assert!(location.route_params("/admin/:authType").is_none());
        assert!(location.route_params("/auth/:authType/:extra").is_none());
    }

    #[test]
    fn redirect_display_encodes_query() {
        assert_eq!(Redirect::to("/").to_string(), "/");
        let redirect = Redirect::to("/usecase").with_query("hasAdmin", true);
        assert_eq!(redirect.to_string(), "/usecase?hasAdmin=true");
        assert_eq!(redirect.query("hasAdmin"), Some("true"));

        let oops = Redirect::to("/auth/oops").with_query("info", "Invalid token & more");
        assert_eq!(oops.to_string(), "/auth/oops?info=Invalid+token+%26+more");
    }

    #[test]
    fn history_records_navigation() {
        let history = History::new();
        assert_eq!(history.current(), None);
        history.navigate(&Redirect::to("/auth/login"));
        history.navigate(&Redirect::to("/"));
        assert_eq!(history.entries().len(), 2);
        assert_eq!(history.current(), Some(Redirect::to("/")));
    }
}
