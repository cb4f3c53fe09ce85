//! Query parameter merging and search term helpers
//!
//! Every E-utilities request is described by a flat map of query parameters.
//! Requests are assembled by layering partial maps on top of each other:
//! the configured defaults first, then the operation's own parameters, then
//! whatever the caller passed in. [`merge_query_options`] performs that fold.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::result;

use serde::{Deserialize, Deserializer, Serialize};

/// A partial set of E-utilities query parameters
///
/// Values are stored as strings, since they end up in the URL query string anyway.
/// Keys are kept sorted so that request URLs are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryOptions(BTreeMap<String, String>);

impl QueryOptions {
    /// Create an empty set of query options
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add a parameter, replacing any previous value for the same key
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_service::QueryOptions;
    ///
    /// let options = QueryOptions::new()
    ///     .with("db", "pubmed")
    ///     .with("retmax", 20);
    ///
    /// assert_eq!(options.get("retmax"), Some("20"));
    /// ```
    pub fn with<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a parameter in place, returning the value it replaced
    pub fn insert<K: Into<String>, V: ToString>(&mut self, key: K, value: V) -> Option<String> {
        self.0.insert(key.into(), value.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a QueryOptions {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for QueryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.0.iter().map(|(k, v)| format!("{k}={v}")).collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

/// Scalar accepted as a parameter value in configuration files
///
/// YAML and JSON configs naturally write `retmax: 20` or `usehistory: true`,
/// so any scalar is accepted and stringified.
#[derive(Deserialize)]
#[serde(untagged)]
enum ParamValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Integer(i) => write!(f, "{i}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl<'de> Deserialize<'de> for QueryOptions {
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, ParamValue>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

/// Merge partial query options left to right
///
/// Later maps win on key collisions. The inputs are left untouched and a new
/// map is returned.
///
/// # Example
///
/// ```
/// use pubmed_service::QueryOptions;
/// use pubmed_service::pubmed::query::merge_query_options;
///
/// let defaults = QueryOptions::new().with("a", 1);
/// let overrides = QueryOptions::new().with("a", 2).with("b", 3);
///
/// let merged = merge_query_options(&[&defaults, &overrides]);
/// assert_eq!(merged.get("a"), Some("2"));
/// assert_eq!(merged.get("b"), Some("3"));
/// assert_eq!(defaults.get("a"), Some("1"));
/// ```
pub fn merge_query_options(options: &[&QueryOptions]) -> QueryOptions {
    options
        .iter()
        .fold(QueryOptions::new(), |mut merged, partial| {
            merged
                .0
                .extend(partial.iter().map(|(k, v)| (k.clone(), v.clone())));
            merged
        })
}

/// Combine search terms into a single ESearch `term` value
///
/// Each term is trimmed and wrapped in parentheses, and the terms are joined
/// with the boolean `AND` operator. Empty terms are dropped.
///
/// # Example
///
/// ```
/// use pubmed_service::pubmed::query::combine_search_terms;
///
/// assert_eq!(combine_search_terms(&["foo", "bar"]), "(foo) AND (bar)");
/// ```
pub fn combine_search_terms<S: AsRef<str>>(terms: &[S]) -> String {
    terms
        .iter()
        .map(|term| term.as_ref().trim())
        .filter(|term| !term.is_empty())
        .map(|term| format!("({term})"))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Whether a term is missing, empty or whitespace-only
pub fn is_empty_term(term: Option<&str>) -> bool {
    term.is_none_or(|t| t.trim().is_empty())
}
