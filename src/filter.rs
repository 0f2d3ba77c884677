//! Filter parameters for list endpoints.
//!
//! The API accepts `filter[<key>]=<value>` query pairs, but only for keys it
//! documents per endpoint. Keys outside the endpoint's allow-list are dropped
//! before anything goes on the wire; the server would otherwise reject the
//! whole request.

use std::collections::BTreeMap;

/// An ordered key/value filter for a list request.
///
/// Ordering is stable (sorted by key) so identical filters always produce an
/// identical query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    entries: BTreeMap<String, String>,
}

impl Filter {
    /// An empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a filter key, replacing any previous value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.entries.insert(key.into(), value.to_string());
        self
    }

    /// Set a filter key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.entries.insert(key.into(), value.to_string());
    }

    /// Returns true if no keys are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalize against an endpoint's allow-list, producing the outbound
    /// `filter[key]=value` query pairs. Disallowed keys are dropped with a
    /// warning. Runs once per fetch, before the page loop starts.
    pub(crate) fn normalize(&self, allowed: &[&str]) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter(|(key, _)| {
                let ok = allowed.contains(&key.as_str());
                if !ok {
                    tracing::warn!(key = %key, "dropping unsupported filter key");
                }
                ok
            })
            .map(|(key, value)| (format!("filter[{key}]"), value.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Filter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filter = Self::new();
        for (k, v) in iter {
            filter.insert(k, v);
        }
        filter
    }
}
