//! Label selectors and the matching capability analyzers consume.
//!
//! Analyzers never match labels directly; they go through a
//! [`SelectorMatcher`] so the matching rules can be swapped out.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A set of labels attached to a resource.
pub type Labels = BTreeMap<String, String>;

/// Equality-based label selector: every key must be present with the given value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selector(BTreeMap<String, String>);

impl Selector {
    /// Create an empty selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required label.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Required value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of requirements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the selector has no requirements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate requirements in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True if this selector is exactly the single pair `key=value`.
    pub fn is_exactly(&self, key: &str, value: &str) -> bool {
        self.len() == 1 && self.get(key) == Some(value)
    }
}

impl From<BTreeMap<String, String>> for Selector {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Selector {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let pairs = iter.into_iter().map(|(k, v)| (k.into(), v.into()));
        Self(pairs.collect())
    }
}

/// Renders as `k1=v1,k2=v2` with keys sorted; empty selector renders empty.
impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{}={}", key, value)?;
            first = false;
        }
        Ok(())
    }
}

/// Decides whether a selector matches a set of labels.
pub trait SelectorMatcher: Send + Sync {
    fn matches(&self, selector: &Selector, labels: &Labels) -> bool;
}

/// Conjunctive equality matching. An empty selector matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelSetMatcher;

impl SelectorMatcher for LabelSetMatcher {
    fn matches(&self, selector: &Selector, labels: &Labels) -> bool {
        selector
            .iter()
            .all(|(key, value)| labels.get(key).map(String::as_str) == Some(value))
    }
}

impl<F> SelectorMatcher for F
where
    F: Fn(&Selector, &Labels) -> bool + Send + Sync,
{
    fn matches(&self, selector: &Selector, labels: &Labels) -> bool {
        self(selector, labels)
    }
}
