//! Item, key, and pagination types for the table store.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use serde::{Deserialize, Serialize};

/// An attribute value stored on an item.
///
/// The raffle data model needs exactly two attribute kinds: plain text and
/// sets of text (the admin email set).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// A text attribute.
    Text(String),
    /// A set of text values.
    TextSet(BTreeSet<String>),
}

impl Value {
    /// Convenience constructor for a text attribute.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns the text content, or `None` for non-text values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::TextSet(_) => None,
        }
    }

    /// Returns the set content, or `None` for non-set values.
    pub fn as_text_set(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Text(_) => None,
            Self::TextSet(values) => Some(values),
        }
    }
}

/// Attributes of a stored item, keyed by attribute name.
///
/// Items carry their own key fields as attributes, mirroring how table
/// stores return them.
pub type Attributes = BTreeMap<String, Value>;

/// Key identifying an item: a partition key plus an optional sort key.
///
/// The raffle table uses bare partition keys (the shortcode); the entry
/// table uses composite keys (shortcode, email). Ordering is partition
/// first, then sort key, which makes table iteration deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemKey {
    /// Partition key.
    pub partition: String,
    /// Sort key, for tables with composite keys.
    pub sort: Option<String>,
}

impl ItemKey {
    /// Creates a key for a table with a bare partition key.
    pub fn partition(partition: impl Into<String>) -> Self {
        Self { partition: partition.into(), sort: None }
    }

    /// Creates a composite key.
    pub fn composite(partition: impl Into<String>, sort: impl Into<String>) -> Self {
        Self { partition: partition.into(), sort: Some(sort.into()) }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sort {
            Some(sort) => write!(f, "{}/{}", self.partition, sort),
            None => write!(f, "{}", self.partition),
        }
    }
}

/// Opaque cursor returned by a paginated query indicating more results
/// remain.
///
/// Callers pass tokens back unmodified; the contents are an implementation
/// detail of the store that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    /// Wraps a store-specific cursor value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw cursor value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPage {
    /// Items in this page, in sort-key order.
    pub items: Vec<Attributes>,
    /// Cursor for the next page; `None` when the partition is exhausted.
    pub next_token: Option<ContinuationToken>,
}
