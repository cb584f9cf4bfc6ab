//! In-memory table store for testing.

use std::{
    collections::{BTreeMap, HashMap},
    ops::Bound,
};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::{
    error::{Result, StoreError},
    store::KeyValueStore,
    types::{Attributes, ContinuationToken, ItemKey, QueryPage, Value},
};

/// Default number of items per query page.
const DEFAULT_PAGE_SIZE: usize = 100;

/// Items of one table, ordered by key for deterministic iteration.
type TableData = BTreeMap<ItemKey, Attributes>;

/// In-memory [`KeyValueStore`] for testing.
///
/// All data is stored in memory and lost when the store is dropped. Tables
/// are created implicitly on first write; reading an unknown table behaves
/// like reading an empty one.
///
/// Query pagination is driven by `page_size` so tests can force multi-page
/// drains with tiny pages. Continuation tokens encode the last returned sort
/// key; the empty string is reserved for items without one, so sort keys are
/// assumed non-empty.
pub struct MemoryStore {
    /// Tables by name.
    tables: RwLock<HashMap<String, TableData>>,
    /// Maximum number of items per query page.
    page_size: usize,
}

impl MemoryStore {
    /// Creates an empty store with the default page size.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Creates an empty store that returns at most `page_size` items per
    /// query page.
    pub fn with_page_size(page_size: usize) -> Self {
        assert!(page_size >= 1, "page size must be at least 1, got {}", page_size);
        Self { tables: RwLock::new(HashMap::new()), page_size }
    }

    /// Returns the number of items currently stored in a table.
    pub fn item_count(&self, table: &str) -> usize {
        self.tables.read().get(table).map_or(0, BTreeMap::len)
    }

    /// Clears all tables (for testing).
    pub fn clear(&self) {
        self.tables.write().clear();
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Restricts `attrs` to the projected attribute names, or clones all of them.
fn project(attrs: &Attributes, projection: Option<&[&str]>) -> Attributes {
    match projection {
        Some(fields) => attrs
            .iter()
            .filter(|(name, _)| fields.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect(),
        None => attrs.clone(),
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn put_if_absent(&self, table: &str, key: &ItemKey, attrs: Attributes) -> Result<()> {
        let mut tables = self.tables.write();
        let data = tables.entry(table.to_string()).or_default();
        if data.contains_key(key) {
            return Err(StoreError::ConditionFailed {
                table: table.to_string(),
                key: key.clone(),
            });
        }
        data.insert(key.clone(), attrs);
        Ok(())
    }

    async fn get(&self, table: &str, key: &ItemKey) -> Result<Option<Attributes>> {
        Ok(self.tables.read().get(table).and_then(|data| data.get(key)).cloned())
    }

    async fn scan(&self, table: &str) -> Result<Vec<Attributes>> {
        Ok(self
            .tables
            .read()
            .get(table)
            .map(|data| data.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn query(
        &self,
        table: &str,
        partition: &str,
        projection: Option<&[&str]>,
        start_after: Option<ContinuationToken>,
    ) -> Result<QueryPage> {
        let tables = self.tables.read();
        let Some(data) = tables.get(table) else {
            return Ok(QueryPage { items: Vec::new(), next_token: None });
        };

        let start = match &start_after {
            None => Bound::Included(ItemKey::partition(partition)),
            Some(token) if token.as_str().is_empty() => {
                Bound::Excluded(ItemKey::partition(partition))
            },
            Some(token) => Bound::Excluded(ItemKey::composite(partition, token.as_str())),
        };

        let mut items = Vec::new();
        let mut last_key = None;
        let mut truncated = false;
        for (key, attrs) in data.range((start, Bound::Unbounded)) {
            if key.partition != partition {
                break;
            }
            if items.len() == self.page_size {
                truncated = true;
                break;
            }
            items.push(project(attrs, projection));
            last_key = Some(key);
        }

        let next_token = if truncated {
            last_key.map(|key| ContinuationToken::new(key.sort.clone().unwrap_or_default()))
        } else {
            None
        };

        Ok(QueryPage { items, next_token })
    }

    async fn update_field(
        &self,
        table: &str,
        key: &ItemKey,
        field: &str,
        value: Value,
    ) -> Result<()> {
        let mut tables = self.tables.write();
        let data = tables.entry(table.to_string()).or_default();
        data.entry(key.clone()).or_default().insert(field.to_string(), value);
        Ok(())
    }
}
