//! The table store trait.

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{Attributes, ContinuationToken, ItemKey, QueryPage, Value},
};

/// Abstract key-value table store.
///
/// Implementations wrap a concrete table store client; [`MemoryStore`] backs
/// tests. All concurrency control flows through `put_if_absent`: the store
/// must resolve concurrent inserts of the same key to exactly one winner.
///
/// [`MemoryStore`]: crate::MemoryStore
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Inserts an item, conditioned on no item existing at `key`.
    ///
    /// The attributes should include the key fields themselves, matching how
    /// table stores return items.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConditionFailed`] if an item already exists at
    /// `key`. Any other error is an infrastructure fault.
    ///
    /// [`StoreError::ConditionFailed`]: crate::StoreError::ConditionFailed
    async fn put_if_absent(&self, table: &str, key: &ItemKey, attrs: Attributes) -> Result<()>;

    /// Point lookup by key. Returns `None` if no item exists.
    async fn get(&self, table: &str, key: &ItemKey) -> Result<Option<Attributes>>;

    /// Returns every item in the table.
    ///
    /// Full-table scans are acceptable only while tables are small; callers
    /// own that tradeoff.
    async fn scan(&self, table: &str) -> Result<Vec<Attributes>>;

    /// Returns one page of items under a partition key.
    ///
    /// `projection` restricts the returned attributes to the named ones.
    /// `start_after` resumes from a previous page's token. A page carrying a
    /// `next_token` has more results; callers must keep following tokens
    /// until `next_token` is `None` to see every item.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidContinuationToken`] if `start_after` was
    /// not produced by this store for this partition.
    ///
    /// [`StoreError::InvalidContinuationToken`]: crate::StoreError::InvalidContinuationToken
    async fn query(
        &self,
        table: &str,
        partition: &str,
        projection: Option<&[&str]>,
        start_after: Option<ContinuationToken>,
    ) -> Result<QueryPage>;

    /// Sets a single attribute on an item, unconditionally.
    ///
    /// Creates the item if it does not exist, matching table-store update
    /// semantics. There is no compare-and-set here; callers that need one
    /// must build it from `put_if_absent`.
    async fn update_field(&self, table: &str, key: &ItemKey, field: &str, value: Value)
    -> Result<()>;
}
