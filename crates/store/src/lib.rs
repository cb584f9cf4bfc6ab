//! Key-value table store abstraction for the raffle service.
//!
//! The [`KeyValueStore`] trait abstracts the underlying table store, exposing
//! the five primitives the repositories need: conditional insert, point
//! lookup, full scan, paginated partition query, and single-field update.
//! Conditional writes are the sole concurrency-control mechanism; the store
//! guarantees that concurrent inserts of the same key resolve to exactly one
//! winner, with all losers observing [`StoreError::ConditionFailed`].
//!
//! [`MemoryStore`] is the in-memory implementation used by tests. Production
//! deployments implement the trait over their table store's client.

mod error;
mod memory;
mod store;
mod types;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use store::KeyValueStore;
pub use types::{Attributes, ContinuationToken, ItemKey, QueryPage, Value};
