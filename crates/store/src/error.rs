//! Error types for the table store abstraction.

use snafu::Snafu;

use crate::types::ItemKey;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during store operations.
///
/// [`StoreError::ConditionFailed`] is the only variant the domain layer ever
/// translates; everything else is treated as an infrastructure fault and
/// propagated unchanged.
#[derive(Debug, Snafu)]
pub enum StoreError {
    /// A conditional write found an existing item at the key.
    #[snafu(display("conditional write failed for {key} in {table}: item already exists"))]
    ConditionFailed {
        /// Table the write targeted.
        table: String,
        /// Key the write targeted.
        key: ItemKey,
    },

    /// A continuation token could not be interpreted by this store.
    #[snafu(display("invalid continuation token: {token:?}"))]
    InvalidContinuationToken {
        /// The rejected token value.
        token: String,
    },

    /// Transport or backend failure from the underlying store client.
    #[snafu(display("store backend error: {message}"))]
    Backend {
        /// Description of the failure.
        message: String,
    },
}
