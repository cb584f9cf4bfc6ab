//! Registration record persistence.

use std::sync::Arc;

use chrono::Utc;
use raffle_store::{KeyValueStore, StoreError};
use raffle_types::{Email, Entry};
use snafu::ResultExt;
use tracing::debug;

use crate::{
    codec,
    error::{RaffleError, Result, StoreSnafu},
};

/// Repository for registration records.
///
/// Owns the at-most-once-per-email invariant (conditional insert on the
/// composite key) and the exhaustive pagination drain used by draws.
pub struct EntryRepository<S> {
    store: Arc<S>,
    table: String,
}

impl<S: KeyValueStore> EntryRepository<S> {
    /// Creates a repository over `table` in `store`.
    pub fn new(store: Arc<S>, table: impl Into<String>) -> Self {
        Self { store, table: table.into() }
    }

    /// Registers `email` for a raffle.
    ///
    /// Raffle existence is the caller's check; this only guards the
    /// `(shortcode, email)` uniqueness invariant.
    ///
    /// # Errors
    ///
    /// Returns [`RaffleError::AlreadyRegistered`] if the email already holds
    /// an entry for this raffle, or [`RaffleError::Store`] for any other
    /// store failure.
    pub async fn register(&self, shortcode: &str, email: &str) -> Result<Entry> {
        let entry = Entry {
            shortcode: shortcode.to_string(),
            email: email.to_string(),
            registered_at: Utc::now(),
        };

        let key = codec::entry_key(shortcode, email);
        match self.store.put_if_absent(&self.table, &key, codec::entry_to_attrs(&entry)).await {
            Ok(()) => Ok(entry),
            Err(StoreError::ConditionFailed { .. }) => {
                debug!(shortcode, email, "duplicate registration rejected");
                Err(RaffleError::AlreadyRegistered {
                    shortcode: shortcode.to_string(),
                    email: email.to_string(),
                })
            },
            Err(err) => Err(err).context(StoreSnafu),
        }
    }

    /// Returns whether `email` holds a registration for the raffle.
    pub async fn is_registered(&self, shortcode: &str, email: &str) -> Result<bool> {
        let item = self
            .store
            .get(&self.table, &codec::entry_key(shortcode, email))
            .await
            .context(StoreSnafu)?;
        Ok(item.is_some())
    }

    /// Returns every registered email for a raffle.
    ///
    /// Drains the paginated query until the store stops returning a
    /// continuation token. A page can be non-empty and still carry a token,
    /// so the loop is driven by the token alone; stopping on the first
    /// short page would drop entries. Order is pagination order; duplicates
    /// cannot occur given the composite-key uniqueness invariant.
    pub async fn list_all_emails(&self, shortcode: &str) -> Result<Vec<Email>> {
        let mut emails = Vec::new();
        let mut token = None;
        loop {
            let page = self
                .store
                .query(&self.table, shortcode, Some(&[codec::ATTR_EMAIL]), token)
                .await
                .context(StoreSnafu)?;
            for item in &page.items {
                emails.push(codec::email_from_attrs(&self.table, item)?);
            }
            match page.next_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }
        Ok(emails)
    }
}
