//! Raffle record persistence.

use std::{collections::BTreeSet, sync::Arc};

use chrono::Utc;
use raffle_store::{KeyValueStore, StoreError, Value};
use raffle_types::{Email, Raffle, ValidationError};
use snafu::ResultExt;
use tracing::debug;

use crate::{
    codec,
    error::{RaffleError, Result, StoreSnafu},
    shortcode::ShortcodeGenerator,
};

/// Repository for raffle records.
///
/// Owns the shortcode uniqueness invariant (conditional create) and winner
/// persistence.
pub struct RaffleRepository<S> {
    store: Arc<S>,
    generator: Arc<dyn ShortcodeGenerator>,
    table: String,
}

impl<S: KeyValueStore> RaffleRepository<S> {
    /// Creates a repository over `table` in `store`.
    pub fn new(
        store: Arc<S>,
        generator: Arc<dyn ShortcodeGenerator>,
        table: impl Into<String>,
    ) -> Self {
        Self { store, generator, table: table.into() }
    }

    /// Creates a raffle under a freshly generated shortcode.
    ///
    /// Makes a single conditional insert. A colliding candidate surfaces as
    /// [`RaffleError::ShortcodeCollision`]; retrying with a new candidate is
    /// the caller's policy.
    ///
    /// # Errors
    ///
    /// Returns [`RaffleError::InvalidArgument`] if `admins` is empty,
    /// [`RaffleError::ShortcodeCollision`] on a taken shortcode, or
    /// [`RaffleError::Store`] for any other store failure.
    pub async fn create(
        &self,
        name: &str,
        description: &str,
        admins: BTreeSet<Email>,
    ) -> Result<Raffle> {
        if admins.is_empty() {
            return Err(RaffleError::InvalidArgument {
                source: ValidationError {
                    field: "admins".to_string(),
                    constraint: "must not be empty".to_string(),
                },
            });
        }

        let raffle = Raffle {
            shortcode: self.generator.generate(),
            name: name.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
            admins,
            winner: None,
        };

        let key = codec::raffle_key(&raffle.shortcode);
        match self.store.put_if_absent(&self.table, &key, codec::raffle_to_attrs(&raffle)).await {
            Ok(()) => Ok(raffle),
            Err(StoreError::ConditionFailed { .. }) => {
                debug!(shortcode = %raffle.shortcode, "shortcode candidate already taken");
                Err(RaffleError::ShortcodeCollision { shortcode: raffle.shortcode })
            },
            Err(err) => Err(err).context(StoreSnafu),
        }
    }

    /// Returns the raffle for a shortcode.
    ///
    /// # Errors
    ///
    /// Returns [`RaffleError::RaffleNotFound`] if no record exists, or
    /// [`RaffleError::Decode`] if the stored item is malformed.
    pub async fn get(&self, shortcode: &str) -> Result<Raffle> {
        let attrs = self
            .store
            .get(&self.table, &codec::raffle_key(shortcode))
            .await
            .context(StoreSnafu)?
            .ok_or_else(|| RaffleError::RaffleNotFound { shortcode: shortcode.to_string() })?;
        codec::raffle_from_attrs(&self.table, &attrs)
    }

    /// Returns the most recently created raffles, newest first, at most
    /// `limit` of them.
    ///
    /// Full-table scan followed by an in-memory sort on `created_at`; only
    /// acceptable while the raffle table stays small. The sort is stable, so
    /// equal timestamps keep their scan order.
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<Raffle>> {
        let items = self.store.scan(&self.table).await.context(StoreSnafu)?;
        let mut raffles = items
            .iter()
            .map(|attrs| codec::raffle_from_attrs(&self.table, attrs))
            .collect::<Result<Vec<_>>>()?;
        raffles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        raffles.truncate(limit);
        Ok(raffles)
    }

    /// Persists the winner for a raffle.
    ///
    /// Unconditional field update: there is no guard against a concurrent
    /// draw, so of two racing draws the later write wins.
    pub async fn set_winner(&self, shortcode: &str, winner: &str) -> Result<()> {
        self.store
            .update_field(
                &self.table,
                &codec::raffle_key(shortcode),
                codec::ATTR_WINNER,
                Value::text(winner),
            )
            .await
            .context(StoreSnafu)
    }
}
