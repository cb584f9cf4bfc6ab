//! Raffle service orchestration.

use std::{collections::BTreeSet, sync::Arc};

use rand::seq::IndexedRandom;
use raffle_store::KeyValueStore;
use raffle_types::{
    DrawResult, Email, RaffleConfig, RaffleView, Shortcode, validate_description, validate_email,
    validate_raffle_name,
};
use snafu::ResultExt;
use tracing::{info, instrument, warn};

use crate::{
    auth::is_raffle_admin,
    error::{InvalidArgumentSnafu, RaffleError, Result},
    repository::{EntryRepository, RaffleRepository},
    shortcode::{RandomShortcode, ShortcodeGenerator},
};

/// High-level raffle operations.
///
/// Orchestrates the two repositories: existence and admin checks against the
/// raffle table first, then entry-table work, then derived state back to the
/// raffle table. Each method is a short-lived, independent unit; the only
/// concurrency control is the store's conditional writes.
pub struct RaffleService<S> {
    raffles: RaffleRepository<S>,
    entries: EntryRepository<S>,
    config: RaffleConfig,
}

impl<S: KeyValueStore> RaffleService<S> {
    /// Builds a service over `store` using the tables named in `config`.
    pub fn new(store: Arc<S>, config: RaffleConfig) -> Self {
        let generator = Arc::new(RandomShortcode::new(config.shortcode_length));
        Self::with_generator(store, generator, config)
    }

    /// Builds a service with a caller-supplied shortcode generator.
    pub fn with_generator(
        store: Arc<S>,
        generator: Arc<dyn ShortcodeGenerator>,
        config: RaffleConfig,
    ) -> Self {
        let raffles =
            RaffleRepository::new(Arc::clone(&store), generator, config.raffle_table.clone());
        let entries = EntryRepository::new(store, config.entry_table.clone());
        Self { raffles, entries, config }
    }

    /// Creates a raffle and returns its shortcode.
    ///
    /// Tries up to `config.create_attempts` shortcode candidates; each
    /// attempt is one conditional insert, so two concurrent creations can
    /// never share a shortcode.
    ///
    /// # Errors
    ///
    /// Returns [`RaffleError::InvalidArgument`] if the name, description, or
    /// an admin email fails validation or `admins` is empty, and
    /// [`RaffleError::ShortcodeCollision`] once the attempt budget is spent.
    #[instrument(skip(self, description, admins))]
    pub async fn create_raffle(
        &self,
        name: &str,
        description: &str,
        admins: BTreeSet<Email>,
    ) -> Result<Shortcode> {
        let limits = &self.config.validation;
        validate_raffle_name(name, limits).context(InvalidArgumentSnafu)?;
        validate_description(description, limits).context(InvalidArgumentSnafu)?;
        for admin in &admins {
            validate_email(admin, limits).context(InvalidArgumentSnafu)?;
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.raffles.create(name, description, admins.clone()).await {
                Ok(raffle) => {
                    info!(shortcode = %raffle.shortcode, "created raffle");
                    return Ok(raffle.shortcode);
                },
                Err(err @ RaffleError::ShortcodeCollision { .. }) => {
                    if attempt >= self.config.create_attempts {
                        return Err(err);
                    }
                    warn!(attempt, "shortcode collision, regenerating candidate");
                },
                Err(err) => return Err(err),
            }
        }
    }

    /// Returns the most recently created raffles as viewer-less views.
    ///
    /// `limit` defaults to `config.default_list_limit`.
    pub async fn list_raffles(&self, limit: Option<usize>) -> Result<Vec<RaffleView>> {
        let limit = limit.unwrap_or(self.config.default_list_limit);
        let raffles = self.raffles.list_recent(limit).await?;
        Ok(raffles.into_iter().map(RaffleView::anonymous).collect())
    }

    /// Returns a raffle as seen by `viewer_email`.
    ///
    /// An absent or empty viewer email yields `admin = false` and
    /// `is_registered = false` without touching the entry table.
    ///
    /// # Errors
    ///
    /// Returns [`RaffleError::RaffleNotFound`] if no raffle exists.
    #[instrument(skip(self))]
    pub async fn get_raffle(
        &self,
        shortcode: &str,
        viewer_email: Option<&str>,
    ) -> Result<RaffleView> {
        let raffle = self.raffles.get(shortcode).await?;
        let viewer = viewer_email.filter(|email| !email.is_empty());

        let admin = viewer.is_some_and(|email| is_raffle_admin(email, &raffle.admins));
        let is_registered = match viewer {
            Some(email) => self.entries.is_registered(shortcode, email).await?,
            None => false,
        };

        Ok(RaffleView::new(raffle, admin, is_registered))
    }

    /// Registers `email` for the raffle.
    ///
    /// # Errors
    ///
    /// Returns [`RaffleError::RaffleNotFound`] if the raffle does not exist,
    /// [`RaffleError::AlreadyRegistered`] on a duplicate registration, or
    /// [`RaffleError::InvalidArgument`] for a malformed email.
    #[instrument(skip(self))]
    pub async fn register_for_raffle(&self, shortcode: &str, email: &str) -> Result<()> {
        validate_email(email, &self.config.validation).context(InvalidArgumentSnafu)?;
        self.raffles.get(shortcode).await?;
        self.entries.register(shortcode, email).await?;
        info!("registered entry");
        Ok(())
    }

    /// Draws a winner for the raffle, uniformly at random from the full
    /// entry pool, and persists it.
    ///
    /// The returned [`DrawResult`] carries the exact pool the winner was
    /// drawn from so callers can audit the selection. Nothing prevents a
    /// later draw from overwriting the winner; the read-then-write here is
    /// deliberately unguarded (see [`RaffleRepository::set_winner`]).
    ///
    /// # Errors
    ///
    /// Returns [`RaffleError::RaffleNotFound`] if the raffle does not exist,
    /// [`RaffleError::NotAuthorized`] if `requester_email` is not an admin,
    /// or [`RaffleError::NoEntries`] if nobody registered.
    #[instrument(skip(self))]
    pub async fn draw_winner(
        &self,
        shortcode: &str,
        requester_email: &str,
    ) -> Result<DrawResult> {
        let raffle = self.raffles.get(shortcode).await?;
        if !is_raffle_admin(requester_email, &raffle.admins) {
            return Err(RaffleError::NotAuthorized {
                shortcode: shortcode.to_string(),
                email: requester_email.to_string(),
            });
        }

        let entries = self.entries.list_all_emails(shortcode).await?;
        let winner = entries
            .choose(&mut rand::rng())
            .cloned()
            .ok_or_else(|| RaffleError::NoEntries { shortcode: shortcode.to_string() })?;

        self.raffles.set_winner(shortcode, &winner).await?;
        info!(winner = %winner, pool_size = entries.len(), "drew raffle winner");

        Ok(DrawResult { winner, entries })
    }
}
