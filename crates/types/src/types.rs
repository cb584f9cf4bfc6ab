//! Core type definitions for the raffle service.
//!
//! These types mirror the two stored tables:
//! - `Raffle`: one record per raffle, keyed by shortcode
//! - `Entry`: one record per registration, keyed by (shortcode, email)
//!
//! plus the viewer-facing projections built from them.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Short unique identifier for a raffle, used as its primary key.
pub type Shortcode = String;

/// Participant identity. Registrations and admin checks are keyed by email.
pub type Email = String;

/// A raffle record.
///
/// `shortcode`, `name`, `description`, `created_at`, and `admins` are fixed at
/// creation time. `winner` is absent until a draw succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Raffle {
    /// Globally unique primary key.
    pub shortcode: Shortcode,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Emails allowed to draw a winner. Non-empty.
    pub admins: BTreeSet<Email>,
    /// Winning email, set by a successful draw.
    pub winner: Option<Email>,
}

/// A registration record for one `(shortcode, email)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Raffle this entry belongs to.
    pub shortcode: Shortcode,
    /// Registered participant.
    pub email: Email,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
}

/// A raffle as seen by a particular viewer.
///
/// Combines the public raffle fields with per-viewer flags. The admin set
/// itself is never exposed through a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaffleView {
    /// Raffle primary key.
    pub shortcode: Shortcode,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Winning email, if a draw has completed.
    pub winner: Option<Email>,
    /// Whether the viewer may draw a winner.
    pub admin: bool,
    /// Whether the viewer holds a registration for this raffle.
    pub is_registered: bool,
}

impl RaffleView {
    /// Builds a view of `raffle` for a viewer with the given flags.
    pub fn new(raffle: Raffle, admin: bool, is_registered: bool) -> Self {
        Self {
            shortcode: raffle.shortcode,
            name: raffle.name,
            description: raffle.description,
            created_at: raffle.created_at,
            winner: raffle.winner,
            admin,
            is_registered,
        }
    }

    /// Builds a view with no viewer context, as used by listing surfaces.
    pub fn anonymous(raffle: Raffle) -> Self {
        Self::new(raffle, false, false)
    }
}

/// Outcome of a winner draw.
///
/// Carries the exact pool the winner was drawn from so callers can audit the
/// selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    /// The selected winner.
    pub winner: Email,
    /// Every email that was in the pool at draw time.
    pub entries: Vec<Email>,
}
