//! Error types for raffle operations.
//!
//! Every recoverable condition is a distinct variant so boundary layers can
//! map each to an appropriate response. Store failures other than the
//! condition-check signature propagate unchanged through [`RaffleError::Store`]
//! and are infrastructure faults, not domain errors.

use raffle_store::StoreError;
use raffle_types::ValidationError;
use snafu::Snafu;

/// Result type alias for raffle operations.
pub type Result<T> = std::result::Result<T, RaffleError>;

/// Errors that can occur during raffle operations.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RaffleError {
    /// No raffle exists for the shortcode.
    #[snafu(display("raffle {shortcode} not found"))]
    RaffleNotFound {
        /// The shortcode that was looked up.
        shortcode: String,
    },

    /// A freshly generated shortcode is already taken.
    ///
    /// The caller may retry with a new candidate.
    #[snafu(display("shortcode {shortcode} is already taken"))]
    ShortcodeCollision {
        /// The colliding candidate.
        shortcode: String,
    },

    /// The email already holds a registration for this raffle.
    #[snafu(display("{email} is already registered for raffle {shortcode}"))]
    AlreadyRegistered {
        /// The raffle registered for.
        shortcode: String,
        /// The already-registered email.
        email: String,
    },

    /// A draw was attempted on a raffle with zero registrations.
    #[snafu(display("raffle {shortcode} has no entries to draw from"))]
    NoEntries {
        /// The raffle the draw targeted.
        shortcode: String,
    },

    /// A draw was attempted by someone outside the raffle's admin set.
    #[snafu(display("{email} is not an admin of raffle {shortcode}"))]
    NotAuthorized {
        /// The raffle the draw targeted.
        shortcode: String,
        /// The requester's email.
        email: String,
    },

    /// A request field failed validation.
    #[snafu(display("invalid argument: {source}"))]
    InvalidArgument {
        /// The violated constraint.
        source: ValidationError,
    },

    /// A stored item is missing attributes or carries malformed values.
    #[snafu(display("malformed item in {table}: {message}"))]
    Decode {
        /// Table the item was read from.
        table: String,
        /// Description of the malformation.
        message: String,
    },

    /// Store failure outside the condition-check signature.
    #[snafu(display("store error: {source}"))]
    Store {
        /// The underlying store error.
        source: StoreError,
    },
}
