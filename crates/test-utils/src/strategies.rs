//! Proptest strategies for raffle domain values.
//!
//! Reusable generators for property-based testing across crates. Strategies
//! produce well-formed domain values while exploring edge cases through
//! random variation.
//!
//! # Usage
//!
//! ```no_run
//! use proptest::prelude::*;
//! use raffle_test_utils::strategies;
//!
//! proptest! {
//!     #[test]
//!     fn my_property(email in strategies::arb_email()) {
//!         // test invariant with a randomly generated email
//!     }
//! }
//! ```

use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use raffle_types::Raffle;

/// Generates a well-formed email: `local@host.tld` with lowercase parts.
pub fn arb_email() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9]{0,11}", "[a-z]{2,8}", "[a-z]{2,3}")
        .prop_map(|(local, host, tld)| format!("{local}@{host}.{tld}"))
}

/// Generates a shortcode of 4-10 lowercase alphanumeric characters.
pub fn arb_shortcode() -> impl Strategy<Value = String> {
    "[a-z0-9]{4,10}"
}

/// Generates a non-blank raffle name of up to 32 characters.
pub fn arb_raffle_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,31}"
}

/// Generates a UTC timestamp between the Unix epoch and 2033.
pub fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..=2_000_000_000)
        .prop_map(|secs| Utc.timestamp_opt(secs, 0).single().unwrap_or(DateTime::UNIX_EPOCH))
}

/// Generates a non-empty admin set of 1-3 distinct emails.
pub fn arb_admins() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::collection::btree_set(arb_email(), 1..4)
}

/// Generates a full [`Raffle`] with no winner set.
pub fn arb_raffle() -> impl Strategy<Value = Raffle> {
    (arb_shortcode(), arb_raffle_name(), arb_timestamp(), arb_admins()).prop_map(
        |(shortcode, name, created_at, admins)| Raffle {
            shortcode,
            name,
            description: String::new(),
            created_at,
            admins,
            winner: None,
        },
    )
}
