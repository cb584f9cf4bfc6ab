//! Conversion between domain types and store attribute maps.
//!
//! Attribute names here define the on-table layout of the raffle and entry
//! tables. Timestamps are persisted as RFC 3339 text. Decoding failures
//! surface as [`RaffleError::Decode`]; a malformed stored item is corrupt
//! data, never a panic.

use chrono::{DateTime, Utc};
use raffle_store::{Attributes, ItemKey, Value};
use raffle_types::{Email, Entry, Raffle};

use crate::error::{RaffleError, Result};

/// Raffle/entry partition key attribute.
pub const ATTR_SHORTCODE: &str = "shortcode";
/// Raffle display name attribute.
pub const ATTR_NAME: &str = "name";
/// Raffle description attribute.
pub const ATTR_DESCRIPTION: &str = "description";
/// Raffle creation timestamp attribute (RFC 3339 text).
pub const ATTR_CREATED_AT: &str = "created_at";
/// Raffle admin email set attribute.
pub const ATTR_ADMINS: &str = "admins";
/// Raffle winner attribute, absent until a draw succeeds.
pub const ATTR_WINNER: &str = "winner";
/// Entry sort key attribute.
pub const ATTR_EMAIL: &str = "email";
/// Entry registration timestamp attribute (RFC 3339 text).
pub const ATTR_REGISTERED_AT: &str = "registered_at";

/// Key of a raffle item.
pub fn raffle_key(shortcode: &str) -> ItemKey {
    ItemKey::partition(shortcode)
}

/// Key of an entry item.
pub fn entry_key(shortcode: &str, email: &str) -> ItemKey {
    ItemKey::composite(shortcode, email)
}

/// Encodes a raffle as a stored item.
pub fn raffle_to_attrs(raffle: &Raffle) -> Attributes {
    let mut attrs = Attributes::new();
    attrs.insert(ATTR_SHORTCODE.to_string(), Value::text(&raffle.shortcode));
    attrs.insert(ATTR_NAME.to_string(), Value::text(&raffle.name));
    attrs.insert(ATTR_DESCRIPTION.to_string(), Value::text(&raffle.description));
    attrs.insert(ATTR_CREATED_AT.to_string(), Value::text(raffle.created_at.to_rfc3339()));
    attrs.insert(ATTR_ADMINS.to_string(), Value::TextSet(raffle.admins.clone()));
    if let Some(winner) = &raffle.winner {
        attrs.insert(ATTR_WINNER.to_string(), Value::text(winner));
    }
    attrs
}

/// Decodes a raffle from a stored item.
///
/// `description` and `winner` tolerate absence; everything else is required.
///
/// # Errors
///
/// Returns [`RaffleError::Decode`] if a required attribute is missing, has
/// the wrong kind, or the timestamp fails to parse.
pub fn raffle_from_attrs(table: &str, attrs: &Attributes) -> Result<Raffle> {
    let created_at = parse_timestamp(table, ATTR_CREATED_AT, require_text(table, attrs, ATTR_CREATED_AT)?)?;
    let admins = attrs
        .get(ATTR_ADMINS)
        .and_then(Value::as_text_set)
        .ok_or_else(|| decode_error(table, format!("missing text-set attribute {ATTR_ADMINS:?}")))?
        .clone();

    Ok(Raffle {
        shortcode: require_text(table, attrs, ATTR_SHORTCODE)?.to_string(),
        name: require_text(table, attrs, ATTR_NAME)?.to_string(),
        description: optional_text(attrs, ATTR_DESCRIPTION).unwrap_or_default().to_string(),
        created_at,
        admins,
        winner: optional_text(attrs, ATTR_WINNER).map(str::to_string),
    })
}

/// Encodes an entry as a stored item.
pub fn entry_to_attrs(entry: &Entry) -> Attributes {
    let mut attrs = Attributes::new();
    attrs.insert(ATTR_SHORTCODE.to_string(), Value::text(&entry.shortcode));
    attrs.insert(ATTR_EMAIL.to_string(), Value::text(&entry.email));
    attrs.insert(ATTR_REGISTERED_AT.to_string(), Value::text(entry.registered_at.to_rfc3339()));
    attrs
}

/// Extracts the email from an entry item, as returned by a projected query.
///
/// # Errors
///
/// Returns [`RaffleError::Decode`] if the email attribute is missing or not
/// text.
pub fn email_from_attrs(table: &str, attrs: &Attributes) -> Result<Email> {
    Ok(require_text(table, attrs, ATTR_EMAIL)?.to_string())
}

fn require_text<'a>(table: &str, attrs: &'a Attributes, name: &str) -> Result<&'a str> {
    attrs
        .get(name)
        .and_then(Value::as_text)
        .ok_or_else(|| decode_error(table, format!("missing text attribute {name:?}")))
}

fn optional_text<'a>(attrs: &'a Attributes, name: &str) -> Option<&'a str> {
    attrs.get(name).and_then(Value::as_text)
}

fn parse_timestamp(table: &str, name: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|err| decode_error(table, format!("bad timestamp in {name:?}: {err}")))
}

fn decode_error(table: &str, message: String) -> RaffleError {
    RaffleError::Decode { table: table.to_string(), message }
}
