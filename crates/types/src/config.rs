//! Configuration types for the raffle service.
//!
//! All config structs validate their values at construction time via
//! fallible builders. Post-deserialization validation is available via
//! the `validate()` method on each struct. Table handles and limits are
//! explicit state passed into repository constructors; there is no
//! process-wide configuration singleton.

use serde::{Deserialize, Serialize};
use snafu::Snafu;

/// Minimum shortcode length that keeps the collision probability workable.
const MIN_SHORTCODE_LENGTH: usize = 4;

/// Configuration validation error.
///
/// Returned when a configuration value is outside its valid range or
/// violates a cross-field constraint.
#[derive(Debug, Snafu)]
pub enum ConfigError {
    /// A configuration value is invalid.
    #[snafu(display("invalid config: {message}"))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },
}

/// Service-level configuration: table names and operation limits.
///
/// # Validation Rules
///
/// - `raffle_table` and `entry_table` must be non-empty and distinct
/// - `shortcode_length` must be >= 4
/// - `create_attempts` and `default_list_limit` must be >= 1
///
/// # Example
///
/// ```no_run
/// # use raffle_types::config::RaffleConfig;
/// let config = RaffleConfig::builder()
///     .raffle_table("raffles-prod")
///     .entry_table("entries-prod")
///     .build()
///     .expect("valid raffle config");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaffleConfig {
    /// Name of the table holding raffle records.
    #[serde(default = "default_raffle_table")]
    pub raffle_table: String,
    /// Name of the table holding registration records.
    #[serde(default = "default_entry_table")]
    pub entry_table: String,
    /// Length of generated shortcodes.
    #[serde(default = "default_shortcode_length")]
    pub shortcode_length: usize,
    /// How many shortcode candidates to try before giving up on creation.
    #[serde(default = "default_create_attempts")]
    pub create_attempts: u32,
    /// Number of raffles returned by a listing when no limit is given.
    #[serde(default = "default_list_limit")]
    pub default_list_limit: usize,
    /// Input validation limits.
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[bon::bon]
impl RaffleConfig {
    /// Creates a new service configuration with validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if:
    /// - a table name is empty or the two names collide
    /// - `shortcode_length` < 4
    /// - `create_attempts` or `default_list_limit` is 0
    #[builder]
    pub fn new(
        #[builder(default = default_raffle_table(), into)] raffle_table: String,
        #[builder(default = default_entry_table(), into)] entry_table: String,
        #[builder(default = default_shortcode_length())] shortcode_length: usize,
        #[builder(default = default_create_attempts())] create_attempts: u32,
        #[builder(default = default_list_limit())] default_list_limit: usize,
        #[builder(default)] validation: ValidationConfig,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            raffle_table,
            entry_table,
            shortcode_length,
            create_attempts,
            default_list_limit,
            validation,
        };
        config.validate()?;
        Ok(config)
    }
}

impl RaffleConfig {
    /// Validates the configuration values.
    ///
    /// Call after deserialization to ensure values are within valid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.raffle_table.is_empty() {
            return Err(ConfigError::Validation {
                message: "raffle_table must not be empty".to_string(),
            });
        }
        if self.entry_table.is_empty() {
            return Err(ConfigError::Validation {
                message: "entry_table must not be empty".to_string(),
            });
        }
        if self.raffle_table == self.entry_table {
            return Err(ConfigError::Validation {
                message: format!(
                    "raffle_table and entry_table must be distinct, both are {:?}",
                    self.raffle_table
                ),
            });
        }
        if self.shortcode_length < MIN_SHORTCODE_LENGTH {
            return Err(ConfigError::Validation {
                message: format!(
                    "shortcode_length must be >= {}, got {}",
                    MIN_SHORTCODE_LENGTH, self.shortcode_length
                ),
            });
        }
        if self.create_attempts == 0 {
            return Err(ConfigError::Validation {
                message: "create_attempts must be >= 1".to_string(),
            });
        }
        if self.default_list_limit == 0 {
            return Err(ConfigError::Validation {
                message: "default_list_limit must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for RaffleConfig {
    fn default() -> Self {
        Self {
            raffle_table: default_raffle_table(),
            entry_table: default_entry_table(),
            shortcode_length: default_shortcode_length(),
            create_attempts: default_create_attempts(),
            default_list_limit: default_list_limit(),
            validation: ValidationConfig::default(),
        }
    }
}

fn default_raffle_table() -> String {
    "raffles".to_string()
}

fn default_entry_table() -> String {
    "entries".to_string()
}

fn default_shortcode_length() -> usize {
    8
}

fn default_create_attempts() -> u32 {
    3
}

fn default_list_limit() -> usize {
    10
}

/// Input validation limits.
///
/// Byte limits apply to the UTF-8 encoding of the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum raffle name length in bytes.
    #[serde(default = "default_max_name_bytes")]
    pub max_name_bytes: usize,
    /// Maximum raffle description length in bytes.
    #[serde(default = "default_max_description_bytes")]
    pub max_description_bytes: usize,
    /// Maximum email length in bytes.
    #[serde(default = "default_max_email_bytes")]
    pub max_email_bytes: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_name_bytes: default_max_name_bytes(),
            max_description_bytes: default_max_description_bytes(),
            max_email_bytes: default_max_email_bytes(),
        }
    }
}

fn default_max_name_bytes() -> usize {
    128
}

fn default_max_description_bytes() -> usize {
    1024
}

/// RFC 5321 caps the full address at 254 octets.
fn default_max_email_bytes() -> usize {
    254
}
