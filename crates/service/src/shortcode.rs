//! Shortcode generation.
//!
//! Shortcodes are short random identifiers used as raffle primary keys.
//! Generation is a seam: the repository takes any [`ShortcodeGenerator`], so
//! tests can force collisions and deployments can swap in their own scheme.
//! Uniqueness is not guaranteed here; the conditional create enforces it.
//! Generation only keeps the collision probability low.

use rand::Rng;

/// Characters used in generated shortcodes.
///
/// Lowercase alphanumerics minus the ambiguous `i`, `l`, `o`, `0`, and `1`,
/// so codes survive being read aloud or retyped.
const CHARSET: &[u8] = b"abcdefghjkmnpqrstuvwxyz23456789";

/// Source of shortcode candidates.
pub trait ShortcodeGenerator: Send + Sync {
    /// Returns a fresh shortcode candidate.
    fn generate(&self) -> String;
}

/// Uniformly random shortcodes over an unambiguous lowercase charset.
#[derive(Debug, Clone)]
pub struct RandomShortcode {
    length: usize,
}

impl RandomShortcode {
    /// Creates a generator producing codes of the given length.
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl ShortcodeGenerator for RandomShortcode {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length).map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char).collect()
    }
}
