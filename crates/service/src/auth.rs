//! Admin identity checking.
//!
//! Kept as a standalone predicate so the identity scheme can evolve without
//! touching the draw path.

use std::collections::BTreeSet;

use raffle_types::Email;

/// Returns whether `email` may administer a raffle with the given admin set.
///
/// An empty email never matches, regardless of the admin set's contents.
pub fn is_raffle_admin(email: &str, admins: &BTreeSet<Email>) -> bool {
    !email.is_empty() && admins.contains(email)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn admins(emails: &[&str]) -> BTreeSet<Email> {
        emails.iter().map(|email| email.to_string()).collect()
    }

    #[test]
    fn test_member_is_admin() {
        let set = admins(&["a@x.com", "b@x.com"]);
        assert!(is_raffle_admin("a@x.com", &set));
        assert!(is_raffle_admin("b@x.com", &set));
    }

    #[test]
    fn test_non_member_is_not_admin() {
        assert!(!is_raffle_admin("z@z.com", &admins(&["a@x.com"])));
    }

    #[test]
    fn test_empty_email_is_never_admin() {
        // Even a corrupt admin set containing an empty string must not grant
        // access to an anonymous viewer.
        assert!(!is_raffle_admin("", &admins(&["a@x.com", ""])));
    }
}
