//! Local application of ignore rules to already-loaded contacts.
//!
//! The server filters ignored contacts out of every page it returns, so a new
//! rule only needs to be applied to what is already on screen. The visible list
//! is patched immediately; the total counter is refreshed from `/stats` later.

use crate::api::types::{Contact, IgnoreEntry, IgnoreKind};

/// Whether `rule` hides a contact with this address.
///
/// Email rules match the whole address exactly; domain rules match the
/// `@domain` suffix, so `d.com` does not hide `x@sub.d.com`.
pub fn is_suppressed(rule: &IgnoreEntry, email: &str) -> bool {
    match rule.kind {
        IgnoreKind::Email => email == rule.value,
        IgnoreKind::Domain => email
            .strip_suffix(rule.value.as_str())
            .is_some_and(|head| head.ends_with('@')),
    }
}

/// Drop contacts hidden by `rule`, keeping order. Returns how many were removed.
pub fn retain_visible(contacts: &mut Vec<Contact>, rule: &IgnoreEntry) -> usize {
    let before = contacts.len();
    contacts.retain(|c| !is_suppressed(rule, &c.email));
    before - contacts.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: i64, email: &str) -> Contact {
        Contact {
            id,
            name: String::new(),
            email: email.to_string(),
            max_score: 0.0,
            thread_count: 0,
            last_active: None,
            first_active: None,
            top_thread_title: None,
            threads: Vec::new(),
        }
    }

    fn emails(contacts: &[Contact]) -> Vec<&str> {
        contacts.iter().map(|c| c.email.as_str()).collect()
    }

    #[test]
    fn test_email_rule_keeps_others() {
        let mut contacts = vec![contact(1, "u@d.com"), contact(2, "v@d.com")];
        let removed = retain_visible(&mut contacts, &IgnoreEntry::email("u@d.com"));

        assert_eq!(removed, 1);
        assert_eq!(emails(&contacts), vec!["v@d.com"]);
    }

    #[test]
    fn test_domain_rule_removes_every_address_at_domain() {
        let mut contacts = vec![
            contact(1, "a@d.com"),
            contact(2, "b@other.com"),
            contact(3, "c@d.com"),
            contact(4, "d@sub.d.com"),
            contact(5, "e@bad.com"),
        ];
        let removed = retain_visible(&mut contacts, &IgnoreEntry::domain("d.com"));

        assert_eq!(removed, 2);
        assert_eq!(
            emails(&contacts),
            vec!["b@other.com", "d@sub.d.com", "e@bad.com"]
        );
    }

    #[test]
    fn test_email_rule_is_exact() {
        let rule = IgnoreEntry::email("u@d.com");
        assert!(is_suppressed(&rule, "u@d.com"));
        assert!(!is_suppressed(&rule, "U@d.com"));
        assert!(!is_suppressed(&rule, "xu@d.com"));
    }

    #[test]
    fn test_domain_rule_needs_at_sign() {
        let rule = IgnoreEntry::domain("d.com");
        assert!(is_suppressed(&rule, "x@d.com"));
        assert!(!is_suppressed(&rule, "d.com"));
        assert!(!is_suppressed(&rule, "x@bd.com"));
    }
}
