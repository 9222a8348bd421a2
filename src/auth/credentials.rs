// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Checks applied to submitted credentials before anything is written.

use std::sync::LazyLock;

use regex::Regex;

/// `local@domain.tld`: no whitespace, a single `@`, and a dotted domain.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Password must be non-empty and equal to its confirmation.
pub fn passwords_match(password: &str, confirmation: &str) -> bool {
    !password.is_empty() && password == confirmation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@shop.example.co.uk"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "plain", "a@", "@b.com", "a@b", "a@@b.com", "a b@c.com", "a@b.", "a@.com"] {
            assert!(!is_valid_email(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn password_confirmation() {
        assert!(passwords_match("Pw1!", "Pw1!"));
        assert!(!passwords_match("Pw1!", "Pw2!"));
        assert!(!passwords_match("", ""));
    }
}
