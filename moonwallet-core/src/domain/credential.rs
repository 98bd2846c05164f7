//! Credential domain model

use serde::{Deserialize, Serialize};

/// A registered email/password pair
///
/// Passwords are stored and compared as plaintext to stay compatible with
/// the records the mobile app already persisted on-device. This is an
/// exact-match lookup, not real authentication: do not reuse this type
/// anywhere security matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Exact, case-sensitive match on both fields
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let cred = Credential::new("a@x.com", "pw1");
        assert!(cred.matches("a@x.com", "pw1"));
        assert!(!cred.matches("a@x.com", "pw2"));
        assert!(!cred.matches("A@x.com", "pw1")); // case-sensitive
    }
}
