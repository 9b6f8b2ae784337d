//! User accounts and point balances.

use serde::{Deserialize, Serialize};

/// A registered account.
///
/// The credential hash never leaves the store layer; this type is what
/// services hand back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique account name, also the primary key.
    pub username: String,
    /// Current point balance. Never negative: debits are checked against
    /// the balance inside the same transaction that applies them.
    pub points: i64,
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_without_credentials() {
        let user = User {
            username: "alice".into(),
            points: 100,
            is_admin: false,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains("alice"));
    }
}
