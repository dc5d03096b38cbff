/// User model
///
/// Users are either registered accounts (password hash present) or
/// provisional team members created by template expansion (no
/// credentials until the person registers with the same email).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email CITEXT NOT NULL UNIQUE,
///     name VARCHAR(255) NOT NULL,
///     initials VARCHAR(8) NOT NULL,
///     password_hash VARCHAR(255),
///     avatar_url VARCHAR(512),
///     handle VARCHAR(64),
///     wallet_address VARCHAR(128),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_login_at TIMESTAMPTZ
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account or provisional team member
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Email address (case-insensitive, unique)
    pub email: String,

    /// Display name
    pub name: String,

    /// Short initials shown in avatars and assignee chips
    pub initials: String,

    /// Argon2id hash; None for provisional users
    ///
    /// Never expose this through the API — handlers map to a public
    /// representation before responding.
    pub password_hash: Option<String>,

    /// Optional avatar/profile picture URL
    pub avatar_url: Option<String>,

    /// Optional short handle
    pub handle: Option<String>,

    /// Optional wallet address
    pub wallet_address: Option<String>,

    /// When the user was created
    pub created_at: DateTime<Utc>,

    /// When the user was last updated
    pub updated_at: DateTime<Utc>,

    /// When the user last logged in (None if never)
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Checks whether this user has registered credentials
    pub fn is_registered(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Derives initials from a display name
    ///
    /// Takes the first letter of the first two whitespace-separated
    /// tokens, uppercased. `"Ana Maria Ruiz"` → `"AM"`, `"Bo"` → `"B"`.
    pub fn initials_for(name: &str) -> String {
        name.split_whitespace()
            .filter_map(|token| token.chars().next())
            .take(2)
            .flat_map(|c| c.to_uppercase())
            .collect()
    }
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address (must be unique)
    pub email: String,

    /// Display name
    pub name: String,

    /// Initials; derive with [`User::initials_for`] when not supplied
    pub initials: String,

    /// Argon2id hash, or None for a provisional user
    pub password_hash: Option<String>,

    /// Optional avatar URL
    pub avatar_url: Option<String>,

    /// Optional handle
    pub handle: Option<String>,

    /// Optional wallet address
    pub wallet_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_two_tokens() {
        assert_eq!(User::initials_for("Ada Lovelace"), "AL");
    }

    #[test]
    fn test_initials_caps_at_two() {
        assert_eq!(User::initials_for("Ana Maria Ruiz"), "AM");
    }

    #[test]
    fn test_initials_single_token() {
        assert_eq!(User::initials_for("Bo"), "B");
    }

    #[test]
    fn test_initials_uppercases() {
        assert_eq!(User::initials_for("grace hopper"), "GH");
    }

    #[test]
    fn test_initials_empty_name() {
        assert_eq!(User::initials_for("   "), "");
    }
}
