use uuid::Uuid;
use chrono::{DateTime, Utc};

/// Represents a registered account.
#[derive(Clone, Debug)]
pub struct User {
    /// The unique identifier for the user.
    pub id: Uuid,
    /// The user's first name.
    pub first_name: String,
    /// The user's last name.
    pub last_name: String,
    /// The user's email address. Unique across accounts.
    pub email: String,
    /// The user's hashed password. Never the plaintext.
    pub password: String,
    /// The timestamp when the account was created.
    pub created_at: DateTime<Utc>,
}
