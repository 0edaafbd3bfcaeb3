use serde::{Deserialize, Serialize};

/// The authenticated user's profile as returned by `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: i64,

    /// User's email address
    pub email: String,

    /// Unique handle, also used as the owner name on subdomain claims
    pub username: String,

    /// How the account was created: "email", "github" or "discord"
    pub provider: String,

    /// Whether the email address has been verified
    pub is_verified: bool,

    /// When the account was created (ISO 8601 format)
    pub created_at: String,
}
