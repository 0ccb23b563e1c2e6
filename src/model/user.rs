use serde::{Deserialize, Serialize};

/// Stored login credential, keyed by lowercased username in `logins.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub password_hash: String,
    pub role: String,
}
