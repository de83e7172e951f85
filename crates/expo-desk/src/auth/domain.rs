use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Admin account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdminId(pub String);

/// Store-owned credential row. The hash is bcrypt; no plaintext secret is
/// ever persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: AdminId,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl CredentialRecord {
    /// Sanitized view with the hash stripped, for listings and API
    /// responses.
    pub fn view(&self) -> AdminUser {
        AdminUser {
            id: self.id.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
            last_login: self.last_login,
        }
    }
}

/// Successful authentication result. Request-scoped; session mechanics are
/// the embedding application's concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Principal {
    pub id: AdminId,
    pub email: String,
    pub last_login: Option<DateTime<Utc>>,
}

/// Admin account as exposed to the admin-users pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminUser {
    pub id: AdminId,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}
