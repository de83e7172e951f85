use chrono::{DateTime, Utc};

use super::domain::{AdminId, AdminUser, CredentialRecord};

/// Credential store abstraction. Availability failures are reported
/// distinctly from "no such record" so the resolver can apply its
/// fallthrough policy instead of aborting the attempt.
pub trait AdminStore: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, StoreError>;
    fn find_by_id(&self, id: &AdminId) -> Result<Option<CredentialRecord>, StoreError>;
    fn insert(&self, record: CredentialRecord) -> Result<CredentialRecord, StoreError>;
    fn update(&self, record: CredentialRecord) -> Result<(), StoreError>;
    fn remove(&self, id: &AdminId) -> Result<(), StoreError>;
    fn touch_last_login(&self, id: &AdminId, at: DateTime<Utc>) -> Result<(), StoreError>;
    fn list(&self, search: Option<&str>, take: usize, skip: usize)
        -> Result<AdminPage, StoreError>;
}

/// One page of sanitized admin accounts plus the total match count.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminPage {
    pub users: Vec<AdminUser>,
    pub total: u64,
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}
