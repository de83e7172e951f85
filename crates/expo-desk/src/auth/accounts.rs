use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::domain::{AdminId, AdminUser, CredentialRecord};
use super::store::{AdminStore, StoreError};

const MIN_PASSWORD_LEN: usize = 8;

static ADMIN_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_admin_id() -> AdminId {
    let id = ADMIN_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AdminId(format!("admin-{id:06}"))
}

/// New account request. The password arrives in plaintext and is hashed
/// before anything touches the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAdminAccount {
    pub email: String,
    pub password: String,
}

/// Partial account update; omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminAccountUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Paginated admin listing envelope.
#[derive(Debug, Clone, Serialize)]
pub struct AdminDirectoryPage {
    pub users: Vec<AdminUser>,
    pub total: u64,
    pub page: usize,
    pub total_pages: u64,
}

/// Admin account lifecycle over an [`AdminStore`]. Passwords are bcrypt
/// hashed unconditionally on create and update.
pub struct AdminAccountService<S> {
    store: Arc<S>,
}

impl<S> AdminAccountService<S>
where
    S: AdminStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn create(&self, request: NewAdminAccount) -> Result<AdminUser, AccountError> {
        validate_email(&request.email)?;
        validate_password(&request.password)?;

        let record = CredentialRecord {
            id: next_admin_id(),
            email: request.email,
            password_hash: bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)?,
            created_at: Utc::now(),
            last_login: None,
        };

        let stored = self.store.insert(record)?;
        Ok(stored.view())
    }

    pub fn update(
        &self,
        id: &AdminId,
        update: AdminAccountUpdate,
    ) -> Result<AdminUser, AccountError> {
        let mut record = self.store.find_by_id(id)?.ok_or(StoreError::NotFound)?;

        if let Some(email) = update.email {
            validate_email(&email)?;
            // Emails are login identifiers; a rename must not collide with
            // another account.
            if let Some(existing) = self.store.find_by_email(&email)? {
                if existing.id != *id {
                    return Err(StoreError::Conflict.into());
                }
            }
            record.email = email;
        }
        if let Some(password) = update.password {
            validate_password(&password)?;
            record.password_hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)?;
        }

        self.store.update(record.clone())?;
        Ok(record.view())
    }

    pub fn get(&self, id: &AdminId) -> Result<AdminUser, AccountError> {
        let record = self.store.find_by_id(id)?.ok_or(StoreError::NotFound)?;
        Ok(record.view())
    }

    pub fn remove(&self, id: &AdminId) -> Result<(), AccountError> {
        self.store.remove(id)?;
        Ok(())
    }

    pub fn list(
        &self,
        search: Option<&str>,
        page: usize,
        take: usize,
    ) -> Result<AdminDirectoryPage, AccountError> {
        let take = take.max(1);
        let page = page.max(1);
        let listing = self.store.list(search, take, (page - 1) * take)?;

        let total_pages = listing.total.div_ceil(take as u64);
        Ok(AdminDirectoryPage {
            users: listing.users,
            total: listing.total,
            page,
            total_pages,
        })
    }
}

fn validate_email(email: &str) -> Result<(), AccountError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(AccountError::InvalidEmail);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AccountError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AccountError::WeakPassword);
    }
    Ok(())
}

/// Error raised by the account service.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("email must be a non-empty address")]
    InvalidEmail,
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    WeakPassword,
    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
