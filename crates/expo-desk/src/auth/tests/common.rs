use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::auth::accounts::AdminAccountService;
use crate::auth::domain::{AdminId, AdminUser, CredentialRecord};
use crate::auth::resolver::CredentialResolver;
use crate::auth::router::{auth_router, AuthState};
use crate::auth::store::{AdminPage, AdminStore, StoreError};
use crate::config::{FallbackCredential, FallbackSecret};

// Low cost keeps the suite fast; production hashing uses DEFAULT_COST.
pub(super) const TEST_BCRYPT_COST: u32 = 4;

pub(super) fn hash(password: &str) -> String {
    bcrypt::hash(password, TEST_BCRYPT_COST).expect("hash succeeds")
}

pub(super) fn credential(id: &str, email: &str, password: &str) -> CredentialRecord {
    CredentialRecord {
        id: AdminId(id.to_string()),
        email: email.to_string(),
        password_hash: hash(password),
        created_at: Utc::now(),
        last_login: None,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAdmins {
    pub(super) records: Arc<Mutex<HashMap<AdminId, CredentialRecord>>>,
}

impl MemoryAdmins {
    pub(super) fn seeded(records: Vec<CredentialRecord>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.records.lock().expect("store mutex poisoned");
            for record in records {
                guard.insert(record.id.clone(), record);
            }
        }
        store
    }

    pub(super) fn record(&self, email: &str) -> Option<CredentialRecord> {
        let guard = self.records.lock().expect("store mutex poisoned");
        guard.values().find(|record| record.email == email).cloned()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.records.lock().expect("store mutex poisoned").is_empty()
    }
}

impl AdminStore for MemoryAdmins {
    fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, StoreError> {
        Ok(self.record(email))
    }

    fn find_by_id(&self, id: &AdminId) -> Result<Option<CredentialRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert(&self, record: CredentialRecord) -> Result<CredentialRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.values().any(|existing| existing.email == record.email) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: CredentialRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if !guard.contains_key(&record.id) {
            return Err(StoreError::NotFound);
        }
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn remove(&self, id: &AdminId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn touch_last_login(&self, id: &AdminId, at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let record = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        record.last_login = Some(at);
        Ok(())
    }

    fn list(
        &self,
        search: Option<&str>,
        take: usize,
        skip: usize,
    ) -> Result<AdminPage, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        let needle = search.map(str::to_lowercase);
        let mut matches: Vec<AdminUser> = guard
            .values()
            .filter(|record| match &needle {
                Some(needle) => record.email.to_lowercase().contains(needle),
                None => true,
            })
            .map(CredentialRecord::view)
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.email.cmp(&b.email)));

        let total = matches.len() as u64;
        let users = matches.into_iter().skip(skip).take(take).collect();
        Ok(AdminPage { users, total })
    }
}

pub(super) struct UnavailableAdmins;

impl AdminStore for UnavailableAdmins {
    fn find_by_email(&self, _email: &str) -> Result<Option<CredentialRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn find_by_id(&self, _id: &AdminId) -> Result<Option<CredentialRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _record: CredentialRecord) -> Result<CredentialRecord, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: CredentialRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &AdminId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn touch_last_login(&self, _id: &AdminId, _at: DateTime<Utc>) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn list(
        &self,
        _search: Option<&str>,
        _take: usize,
        _skip: usize,
    ) -> Result<AdminPage, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn fallback_hashed(email: &str, password: &str) -> FallbackCredential {
    FallbackCredential {
        email: email.to_string(),
        secret: FallbackSecret::Hashed(hash(password)),
    }
}

pub(super) fn fallback_plain(email: &str, password: &str) -> FallbackCredential {
    FallbackCredential {
        email: email.to_string(),
        secret: FallbackSecret::Plaintext(password.to_string()),
    }
}

pub(super) fn resolver_with<S: AdminStore + 'static>(
    store: Arc<S>,
    fallback: Option<FallbackCredential>,
) -> CredentialResolver<S> {
    CredentialResolver::new(store, fallback)
}

pub(super) fn auth_state<S: AdminStore + 'static>(
    store: Arc<S>,
    fallback: Option<FallbackCredential>,
) -> AuthState<S> {
    AuthState {
        resolver: Arc::new(CredentialResolver::new(store.clone(), fallback)),
        accounts: Arc::new(AdminAccountService::new(store)),
    }
}

pub(super) fn router_with<S: AdminStore + 'static>(
    store: Arc<S>,
    fallback: Option<FallbackCredential>,
) -> axum::Router {
    auth_router(auth_state(store, fallback))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
