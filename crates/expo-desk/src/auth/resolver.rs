//! Ordered-fallback credential resolution.
//!
//! One login attempt walks a fixed chain: primary store, then the
//! statically configured fallback credential. A store outage is treated
//! exactly like "no match" and falls through rather than aborting the
//! attempt. The caller only ever observes `Principal` or [`Rejected`];
//! the internal not-found / mismatch / unavailable distinctions surface
//! through tracing alone, so identifier enumeration stays impossible.

use std::sync::Arc;

use chrono::Utc;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::config::{FallbackCredential, FallbackSecret};

use super::domain::{AdminId, Principal};
use super::store::AdminStore;

const FALLBACK_PRINCIPAL_ID: &str = "fallback-admin";

/// Uniform terminal outcome for every failed authentication attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid email or password")]
pub struct Rejected;

pub struct CredentialResolver<S> {
    store: Arc<S>,
    fallback: Option<FallbackCredential>,
}

impl<S> CredentialResolver<S>
where
    S: AdminStore + 'static,
{
    pub fn new(store: Arc<S>, fallback: Option<FallbackCredential>) -> Self {
        Self { store, fallback }
    }

    /// Authenticate an email/secret pair against the chain, stopping at
    /// the first source that verifies it.
    pub fn authenticate(&self, email: &str, secret: &str) -> Result<Principal, Rejected> {
        if let Some(principal) = self.try_primary(email, secret) {
            return Ok(principal);
        }
        if let Some(principal) = self.try_fallback(email, secret) {
            return Ok(principal);
        }
        Err(Rejected)
    }

    fn try_primary(&self, email: &str, secret: &str) -> Option<Principal> {
        let record = match self.store.find_by_email(email) {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("primary store has no matching identifier");
                return None;
            }
            Err(err) => {
                warn!(error = %err, "primary credential store unavailable, falling through");
                return None;
            }
        };

        if !verify_hash(secret, &record.password_hash) {
            debug!("primary store secret mismatch");
            return None;
        }

        // The principal carries the previous login time; the touch below
        // records this one. Concurrent touches are last-write-wins.
        let principal = Principal {
            id: record.id.clone(),
            email: record.email,
            last_login: record.last_login,
        };

        if let Err(err) = self.store.touch_last_login(&record.id, Utc::now()) {
            warn!(error = %err, "verified against primary store but failed to record last login");
        }

        Some(principal)
    }

    fn try_fallback(&self, email: &str, secret: &str) -> Option<Principal> {
        let fallback = self.fallback.as_ref()?;
        if email != fallback.email {
            return None;
        }

        let verified = match &fallback.secret {
            FallbackSecret::Hashed(hash) => verify_hash(secret, hash),
            FallbackSecret::Plaintext(expected) => constant_time_eq(secret, expected),
        };
        if !verified {
            debug!("fallback credential secret mismatch");
            return None;
        }

        // Fallback principals are not persisted entities; no last-login
        // side effect.
        Some(Principal {
            id: AdminId(FALLBACK_PRINCIPAL_ID.to_string()),
            email: fallback.email.clone(),
            last_login: Some(Utc::now()),
        })
    }
}

/// bcrypt comparison; malformed hashes count as a mismatch rather than an
/// error the caller could observe.
pub(crate) fn verify_hash(secret: &str, hash: &str) -> bool {
    bcrypt::verify(secret, hash).unwrap_or(false)
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
