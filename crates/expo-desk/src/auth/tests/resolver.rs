use std::sync::Arc;

use super::common::*;
use crate::auth::domain::AdminId;
use crate::auth::resolver::Rejected;

#[test]
fn primary_store_success_returns_principal_and_touches_last_login() {
    let store = Arc::new(MemoryAdmins::seeded(vec![credential(
        "admin-000001",
        "real@x.com",
        "correct horse",
    )]));
    let resolver = resolver_with(store.clone(), None);

    let principal = resolver
        .authenticate("real@x.com", "correct horse")
        .expect("authenticates");

    assert_eq!(principal.id, AdminId("admin-000001".to_string()));
    assert_eq!(principal.email, "real@x.com");
    // The principal carries the pre-login value; the store records this one.
    assert!(principal.last_login.is_none());
    let stored = store.record("real@x.com").expect("record present");
    assert!(stored.last_login.is_some());
}

#[test]
fn rejection_is_uniform_across_unknown_and_mismatch() {
    let store = Arc::new(MemoryAdmins::seeded(vec![credential(
        "admin-000001",
        "real@x.com",
        "correct horse",
    )]));
    let resolver = resolver_with(store, None);

    let unknown = resolver.authenticate("unknown@x.com", "anything");
    let mismatch = resolver.authenticate("real@x.com", "wrongsecret");

    assert_eq!(unknown, Err(Rejected));
    assert_eq!(mismatch, Err(Rejected));
    assert_eq!(unknown, mismatch, "callers see one indistinguishable outcome");
}

#[test]
fn fallback_succeeds_when_primary_store_is_unavailable() {
    let resolver = resolver_with(
        Arc::new(UnavailableAdmins),
        Some(fallback_hashed("admin@expo.example", "fallback-secret")),
    );

    let principal = resolver
        .authenticate("admin@expo.example", "fallback-secret")
        .expect("fallback authenticates");

    assert_eq!(principal.id, AdminId("fallback-admin".to_string()));
    assert_eq!(principal.email, "admin@expo.example");
}

#[test]
fn unavailable_store_without_fallback_rejects() {
    let resolver = resolver_with(Arc::new(UnavailableAdmins), None);
    assert_eq!(
        resolver.authenticate("admin@expo.example", "anything"),
        Err(Rejected)
    );
}

#[test]
fn primary_mismatch_falls_through_to_fallback() {
    let store = Arc::new(MemoryAdmins::seeded(vec![credential(
        "admin-000001",
        "admin@expo.example",
        "primary-secret",
    )]));
    let resolver = resolver_with(
        store,
        Some(fallback_hashed("admin@expo.example", "fallback-secret")),
    );

    let principal = resolver
        .authenticate("admin@expo.example", "fallback-secret")
        .expect("fallback catches the attempt");
    assert_eq!(principal.id, AdminId("fallback-admin".to_string()));
}

#[test]
fn plaintext_fallback_works_as_degraded_mode() {
    let store = Arc::new(MemoryAdmins::default());
    let resolver = resolver_with(
        store.clone(),
        Some(fallback_plain("admin@expo.example", "plain-secret")),
    );

    assert!(resolver.authenticate("admin@expo.example", "plain-secret").is_ok());
    assert_eq!(
        resolver.authenticate("admin@expo.example", "plain-secret "),
        Err(Rejected)
    );
    // Fallback credentials are not persisted entities.
    assert!(store.is_empty());
}

#[test]
fn fallback_requires_exact_identifier_match() {
    let resolver = resolver_with(
        Arc::new(MemoryAdmins::default()),
        Some(fallback_hashed("admin@expo.example", "fallback-secret")),
    );

    assert_eq!(
        resolver.authenticate("ADMIN@expo.example", "fallback-secret"),
        Err(Rejected)
    );
}

#[test]
fn malformed_stored_hash_counts_as_mismatch() {
    let mut record = credential("admin-000001", "real@x.com", "irrelevant");
    record.password_hash = "not-a-bcrypt-hash".to_string();
    let resolver = resolver_with(Arc::new(MemoryAdmins::seeded(vec![record])), None);

    assert_eq!(resolver.authenticate("real@x.com", "irrelevant"), Err(Rejected));
}
