use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::accounts::{AccountError, AdminAccountService, AdminAccountUpdate, NewAdminAccount};
use super::domain::AdminId;
use super::resolver::CredentialResolver;
use super::store::{AdminStore, StoreError};

/// Shared router state: the resolver for logins, the account service for
/// the admin-users pages.
pub struct AuthState<S> {
    pub resolver: Arc<CredentialResolver<S>>,
    pub accounts: Arc<AdminAccountService<S>>,
}

impl<S> Clone for AuthState<S> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
            accounts: self.accounts.clone(),
        }
    }
}

/// Router builder exposing login and admin account management.
pub fn auth_router<S>(state: AuthState<S>) -> Router
where
    S: AdminStore + 'static,
{
    Router::new()
        .route("/api/v1/auth/login", post(login_handler::<S>))
        .route(
            "/api/v1/admin-users",
            get(list_handler::<S>).post(create_handler::<S>),
        )
        .route(
            "/api/v1/admin-users/:id",
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    search: Option<String>,
    page: Option<usize>,
    take: Option<usize>,
}

pub(crate) async fn login_handler<S>(
    State(state): State<AuthState<S>>,
    axum::Json(request): axum::Json<LoginRequest>,
) -> Response
where
    S: AdminStore + 'static,
{
    match state.resolver.authenticate(&request.email, &request.password) {
        Ok(principal) => (StatusCode::OK, axum::Json(principal)).into_response(),
        // One body for every failure; callers cannot tell an unknown email
        // from a bad password.
        Err(rejected) => (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({ "error": rejected.to_string() })),
        )
            .into_response(),
    }
}

pub(crate) async fn create_handler<S>(
    State(state): State<AuthState<S>>,
    axum::Json(request): axum::Json<NewAdminAccount>,
) -> Response
where
    S: AdminStore + 'static,
{
    match state.accounts.create(request) {
        Ok(user) => (StatusCode::CREATED, axum::Json(user)).into_response(),
        Err(err) => account_error(err),
    }
}

pub(crate) async fn list_handler<S>(
    State(state): State<AuthState<S>>,
    Query(params): Query<ListParams>,
) -> Response
where
    S: AdminStore + 'static,
{
    let result = state.accounts.list(
        params.search.as_deref().filter(|s| !s.is_empty()),
        params.page.unwrap_or(1),
        params.take.unwrap_or(20),
    );

    match result {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(err) => account_error(err),
    }
}

pub(crate) async fn get_handler<S>(
    State(state): State<AuthState<S>>,
    Path(id): Path<String>,
) -> Response
where
    S: AdminStore + 'static,
{
    match state.accounts.get(&AdminId(id)) {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(err) => account_error(err),
    }
}

pub(crate) async fn update_handler<S>(
    State(state): State<AuthState<S>>,
    Path(id): Path<String>,
    axum::Json(update): axum::Json<AdminAccountUpdate>,
) -> Response
where
    S: AdminStore + 'static,
{
    match state.accounts.update(&AdminId(id), update) {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(err) => account_error(err),
    }
}

pub(crate) async fn delete_handler<S>(
    State(state): State<AuthState<S>>,
    Path(id): Path<String>,
) -> Response
where
    S: AdminStore + 'static,
{
    match state.accounts.remove(&AdminId(id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => account_error(err),
    }
}

fn account_error(err: AccountError) -> Response {
    let status = match &err {
        AccountError::InvalidEmail | AccountError::WeakPassword => StatusCode::UNPROCESSABLE_ENTITY,
        AccountError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        AccountError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        AccountError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        AccountError::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
