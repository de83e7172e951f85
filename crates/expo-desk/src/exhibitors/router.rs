use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::CategoryTag;
use super::repository::{ExhibitorRepository, RepositoryError};
use super::service::{DirectoryQuery, ExhibitorDirectory};

const DEFAULT_CANDIDATE_LIMIT: usize = 100;

/// Router builder exposing the read-side dashboard endpoints.
pub fn exhibitor_router<R>(directory: Arc<ExhibitorDirectory<R>>) -> Router
where
    R: ExhibitorRepository + 'static,
{
    Router::new()
        .route("/api/v1/exhibitors", get(list_handler::<R>))
        .route("/api/v1/exhibitors/candidates", get(candidates_handler::<R>))
        .route("/api/v1/exhibitors/stats", get(stats_handler::<R>))
        .with_state(directory)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    q: Option<String>,
    category: Option<CategoryTag>,
    candidate: Option<String>,
    take: Option<usize>,
    page: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateParams {
    take: Option<usize>,
}

pub(crate) async fn list_handler<R>(
    State(directory): State<Arc<ExhibitorDirectory<R>>>,
    Query(params): Query<ListParams>,
) -> Response
where
    R: ExhibitorRepository + 'static,
{
    let query = DirectoryQuery {
        q: params.q.filter(|q| !q.is_empty()),
        category: params.category,
        candidates_only: matches!(params.candidate.as_deref(), Some("1") | Some("true")),
        take: params.take,
        page: params.page,
    };

    match directory.list(&query) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(err) => unavailable(err),
    }
}

pub(crate) async fn candidates_handler<R>(
    State(directory): State<Arc<ExhibitorDirectory<R>>>,
    Query(params): Query<CandidateParams>,
) -> Response
where
    R: ExhibitorRepository + 'static,
{
    match directory.candidates(params.take.unwrap_or(DEFAULT_CANDIDATE_LIMIT).max(1)) {
        Ok(candidates) => (
            StatusCode::OK,
            axum::Json(json!({
                "total": candidates.len(),
                "items": candidates,
            })),
        )
            .into_response(),
        Err(err) => unavailable(err),
    }
}

pub(crate) async fn stats_handler<R>(
    State(directory): State<Arc<ExhibitorDirectory<R>>>,
) -> Response
where
    R: ExhibitorRepository + 'static,
{
    match directory.stats() {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(err) => unavailable(err),
    }
}

fn unavailable(err: RepositoryError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
}
