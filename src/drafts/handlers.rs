use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::Duration;
use tracing::instrument;

use crate::{
    auth::AuthUser,
    drafts::dto::{DraftResponse, SaveDraftRequest},
    drafts::services,
    error::ApiResult,
    state::AppState,
    store::{Draft, Store},
};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/projects/:project_id/draft",
        get(load_draft).put(save_draft).delete(discard_draft),
    )
}

#[instrument(skip(state))]
async fn load_draft(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(project_id): Path<String>,
) -> ApiResult<Json<DraftResponse>> {
    let response = services::load(state.store.as_ref(), user_id, &project_id).await?;
    Ok(Json(response))
}

#[instrument(skip(state, payload))]
async fn save_draft(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(project_id): Path<String>,
    Json(payload): Json<SaveDraftRequest>,
) -> ApiResult<Json<Draft>> {
    let draft = services::save(
        state.store.as_ref(),
        user_id,
        &project_id,
        payload,
        Duration::days(state.config.drafts.ttl_days),
    )
    .await?;
    Ok(Json(draft))
}

/// Discard is idempotent: deleting an absent draft is still a 204.
#[instrument(skip(state))]
async fn discard_draft(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(project_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.delete_draft(user_id, &project_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
