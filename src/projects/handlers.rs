use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::ApiResult,
    state::AppState,
    store::{InvestmentModel, Project, Store, StoreError},
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects))
        .route("/projects/:project_id", get(get_project))
        .route("/projects/:project_id/models", get(list_models))
}

#[instrument(skip(state))]
async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    Ok(Json(state.store.projects().await?))
}

#[instrument(skip(state))]
async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<Project>> {
    let project = state
        .store
        .project(&project_id)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;
    Ok(Json(project))
}

/// Unknown projects list as empty rather than 404, matching the catalog's
/// read semantics elsewhere in the API.
#[instrument(skip(state))]
async fn list_models(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<Vec<InvestmentModel>>> {
    Ok(Json(state.store.models_by_project(&project_id).await?))
}
