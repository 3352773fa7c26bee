use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;

use crate::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    invest::{
        dto::{CreateInvestmentRequest, ProjectionQuery, ProjectionResponse},
        projection, services,
    },
    state::AppState,
    store::{Investment, Store, StoreError},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/investments",
            get(list_investments).post(create_investment),
        )
        .route(
            "/projects/:project_id/models/:model_id/projection",
            get(projection_quote),
        )
}

#[instrument(skip(state))]
async fn list_investments(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<Investment>>> {
    Ok(Json(state.store.investments_by_user(user_id).await?))
}

#[instrument(skip(state, payload))]
async fn create_investment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateInvestmentRequest>,
) -> ApiResult<(StatusCode, Json<Investment>)> {
    let investment = services::create_investment(state.store.as_ref(), user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(investment)))
}

/// Read-only quote: what a slot selection would be worth at maturity.
/// Deliberately does not check availability; quoting reserves nothing.
#[instrument(skip(state))]
async fn projection_quote(
    State(state): State<AppState>,
    Path((project_id, model_id)): Path<(String, String)>,
    Query(query): Query<ProjectionQuery>,
) -> ApiResult<Json<ProjectionResponse>> {
    if query.slots < 1 {
        return Err(ApiError::Validation(
            "slots must be a positive integer".into(),
        ));
    }

    let project = state
        .store
        .project(&project_id)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "Project",
            id: project_id.clone(),
        })?;
    let model = state
        .store
        .investment_model(&model_id)
        .await?
        .filter(|m| m.project_id == project.id)
        .ok_or(StoreError::NotFound {
            entity: "Investment model",
            id: model_id.clone(),
        })?;

    let principal = model.min_investment * query.slots as i64;
    Ok(Json(ProjectionResponse {
        project_id,
        model_id,
        slots: query.slots,
        principal,
        projected_value: projection::maturity_value(principal, model.roi, model.lock_in_period),
        roi: model.roi,
        lock_in_period: model.lock_in_period,
        maturity_date: projection::add_years(OffsetDateTime::now_utc(), model.lock_in_period),
    }))
}
