use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use crate::{
    error::{ApiError, ApiResult},
    payments::dto::{CreatePaymentIntentRequest, CreatePaymentIntentResponse},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/create-payment-intent", post(create_payment_intent))
}

#[instrument(skip(state, payload))]
async fn create_payment_intent(
    State(state): State<AppState>,
    Json(payload): Json<CreatePaymentIntentRequest>,
) -> ApiResult<Json<CreatePaymentIntentResponse>> {
    if !payload.amount.is_finite() || payload.amount <= 0.0 {
        return Err(ApiError::Validation("Valid amount is required".into()));
    }

    let amount_minor = (payload.amount * 100.0).round() as i64;
    let intent = state
        .payments
        .create_intent(amount_minor, &state.config.payments.currency)
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    Ok(Json(CreatePaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}
