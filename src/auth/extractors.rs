use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;
use crate::state::AppState;

/// Resolves the session cookie to a user ID, rejecting with 401 otherwise.
pub struct AuthUser(pub i64);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session_id = state
            .sessions
            .session_id_from_headers(&parts.headers)
            .ok_or_else(|| ApiError::Unauthenticated("Not authenticated".into()))?;

        let user_id = state
            .sessions
            .resolve(session_id)
            .await
            .ok_or_else(|| ApiError::Unauthenticated("Invalid or expired session".into()))?;

        Ok(AuthUser(user_id))
    }
}
