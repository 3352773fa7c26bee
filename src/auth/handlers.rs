use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use time::Duration;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            CreateProfileRequest, MessageResponse, SendOtpRequest, VerifyOtpRequest,
            VerifyOtpResponse,
        },
        extractors::AuthUser,
        otp,
    },
    error::{ApiError, ApiResult},
    state::AppState,
    store::{NewUser, Store, StoreError, User},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/send-otp", post(send_otp))
        .route("/auth/verify-otp", post(verify_otp))
        .route("/auth/create-profile", post(create_profile))
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
}

#[instrument(skip(state, payload))]
async fn send_otp(
    State(state): State<AppState>,
    Json(payload): Json<SendOtpRequest>,
) -> ApiResult<Json<MessageResponse>> {
    if !otp::is_valid_phone(&payload.phone_number) {
        warn!(phone_number = %payload.phone_number, "rejected otp request for malformed phone");
        return Err(ApiError::Validation(
            "Phone number must be exactly 10 digits".into(),
        ));
    }

    otp::issue(
        state.store.as_ref(),
        Duration::minutes(state.config.otp.ttl_minutes),
        &payload.phone_number,
    )
    .await?;

    Ok(Json(MessageResponse {
        message: "OTP sent successfully".into(),
    }))
}

#[instrument(skip(state, payload))]
async fn verify_otp(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpRequest>,
) -> ApiResult<(HeaderMap, Json<VerifyOtpResponse>)> {
    if !otp::verify(state.store.as_ref(), &payload.phone_number, &payload.otp).await? {
        warn!(phone_number = %payload.phone_number, "otp verification failed");
        return Err(ApiError::Unauthenticated("Invalid OTP".into()));
    }

    let mut headers = HeaderMap::new();
    match state.store.user_by_phone(&payload.phone_number).await? {
        Some(user) => {
            let session_id = state.sessions.create(user.id).await;
            headers.insert(
                header::SET_COOKIE,
                state.sessions.set_cookie(session_id).parse().unwrap(),
            );
            info!(user_id = %user.id, "user logged in");
            Ok((
                headers,
                Json(VerifyOtpResponse {
                    is_new_user: false,
                    user: Some(user),
                }),
            ))
        }
        // Verified but unknown phone: the client collects a profile next.
        None => Ok((
            headers,
            Json(VerifyOtpResponse {
                is_new_user: true,
                user: None,
            }),
        )),
    }
}

#[instrument(skip(state, payload))]
async fn create_profile(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateProfileRequest>,
) -> ApiResult<(StatusCode, HeaderMap, Json<User>)> {
    payload.name = payload.name.trim().to_string();

    if !otp::is_valid_phone(&payload.phone_number) {
        return Err(ApiError::Validation(
            "Phone number must be exactly 10 digits".into(),
        ));
    }
    if payload.name.is_empty() {
        return Err(ApiError::Validation("Name is required".into()));
    }
    if let Some(email) = payload.email.as_deref() {
        if !otp::is_valid_email(email) {
            return Err(ApiError::Validation("Invalid email".into()));
        }
    }

    let user = state
        .store
        .create_user(NewUser {
            phone_number: payload.phone_number,
            name: payload.name,
            email: payload.email,
        })
        .await?;

    let session_id = state.sessions.create(user.id).await;
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        state.sessions.set_cookie(session_id).parse().unwrap(),
    );

    info!(user_id = %user.id, "profile created");
    Ok((StatusCode::CREATED, headers, Json(user)))
}

#[instrument(skip(state))]
async fn me(State(state): State<AppState>, AuthUser(user_id): AuthUser) -> ApiResult<Json<User>> {
    let user = state
        .store
        .user(user_id)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "User",
            id: user_id.to_string(),
        })?;
    Ok(Json(user))
}

#[instrument(skip(state, headers))]
async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<(HeaderMap, Json<MessageResponse>)> {
    let session_id = state
        .sessions
        .session_id_from_headers(&headers)
        .ok_or_else(|| ApiError::Unauthenticated("Not authenticated".into()))?;
    state.sessions.destroy(session_id).await;

    let mut out = HeaderMap::new();
    out.insert(
        header::SET_COOKIE,
        state.sessions.clear_cookie().parse().unwrap(),
    );
    Ok((
        out,
        Json(MessageResponse {
            message: "Logged out successfully".into(),
        }),
    ))
}
