use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod projection;
pub mod services;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
