use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Request body for creating an investment. The user comes from the
/// session; everything else is computed server-side.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvestmentRequest {
    pub project_id: String,
    pub model_id: String,
    pub slots: i32,
}

#[derive(Debug, Deserialize)]
pub struct ProjectionQuery {
    #[serde(default = "default_slots")]
    pub slots: i32,
}

fn default_slots() -> i32 {
    1
}

/// Read-only maturity quote for a model and slot count.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub project_id: String,
    pub model_id: String,
    pub slots: i32,
    pub principal: i64,
    pub projected_value: i64,
    pub roi: f64,
    pub lock_in_period: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub maturity_date: OffsetDateTime,
}
