use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Registered investor, created after phone verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub phone_number: String,
    pub name: String,
    pub email: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub phone_number: String,
    pub name: String,
    pub email: Option<String>,
}

/// A real-estate development open for investment. Seeded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub location: String,
    pub minimum_investment: i64,
    pub estimated_returns: f64,
    pub lock_in_period: i32,
    pub available_slots: i32,
    pub image: String,
}

/// A named tier (Gold/Platinum/Virtual) within a project.
///
/// `available_slots` only ever decreases; there is no cancellation path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentModel {
    pub id: String,
    pub name: String,
    pub min_investment: i64,
    pub roi: f64,
    pub lock_in_period: i32,
    pub available_slots: i32,
    pub project_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentStatus {
    Active,
    Completed,
}

/// A completed purchase of slots. Immutable once created.
///
/// Project and model names are denormalized for display, matching the wire
/// shape the dashboard consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: i64,
    pub user_id: i64,
    pub project_id: String,
    pub project_name: String,
    pub model_id: String,
    pub model_name: String,
    pub slots: i32,
    pub amount: i64,
    pub expected_returns: f64,
    pub lock_in_period: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub maturity_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub status: InvestmentStatus,
}

/// Fully-computed investment as produced by the workflow service; the store
/// assigns the ID and persists it atomically with the slot decrement.
#[derive(Debug, Clone)]
pub struct NewInvestment {
    pub user_id: i64,
    pub project_id: String,
    pub project_name: String,
    pub model_id: String,
    pub model_name: String,
    pub slots: i32,
    pub amount: i64,
    pub expected_returns: f64,
    pub lock_in_period: i32,
    pub maturity_date: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

/// One-time passcode issued for a phone number. Single-use and expiring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRecord {
    pub id: i64,
    pub phone_number: String,
    pub code: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    pub used: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewOtp {
    pub phone_number: String,
    pub code: String,
    pub expires_at: OffsetDateTime,
}

/// An unfinished wizard selection for a project, one per (user, project).
///
/// Versioned and expiring so stale drafts can be reconciled explicitly
/// instead of silently resumed against a changed catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub user_id: i64,
    pub project_id: String,
    pub model_id: Option<String>,
    pub slots: i32,
    pub quantity: i32,
    pub step: u8,
    pub version: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}
