use serde::{Deserialize, Serialize};

use crate::store::User;

/// Request body for issuing an OTP.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    pub phone_number: String,
}

/// Request body for OTP verification.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub phone_number: String,
    pub otp: String,
}

/// Request body for profile creation after a first-time verification.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub phone_number: String,
    pub name: String,
    pub email: Option<String>,
}

/// Response for OTP verification: either the known user (with a session
/// established) or a flag telling the client to collect a profile.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub is_new_user: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
