use serde::{Deserialize, Serialize};

/// Request body for creating a payment intent. The amount is in major
/// currency units (rupees); the provider is handed minor units.
#[derive(Debug, Deserialize)]
pub struct CreatePaymentIntentRequest {
    pub amount: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub client_secret: String,
}
