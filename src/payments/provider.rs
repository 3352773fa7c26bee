use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Payment provider is not configured. Set PAYMENTS_MODE=mock or wire a real provider.")]
    NotConfigured,

    #[error("{0}")]
    Provider(String),
}

/// A created payment intent; the client completes payment against
/// `client_secret` on the provider's side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount_minor: i64,
    pub currency: String,
}

/// Seam for the external payment service. Amounts are in minor units
/// (paise for INR), the convention providers expect.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, ProviderError>;
}

/// Provider used when no payment backend is configured; every call fails
/// with a configuration error the route passes through.
pub struct DisabledProvider;

#[async_trait]
impl PaymentProvider for DisabledProvider {
    async fn create_intent(
        &self,
        _amount_minor: i64,
        _currency: &str,
    ) -> Result<PaymentIntent, ProviderError> {
        Err(ProviderError::NotConfigured)
    }
}

/// In-memory provider for tests and demo deployments.
///
/// Stores every created intent and can be armed to fail the next call to
/// exercise upstream-error paths.
#[derive(Default)]
pub struct MockPaymentProvider {
    intents: RwLock<HashMap<String, PaymentIntent>>,
    fail_next: RwLock<bool>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_next(&self, fail: bool) {
        *self.fail_next.write().await = fail;
    }

    pub async fn intent_count(&self) -> usize {
        self.intents.read().await.len()
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, ProviderError> {
        {
            let mut fail_next = self.fail_next.write().await;
            if *fail_next {
                *fail_next = false;
                return Err(ProviderError::Provider("simulated provider failure".into()));
            }
        }

        let id = format!("pi_{}", Uuid::new_v4().simple());
        let intent = PaymentIntent {
            client_secret: format!("{}_secret_{}", id, Uuid::new_v4().simple()),
            id: id.clone(),
            amount_minor,
            currency: currency.to_string(),
        };
        self.intents.write().await.insert(id, intent.clone());
        Ok(intent)
    }
}
