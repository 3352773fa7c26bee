use std::sync::Arc;

use time::Duration;

use crate::auth::sessions::SessionStore;
use crate::config::{AppConfig, PaymentsMode};
use crate::payments::provider::{DisabledProvider, MockPaymentProvider, PaymentProvider};
use crate::store::{memory::MemStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub sessions: Arc<SessionStore>,
    pub payments: Arc<dyn PaymentProvider>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Arc<AppConfig>) -> Self {
        let store = Arc::new(MemStore::with_demo_data()) as Arc<dyn Store>;
        let sessions = Arc::new(SessionStore::new(
            config.session.cookie_name.clone(),
            Duration::hours(config.session.ttl_hours),
            config.session.secure,
        ));
        let payments: Arc<dyn PaymentProvider> = match config.payments.mode {
            PaymentsMode::Mock => Arc::new(MockPaymentProvider::new()),
            PaymentsMode::Disabled => Arc::new(DisabledProvider),
        };
        Self {
            store,
            sessions,
            payments,
            config,
        }
    }

    /// Fixture state for tests: demo catalog, mock payments, defaults.
    pub fn demo() -> Self {
        use crate::config::{DraftConfig, OtpConfig, PaymentsConfig, SessionConfig};

        Self::from_config(Arc::new(AppConfig {
            session: SessionConfig {
                cookie_name: "sid".into(),
                ttl_hours: 24,
                secure: false,
            },
            otp: OtpConfig { ttl_minutes: 5 },
            drafts: DraftConfig { ttl_days: 30 },
            payments: PaymentsConfig {
                mode: PaymentsMode::Mock,
                currency: "inr".into(),
            },
        }))
    }
}
