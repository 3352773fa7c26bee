use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_hours: i64,
    pub secure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpConfig {
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftConfig {
    pub ttl_days: i64,
}

/// Which payment provider backs /create-payment-intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentsMode {
    Disabled,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentsConfig {
    pub mode: PaymentsMode,
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub otp: OtpConfig,
    pub drafts: DraftConfig,
    pub payments: PaymentsConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let session = SessionConfig {
            cookie_name: std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "sid".into()),
            ttl_hours: std::env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(24),
            secure: std::env::var("SESSION_COOKIE_SECURE")
                .map(|v| v == "true")
                .unwrap_or(false),
        };
        let otp = OtpConfig {
            ttl_minutes: std::env::var("OTP_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(5),
        };
        let drafts = DraftConfig {
            ttl_days: std::env::var("DRAFT_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(30),
        };
        let payments = PaymentsConfig {
            mode: match std::env::var("PAYMENTS_MODE").as_deref() {
                Ok("mock") => PaymentsMode::Mock,
                _ => PaymentsMode::Disabled,
            },
            currency: std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "inr".into()),
        };
        Ok(Self {
            session,
            otp,
            drafts,
            payments,
        })
    }
}
