use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::store::{NewOtp, OtpRecord, Store, StoreResult};

pub(crate) fn is_valid_phone(phone: &str) -> bool {
    lazy_static! {
        static ref PHONE_RE: Regex = Regex::new(r"^\d{10}$").unwrap();
    }
    PHONE_RE.is_match(phone)
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Random 6-digit code, zero-padded.
pub fn generate_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

/// Issue a fresh OTP for a phone number.
///
/// No delivery channel is wired up; the code is written to the log so a
/// developer (or an SMS gateway reading the log stream) can pick it up.
pub async fn issue(store: &dyn Store, ttl: Duration, phone_number: &str) -> StoreResult<OtpRecord> {
    let otp = store
        .create_otp(NewOtp {
            phone_number: phone_number.to_string(),
            code: generate_code(),
            expires_at: OffsetDateTime::now_utc() + ttl,
        })
        .await?;
    info!(phone_number = %otp.phone_number, code = %otp.code, "otp issued (no delivery channel, code logged)");
    Ok(otp)
}

/// Check a submitted code against the latest unconsumed OTP.
///
/// A code verifies at most once: on success it is marked used before this
/// returns. Expired or mismatched codes verify as false and stay unconsumed.
pub async fn verify(store: &dyn Store, phone_number: &str, code: &str) -> StoreResult<bool> {
    let Some(otp) = store.latest_unused_otp(phone_number).await? else {
        debug!(%phone_number, "no outstanding otp");
        return Ok(false);
    };
    if otp.expires_at <= OffsetDateTime::now_utc() {
        debug!(%phone_number, "otp expired");
        return Ok(false);
    }
    if otp.code != code {
        debug!(%phone_number, "otp mismatch");
        return Ok(false);
    }
    store.mark_otp_used(otp.id).await?;
    Ok(true)
}
