pub mod memory;
mod types;

pub use types::*;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Conflict(String),

    #[error("not enough slots: requested {requested}, available {available}")]
    InsufficientSlots { requested: i32, available: i32 },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Repository interface for all persisted state.
///
/// The reference implementation is [`memory::MemStore`]; a relational
/// backend implements the same contract with row locks or transactions
/// around `create_investment`.
#[async_trait]
pub trait Store: Send + Sync {
    async fn user(&self, id: i64) -> StoreResult<Option<User>>;
    async fn user_by_phone(&self, phone_number: &str) -> StoreResult<Option<User>>;
    /// Fails with `Conflict` when the phone number is already registered.
    async fn create_user(&self, new: NewUser) -> StoreResult<User>;

    async fn project(&self, id: &str) -> StoreResult<Option<Project>>;
    async fn projects(&self) -> StoreResult<Vec<Project>>;

    async fn investment_model(&self, id: &str) -> StoreResult<Option<InvestmentModel>>;
    async fn models_by_project(&self, project_id: &str) -> StoreResult<Vec<InvestmentModel>>;

    async fn investments_by_user(&self, user_id: i64) -> StoreResult<Vec<Investment>>;
    /// Atomically checks slot availability, decrements the model's counter
    /// and persists the record. The check and the decrement MUST NOT be
    /// separable by a concurrent call against the same model.
    async fn create_investment(&self, new: NewInvestment) -> StoreResult<Investment>;

    async fn create_otp(&self, new: NewOtp) -> StoreResult<OtpRecord>;
    /// Most recently issued unconsumed OTP for a phone number, if any.
    async fn latest_unused_otp(&self, phone_number: &str) -> StoreResult<Option<OtpRecord>>;
    async fn mark_otp_used(&self, id: i64) -> StoreResult<()>;

    async fn draft(&self, user_id: i64, project_id: &str) -> StoreResult<Option<Draft>>;
    async fn put_draft(&self, draft: Draft) -> StoreResult<Draft>;
    /// Returns whether a draft existed.
    async fn delete_draft(&self, user_id: i64, project_id: &str) -> StoreResult<bool>;
}
