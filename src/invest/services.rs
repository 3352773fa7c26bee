use time::OffsetDateTime;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::invest::dto::CreateInvestmentRequest;
use crate::invest::projection;
use crate::store::{Investment, NewInvestment, Store, StoreError};

/// The investment workflow: validate references, compute the financials,
/// and hand the store one atomic reserve-and-insert.
///
/// The store re-checks availability under its own lock, so a stale read
/// here can never oversell; this function's checks exist to produce the
/// right 404s and to source the denormalized display fields.
pub async fn create_investment(
    store: &dyn Store,
    user_id: i64,
    req: CreateInvestmentRequest,
) -> ApiResult<Investment> {
    if req.slots < 1 {
        return Err(ApiError::Validation(
            "slots must be a positive integer".into(),
        ));
    }

    let project = store
        .project(&req.project_id)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "Project",
            id: req.project_id.clone(),
        })?;

    let model = store
        .investment_model(&req.model_id)
        .await?
        .filter(|m| m.project_id == project.id)
        .ok_or(StoreError::NotFound {
            entity: "Investment model",
            id: req.model_id.clone(),
        })?;

    let now = OffsetDateTime::now_utc();
    let investment = store
        .create_investment(NewInvestment {
            user_id,
            project_id: project.id.clone(),
            project_name: project.name.clone(),
            model_id: model.id.clone(),
            model_name: model.name.clone(),
            slots: req.slots,
            amount: model.min_investment * req.slots as i64,
            expected_returns: model.roi,
            lock_in_period: model.lock_in_period,
            maturity_date: projection::add_years(now, model.lock_in_period),
            created_at: now,
        })
        .await?;

    info!(
        user_id,
        investment_id = investment.id,
        model_id = %investment.model_id,
        slots = investment.slots,
        amount = investment.amount,
        "investment created"
    );
    Ok(investment)
}
