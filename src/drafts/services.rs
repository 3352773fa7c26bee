use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::drafts::dto::{DraftResponse, DraftStatus, SaveDraftRequest};
use crate::error::{ApiError, ApiResult};
use crate::store::{Draft, Store, StoreError};

/// Schema version stamped onto every saved draft. Bump when the draft
/// shape changes; older drafts then reconcile as `VersionMismatch`.
pub const DRAFT_VERSION: u32 = 1;

/// Last step index of the wizard (explore, model, slots, summary).
const LAST_STEP: u8 = 3;

pub async fn save(
    store: &dyn Store,
    user_id: i64,
    project_id: &str,
    req: SaveDraftRequest,
    ttl: Duration,
) -> ApiResult<Draft> {
    if req.slots < 1 {
        return Err(ApiError::Validation(
            "slots must be a positive integer".into(),
        ));
    }
    if req.quantity < 1 {
        return Err(ApiError::Validation(
            "quantity must be a positive integer".into(),
        ));
    }
    if req.step > LAST_STEP {
        return Err(ApiError::Validation(format!(
            "step must be between 0 and {LAST_STEP}"
        )));
    }

    // A draft only makes sense against a project that exists right now;
    // the model may go stale later and is reconciled on load instead.
    store
        .project(project_id)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "Project",
            id: project_id.to_string(),
        })?;

    let now = OffsetDateTime::now_utc();
    let draft = store
        .put_draft(Draft {
            user_id,
            project_id: project_id.to_string(),
            model_id: req.model_id,
            slots: req.slots,
            quantity: req.quantity,
            step: req.step,
            version: DRAFT_VERSION,
            updated_at: now,
            expires_at: now + ttl,
        })
        .await?;
    debug!(user_id, %draft.project_id, step = draft.step, "draft saved");
    Ok(draft)
}

/// Load a draft and reconcile it against the current catalog.
///
/// Expired drafts are deleted on sight and reported as absent, so a
/// returning client never sees a resume offer it cannot act on.
pub async fn load(store: &dyn Store, user_id: i64, project_id: &str) -> ApiResult<DraftResponse> {
    let not_found = || StoreError::NotFound {
        entity: "Draft",
        id: project_id.to_string(),
    };

    let draft = store
        .draft(user_id, project_id)
        .await?
        .ok_or_else(not_found)?;

    if draft.expires_at <= OffsetDateTime::now_utc() {
        store.delete_draft(user_id, project_id).await?;
        debug!(user_id, %project_id, "expired draft discarded");
        return Err(not_found().into());
    }

    let status = reconcile(store, &draft).await?;
    Ok(DraftResponse { status, draft })
}

async fn reconcile(store: &dyn Store, draft: &Draft) -> ApiResult<DraftStatus> {
    if draft.version != DRAFT_VERSION {
        return Ok(DraftStatus::VersionMismatch);
    }
    if store.project(&draft.project_id).await?.is_none() {
        return Ok(DraftStatus::ProjectMissing);
    }
    if let Some(model_id) = &draft.model_id {
        let model = store.investment_model(model_id).await?;
        if !model.is_some_and(|m| m.project_id == draft.project_id) {
            return Ok(DraftStatus::ModelMissing);
        }
    }
    Ok(DraftStatus::Resumable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemStore;

    fn request(model_id: Option<&str>, step: u8) -> SaveDraftRequest {
        SaveDraftRequest {
            model_id: model_id.map(Into::into),
            slots: 2,
            quantity: 1,
            step,
        }
    }

    #[tokio::test]
    async fn save_then_load_is_resumable() {
        let store = MemStore::with_demo_data();
        save(&store, 1, "aura", request(Some("aura-gold"), 2), Duration::days(30))
            .await
            .unwrap();

        let loaded = load(&store, 1, "aura").await.unwrap();
        assert_eq!(loaded.status, DraftStatus::Resumable);
        assert_eq!(loaded.draft.model_id.as_deref(), Some("aura-gold"));
        assert_eq!(loaded.draft.step, 2);
        assert_eq!(loaded.draft.version, DRAFT_VERSION);
    }

    #[tokio::test]
    async fn missing_model_is_reported_on_load() {
        let store = MemStore::with_demo_data();
        // The client can hold a model id the catalog no longer has.
        save(&store, 1, "aura", request(Some("aura-diamond"), 2), Duration::days(30))
            .await
            .unwrap();

        let loaded = load(&store, 1, "aura").await.unwrap();
        assert_eq!(loaded.status, DraftStatus::ModelMissing);
    }

    #[tokio::test]
    async fn model_of_another_project_is_reported_missing() {
        let store = MemStore::with_demo_data();
        save(&store, 1, "aura", request(Some("subha-gold"), 2), Duration::days(30))
            .await
            .unwrap();

        let loaded = load(&store, 1, "aura").await.unwrap();
        assert_eq!(loaded.status, DraftStatus::ModelMissing);
    }

    #[tokio::test]
    async fn missing_project_is_reported_on_load() {
        // Seed a draft directly so it can reference a project the (empty)
        // catalog does not have, as after a catalog change.
        let store = MemStore::new();
        let now = OffsetDateTime::now_utc();
        store
            .put_draft(Draft {
                user_id: 1,
                project_id: "gone".into(),
                model_id: None,
                slots: 1,
                quantity: 1,
                step: 0,
                version: DRAFT_VERSION,
                updated_at: now,
                expires_at: now + Duration::days(1),
            })
            .await
            .unwrap();

        let loaded = load(&store, 1, "gone").await.unwrap();
        assert_eq!(loaded.status, DraftStatus::ProjectMissing);
    }

    #[tokio::test]
    async fn version_mismatch_wins_over_other_checks() {
        let store = MemStore::with_demo_data();
        let now = OffsetDateTime::now_utc();
        store
            .put_draft(Draft {
                user_id: 1,
                project_id: "aura".into(),
                model_id: Some("aura-gold".into()),
                slots: 1,
                quantity: 1,
                step: 1,
                version: DRAFT_VERSION + 1,
                updated_at: now,
                expires_at: now + Duration::days(1),
            })
            .await
            .unwrap();

        let loaded = load(&store, 1, "aura").await.unwrap();
        assert_eq!(loaded.status, DraftStatus::VersionMismatch);
    }

    #[tokio::test]
    async fn expired_draft_is_deleted_and_absent() {
        let store = MemStore::with_demo_data();
        save(&store, 1, "aura", request(None, 1), Duration::seconds(0))
            .await
            .unwrap();

        let err = load(&store, 1, "aura").await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Store(StoreError::NotFound { entity: "Draft", .. })
        ));
        // Deleted, not merely hidden.
        assert!(store.draft(1, "aura").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_validates_the_wizard_fields() {
        let store = MemStore::with_demo_data();
        let bad = [
            SaveDraftRequest { model_id: None, slots: 0, quantity: 1, step: 0 },
            SaveDraftRequest { model_id: None, slots: 1, quantity: 0, step: 0 },
            SaveDraftRequest { model_id: None, slots: 1, quantity: 1, step: 4 },
        ];
        for req in bad {
            let err = save(&store, 1, "aura", req, Duration::days(30))
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn save_against_an_unknown_project_is_not_found() {
        let store = MemStore::with_demo_data();
        let err = save(&store, 1, "atlantis", request(None, 0), Duration::days(30))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Store(StoreError::NotFound { entity: "Project", .. })
        ));
    }
}
