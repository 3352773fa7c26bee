use serde::{Deserialize, Serialize};

use crate::store::Draft;

/// Request body for saving the wizard state of a project.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDraftRequest {
    pub model_id: Option<String>,
    pub slots: i32,
    pub quantity: i32,
    pub step: u8,
}

/// Outcome of reconciling a stored draft against the current catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftStatus {
    /// Everything the draft references still exists; safe to resume.
    Resumable,
    /// The project the draft belongs to is gone.
    ProjectMissing,
    /// The selected model no longer exists.
    ModelMissing,
    /// The draft was written by an older schema version.
    VersionMismatch,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub status: DraftStatus,
    pub draft: Draft,
}
