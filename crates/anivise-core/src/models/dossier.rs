//! Dossier job domain model and the automation-callback wire types.
//!
//! A dossier job is the asynchronous unit of work handed to the
//! external workflow engine; the engine reports completion back via an
//! authenticated callback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// An asynchronous dossier-generation job owned by one organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DossierJob {
    pub id: Uuid,
    pub organization_id: Uuid,
    /// The user who requested the job; the target of the failure
    /// notification.
    pub requested_by: Uuid,
    pub status: JobStatus,
    pub result_data: Option<serde_json::Value>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Terminal status reported by the workflow engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallbackStatus {
    Completed,
    Failed,
}

/// Callback body posted by the workflow engine, parsed only after the
/// shared-secret gate has passed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCallback {
    /// Older engine workflows post this as `dossierId`.
    #[serde(alias = "dossierId")]
    pub job_id: Uuid,
    /// The organization the engine claims the job belongs to. Checked
    /// against the job's actual owner before anything is mutated.
    pub organization_id: Uuid,
    pub status: CallbackStatus,
    #[serde(default)]
    pub result_data: Option<serde_json::Value>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Fields written back onto a job when a callback is accepted.
#[derive(Debug, Clone)]
pub struct JobResultUpdate {
    pub status: JobStatus,
    pub result_data: Option<serde_json::Value>,
    pub error_message: Option<String>,
}

/// Per-request authentication verdict for an automation callback.
///
/// Not persisted; derived from header comparison against the secret
/// provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookIdentity {
    /// The automation system the matched secret belongs to (e.g.,
    /// `n8n`).
    pub system: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_accepts_job_id_or_dossier_id() {
        let a: JobCallback = serde_json::from_str(
            r#"{"jobId":"7e2f4f2e-9c5e-4b4f-a2ce-6f8b8f6f4a01",
                "organizationId":"11d8b5a0-0f3e-4a5d-9a52-0b1c2d3e4f50",
                "status":"completed"}"#,
        )
        .unwrap();
        let b: JobCallback = serde_json::from_str(
            r#"{"dossierId":"7e2f4f2e-9c5e-4b4f-a2ce-6f8b8f6f4a01",
                "organizationId":"11d8b5a0-0f3e-4a5d-9a52-0b1c2d3e4f50",
                "status":"failed",
                "errorMessage":"workflow crashed"}"#,
        )
        .unwrap();
        assert_eq!(a.job_id, b.job_id);
        assert_eq!(a.status, CallbackStatus::Completed);
        assert_eq!(b.status, CallbackStatus::Failed);
        assert_eq!(b.error_message.as_deref(), Some("workflow crashed"));
    }

    #[test]
    fn callback_rejects_unknown_status() {
        let res = serde_json::from_str::<JobCallback>(
            r#"{"jobId":"7e2f4f2e-9c5e-4b4f-a2ce-6f8b8f6f4a01",
                "organizationId":"11d8b5a0-0f3e-4a5d-9a52-0b1c2d3e4f50",
                "status":"cancelled"}"#,
        );
        assert!(res.is_err());
    }
}
