//! Automation-callback endpoints.
//!
//! The body is raw bytes on purpose: nothing is parsed until the
//! shared-secret gate has passed, so unauthenticated callers cost no
//! work. After authentication the payload's claimed organization is
//! checked against the job's actual owner before anything mutates —
//! a valid secret alone cannot be aimed at another tenant's job.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use serde_json::{Value, json};
use tracing::info;

use anivise_auth::webhook::LEGACY_N8N_HEADER;
use anivise_core::error::AniviseError;
use anivise_core::models::dossier::{CallbackStatus, JobCallback, JobResultUpdate, JobStatus};
use anivise_core::models::notification::{Notification, NotificationKind};
use anivise_core::repository::{
    AuditSink, Directory, DossierJobRepository, IdentityProvider, Notifier,
};
use anivise_core::secrets::SecretProvider;

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /api/callbacks/{system}` — dynamic header name per system.
pub async fn receive<I, D, J, P, N, A>(
    State(state): State<AppState<I, D, J, P, N, A>>,
    Path(system): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError>
where
    I: IdentityProvider + Clone,
    D: Directory + Clone,
    J: DossierJobRepository + Clone,
    P: SecretProvider,
    N: Notifier + Clone,
    A: AuditSink + Clone,
{
    state.webhook.authenticate(&system, &headers).await?;
    process(&state, &system, &body).await
}

/// `POST /api/n8n/callback` — legacy endpoint with the fixed
/// `X-N8N-Secret` header.
pub async fn receive_legacy<I, D, J, P, N, A>(
    State(state): State<AppState<I, D, J, P, N, A>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError>
where
    I: IdentityProvider + Clone,
    D: Directory + Clone,
    J: DossierJobRepository + Clone,
    P: SecretProvider,
    N: Notifier + Clone,
    A: AuditSink + Clone,
{
    state
        .webhook
        .authenticate_with_header("n8n", LEGACY_N8N_HEADER, &headers)
        .await?;
    process(&state, "n8n", &body).await
}

async fn process<I, D, J, P, N, A>(
    state: &AppState<I, D, J, P, N, A>,
    system: &str,
    body: &[u8],
) -> Result<Json<Value>, ApiError>
where
    I: IdentityProvider + Clone,
    D: Directory + Clone,
    J: DossierJobRepository + Clone,
    P: SecretProvider,
    N: Notifier + Clone,
    A: AuditSink + Clone,
{
    let callback: JobCallback = serde_json::from_slice(body).map_err(|e| {
        AniviseError::Validation {
            message: format!("invalid callback payload: {e}"),
        }
    })?;

    let job = state
        .jobs
        .get(callback.job_id)
        .await?
        .ok_or_else(|| AniviseError::NotFound {
            entity: "dossier_job".into(),
            id: callback.job_id.to_string(),
        })?;

    // Ownership check before any mutation. Responds like "not found"
    // so a probing caller learns nothing about foreign jobs.
    if job.organization_id != callback.organization_id {
        return Err(AniviseError::WebhookResourceMismatch {
            entity: "dossier_job".into(),
            id: callback.job_id.to_string(),
        }
        .into());
    }

    let status = match callback.status {
        CallbackStatus::Completed => JobStatus::Completed,
        CallbackStatus::Failed => JobStatus::Failed,
    };
    let job = state
        .jobs
        .record_result(
            job.id,
            JobResultUpdate {
                status,
                result_data: callback.result_data,
                error_message: callback.error_message.clone(),
            },
        )
        .await?;

    match callback.status {
        CallbackStatus::Completed => {
            let notification = Notification {
                kind: NotificationKind::DossierCompleted,
                organization_id: job.organization_id,
                job_id: job.id,
                message: "Your dossier is ready".into(),
            };
            state.notifier.notify_user(job.requested_by, notification).await?;
        }
        CallbackStatus::Failed => {
            // Exactly one notification to the requester and one
            // broadcast to the platform superadmins.
            let notification = Notification {
                kind: NotificationKind::DossierFailed,
                organization_id: job.organization_id,
                job_id: job.id,
                message: callback
                    .error_message
                    .unwrap_or_else(|| "dossier generation failed".into()),
            };
            state
                .notifier
                .notify_user(job.requested_by, notification.clone())
                .await?;
            state.notifier.broadcast_superadmins(notification).await?;
        }
    }

    info!(system, job_id = %job.id, status = ?job.status, "callback accepted");
    Ok(Json(json!({ "success": true })))
}
