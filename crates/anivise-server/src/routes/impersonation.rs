//! Start/end impersonation endpoints (superadmin only).

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use anivise_core::error::AniviseError;
use anivise_core::models::audit::{AuditAction, AuditEvent};
use anivise_core::models::impersonation::ImpersonationSession;
use anivise_core::models::principal::Principal;
use anivise_core::models::role::{OrgRole, PlatformRole, meets_platform_role};
use anivise_core::repository::{
    AuditSink, Directory, DossierJobRepository, IdentityProvider, Notifier,
};
use anivise_core::secrets::SecretProvider;

use crate::cookie;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartImpersonation {
    pub organization_slug: String,
    /// Role to present as; defaults to `org_admin`.
    #[serde(default)]
    pub role: Option<OrgRole>,
}

async fn require_superadmin<I, D, J, P, N, A>(
    state: &AppState<I, D, J, P, N, A>,
    headers: &HeaderMap,
) -> Result<Principal, ApiError>
where
    I: IdentityProvider,
    D: Directory,
    J: DossierJobRepository,
    P: SecretProvider,
    N: Notifier,
    A: AuditSink,
{
    let principal = state
        .principal(headers)
        .await?
        .ok_or(AniviseError::Unauthenticated)?;
    if !meets_platform_role(principal.platform_role, Some(PlatformRole::Superadmin)) {
        return Err(AniviseError::Forbidden {
            reason: "impersonation requires platform superadmin".into(),
        }
        .into());
    }
    Ok(principal)
}

/// `POST /api/admin/impersonation`
pub async fn start<I, D, J, P, N, A>(
    State(state): State<AppState<I, D, J, P, N, A>>,
    headers: HeaderMap,
    Json(input): Json<StartImpersonation>,
) -> Result<Response, ApiError>
where
    I: IdentityProvider + Clone,
    D: Directory + Clone,
    J: DossierJobRepository + Clone,
    P: SecretProvider,
    N: Notifier + Clone,
    A: AuditSink + Clone,
{
    let principal = require_superadmin(&state, &headers).await?;

    let org = state
        .directory
        .org_by_slug(&input.organization_slug)
        .await?
        .ok_or_else(|| AniviseError::NotFound {
            entity: "organization".into(),
            id: input.organization_slug.clone(),
        })?;

    let session = ImpersonationSession {
        org_id: org.id,
        org_name: org.name.clone(),
        role: input.role.unwrap_or(OrgRole::OrgAdmin),
        started_at: Utc::now().timestamp_millis(),
    };
    let token = state.codec.encode(&session).map_err(AniviseError::from)?;

    state
        .audit
        .record(AuditEvent::new(
            principal.user_id,
            principal.email.clone(),
            AuditAction::ImpersonationStarted,
            Some(org.id),
            json!({ "orgSlug": org.slug, "role": session.role }),
        ))
        .await?;
    info!(actor = %principal.email, org = %org.slug, "impersonation started");

    let mut response_headers = HeaderMap::new();
    response_headers.insert(
        header::SET_COOKIE,
        cookie::set_impersonation_cookie(&token, state.secure_cookies)?,
    );
    Ok((
        StatusCode::OK,
        response_headers,
        Json(json!({
            "organizationId": org.id,
            "organizationName": org.name,
            "role": session.role,
            "startedAt": session.started_at,
        })),
    )
        .into_response())
}

/// `DELETE /api/admin/impersonation`
///
/// Revocation is purely client-side state removal: the codec cannot
/// invalidate an already-issued token, so ending impersonation means
/// discarding the cookie (and leaving an audit trail).
pub async fn stop<I, D, J, P, N, A>(
    State(state): State<AppState<I, D, J, P, N, A>>,
    headers: HeaderMap,
) -> Result<Response, ApiError>
where
    I: IdentityProvider + Clone,
    D: Directory + Clone,
    J: DossierJobRepository + Clone,
    P: SecretProvider,
    N: Notifier + Clone,
    A: AuditSink + Clone,
{
    let principal = state
        .principal(&headers)
        .await?
        .ok_or(AniviseError::Unauthenticated)?;

    let ended = cookie::impersonation_token(&headers).and_then(|t| state.codec.decode(&t));
    let metadata = match &ended {
        Some(session) => json!({ "orgId": session.org_id, "role": session.role }),
        None => json!({}),
    };
    state
        .audit
        .record(AuditEvent::new(
            principal.user_id,
            principal.email.clone(),
            AuditAction::ImpersonationEnded,
            ended.as_ref().map(|s| s.org_id),
            metadata,
        ))
        .await?;
    info!(actor = %principal.email, "impersonation ended");

    let mut response_headers = HeaderMap::new();
    response_headers.insert(
        header::SET_COOKIE,
        cookie::clear_impersonation_cookie(state.secure_cookies)?,
    );
    Ok((
        StatusCode::OK,
        response_headers,
        Json(json!({ "success": true })),
    )
        .into_response())
}
