//! The protected context route.

use axum::Extension;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use serde::Deserialize;

use anivise_core::models::context::{OrgContext, TenantHint};
use anivise_core::models::role::OrgRole;
use anivise_core::repository::{
    AuditSink, Directory, DossierJobRepository, IdentityProvider, Notifier,
};
use anivise_core::secrets::SecretProvider;

use crate::cookie;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeQuery {
    /// Minimum org role to demand for this request; 403 when unmet.
    #[serde(default)]
    pub required_role: Option<OrgRole>,
}

/// `GET /api/me` — resolve and return the caller's [`OrgContext`].
///
/// The full per-request chain in one place: session principal, tenant
/// hint from the middleware, impersonation cookie, then the resolver.
pub async fn get_me<I, D, J, P, N, A>(
    State(state): State<AppState<I, D, J, P, N, A>>,
    Extension(hint): Extension<TenantHint>,
    Query(query): Query<MeQuery>,
    headers: HeaderMap,
) -> Result<Json<OrgContext>, ApiError>
where
    I: IdentityProvider + Clone,
    D: Directory + Clone,
    J: DossierJobRepository + Clone,
    P: SecretProvider,
    N: Notifier + Clone,
    A: AuditSink + Clone,
{
    let principal = state.principal(&headers).await?;
    let impersonation =
        cookie::impersonation_token(&headers).and_then(|token| state.codec.decode(&token));

    let context = state
        .resolver
        .resolve(principal, &hint, impersonation, query.required_role)
        .await?;
    Ok(Json(context))
}
