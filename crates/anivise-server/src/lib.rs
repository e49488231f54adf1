//! Anivise Server — the HTTP boundary around the trust-boundary core.
//!
//! Everything transport-shaped lives here: cookie read/write, header
//! plumbing, status-code mapping. The core crates never see an HTTP
//! request.

pub mod cookie;
pub mod error;
pub mod routes;
pub mod state;
pub mod tenant_layer;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use anivise_core::repository::{
    AuditSink, Directory, DossierJobRepository, IdentityProvider, Notifier,
};
use anivise_core::secrets::SecretProvider;

use crate::state::AppState;

/// Build the application router over any set of backends.
pub fn router<I, D, J, P, N, A>(state: AppState<I, D, J, P, N, A>) -> Router
where
    I: IdentityProvider + Clone + 'static,
    D: Directory + Clone + 'static,
    J: DossierJobRepository + Clone + 'static,
    P: SecretProvider + 'static,
    N: Notifier + Clone + 'static,
    A: AuditSink + Clone + 'static,
{
    Router::new()
        .route("/api/me", get(routes::me::get_me))
        .route(
            "/api/admin/impersonation",
            post(routes::impersonation::start).delete(routes::impersonation::stop),
        )
        .route("/api/callbacks/{system}", post(routes::callbacks::receive))
        .route("/api/n8n/callback", post(routes::callbacks::receive_legacy))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            tenant_layer::attach_tenant_hint,
        ))
        .with_state(state)
}
