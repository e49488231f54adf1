//! Shared application state.

use std::sync::Arc;

use http::HeaderMap;

use anivise_auth::config::AuthConfig;
use anivise_auth::context::OrgContextResolver;
use anivise_auth::impersonation::ImpersonationCodec;
use anivise_auth::webhook::WebhookAuthenticator;
use anivise_core::error::AniviseResult;
use anivise_core::models::principal::Principal;
use anivise_core::repository::{
    AuditSink, Directory, DossierJobRepository, IdentityProvider, Notifier,
};
use anivise_core::secrets::SecretProvider;

/// Application state, generic over the backend implementations so the
/// same routes serve the in-memory dev wiring and integration tests.
pub struct AppState<I, D, J, P, N, A>
where
    I: IdentityProvider,
    D: Directory,
    J: DossierJobRepository,
    P: SecretProvider,
    N: Notifier,
    A: AuditSink,
{
    pub identity: I,
    pub directory: D,
    pub jobs: J,
    pub notifier: N,
    pub audit: A,
    pub webhook: Arc<WebhookAuthenticator<P>>,
    pub resolver: Arc<OrgContextResolver<D>>,
    pub codec: Arc<ImpersonationCodec>,
    pub config: Arc<AuthConfig>,
    /// Mark Set-Cookie as `Secure`; off for local plain-HTTP dev.
    pub secure_cookies: bool,
}

// Hand-written so cloning does not demand `P: Clone`; the
// authenticator is always behind an `Arc`.
impl<I, D, J, P, N, A> Clone for AppState<I, D, J, P, N, A>
where
    I: IdentityProvider + Clone,
    D: Directory + Clone,
    J: DossierJobRepository + Clone,
    P: SecretProvider,
    N: Notifier + Clone,
    A: AuditSink + Clone,
{
    fn clone(&self) -> Self {
        Self {
            identity: self.identity.clone(),
            directory: self.directory.clone(),
            jobs: self.jobs.clone(),
            notifier: self.notifier.clone(),
            audit: self.audit.clone(),
            webhook: Arc::clone(&self.webhook),
            resolver: Arc::clone(&self.resolver),
            codec: Arc::clone(&self.codec),
            config: Arc::clone(&self.config),
            secure_cookies: self.secure_cookies,
        }
    }
}

impl<I, D, J, P, N, A> AppState<I, D, J, P, N, A>
where
    I: IdentityProvider,
    D: Directory,
    J: DossierJobRepository,
    P: SecretProvider,
    N: Notifier,
    A: AuditSink,
{
    /// Look up the acting principal from the `Authorization: Bearer`
    /// session token. `Ok(None)` when the token is missing or unknown
    /// — whether that denies the request is the caller's call.
    pub async fn principal(&self, headers: &HeaderMap) -> AniviseResult<Option<Principal>> {
        let Some(token) = headers
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
        else {
            return Ok(None);
        };
        self.identity.principal_for_token(token).await
    }
}
