//! Trait definitions for the external collaborators the core is
//! generic over.
//!
//! All operations are async. "Not found" is a normal `Ok(None)`
//! outcome; `Err` is reserved for infrastructure faults (unreachable
//! backend, timeout) and must never be folded into an access-denied
//! answer by callers.

use uuid::Uuid;

use crate::error::AniviseResult;
use crate::models::{
    audit::AuditEvent,
    dossier::{DossierJob, JobResultUpdate},
    membership::Membership,
    notification::Notification,
    organization::Organization,
    principal::Principal,
    role::OrgRole,
};

/// Organization and membership lookups backing tenant resolution.
pub trait Directory: Send + Sync {
    /// Resolve a slug to a live organization. Soft-deleted
    /// organizations are treated as absent.
    fn org_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = AniviseResult<Option<Organization>>> + Send;

    /// The role granted by the (user, organization) membership row, if
    /// one exists.
    fn membership_role(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> impl Future<Output = AniviseResult<Option<OrgRole>>> + Send;

    /// The user's first membership, used only by the gated
    /// single-tenant development fallback.
    fn first_membership(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = AniviseResult<Option<Membership>>> + Send;
}

/// Session-token lookup against the external identity provider.
pub trait IdentityProvider: Send + Sync {
    fn principal_for_token(
        &self,
        token: &str,
    ) -> impl Future<Output = AniviseResult<Option<Principal>>> + Send;
}

/// Dossier-job store targeted by automation callbacks.
pub trait DossierJobRepository: Send + Sync {
    fn get(&self, id: Uuid) -> impl Future<Output = AniviseResult<Option<DossierJob>>> + Send;

    /// Write a callback result onto the job. Callers must have
    /// verified ownership first.
    fn record_result(
        &self,
        id: Uuid,
        update: JobResultUpdate,
    ) -> impl Future<Output = AniviseResult<DossierJob>> + Send;
}

/// Audit-event sink; persistence is the implementation's concern.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: AuditEvent) -> impl Future<Output = AniviseResult<()>> + Send;
}

/// Notification delivery for callback outcomes.
pub trait Notifier: Send + Sync {
    /// Deliver one notification to one user.
    fn notify_user(
        &self,
        user_id: Uuid,
        notification: Notification,
    ) -> impl Future<Output = AniviseResult<()>> + Send;

    /// Deliver one broadcast-class notification to all platform
    /// superadmins.
    fn broadcast_superadmins(
        &self,
        notification: Notification,
    ) -> impl Future<Output = AniviseResult<()>> + Send;
}
