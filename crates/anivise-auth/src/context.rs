//! Per-request authorization context resolution.
//!
//! The single entry point protected handlers use to learn who is
//! acting, within which organization, and with what effective role.

use chrono::Utc;
use tracing::debug;

use anivise_core::error::AniviseResult;
use anivise_core::models::context::{OrgContext, TenantHint};
use anivise_core::models::impersonation::ImpersonationSession;
use anivise_core::models::principal::Principal;
use anivise_core::models::role::{OrgRole, PlatformRole, meets_org_role, meets_platform_role};
use anivise_core::repository::Directory;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Resolves the `(tenant, principal, role)` triple for one request.
///
/// Checks run strictly in order — impersonation before membership
/// before fallback — because impersonation taking precedence is a
/// correctness invariant, not an optimization. The resolver performs
/// read-only lookups and emits nothing; callers doing privileged
/// actions own their audit events.
pub struct OrgContextResolver<D: Directory> {
    directory: D,
    first_membership_fallback: bool,
}

impl<D: Directory> OrgContextResolver<D> {
    pub fn new(directory: D, config: &AuthConfig) -> Self {
        Self {
            directory,
            first_membership_fallback: config.first_membership_fallback,
        }
    }

    /// Build the request's [`OrgContext`] or deny.
    ///
    /// Denials are `Unauthenticated` (no principal) or `Forbidden`
    /// (principal known, privilege insufficient). Lookup I/O faults
    /// propagate unchanged and are never reported as denials.
    pub async fn resolve(
        &self,
        principal: Option<Principal>,
        hint: &TenantHint,
        impersonation: Option<ImpersonationSession>,
        required_role: Option<OrgRole>,
    ) -> AniviseResult<OrgContext> {
        // 1. No principal, no context.
        let Some(principal) = principal else {
            return Err(AuthError::Unauthenticated.into());
        };

        // 2. An active impersonation session wins outright: org and
        //    role come from the signed session, membership is never
        //    consulted. Impersonation exists precisely so a platform
        //    operator can act without a membership row.
        if let Some(session) = impersonation
            && session.is_active_at(Utc::now().timestamp_millis())
        {
            debug!(
                user_id = %principal.user_id,
                org_id = %session.org_id,
                role = ?session.role,
                "resolved context via impersonation"
            );
            return finish(
                OrgContext {
                    user_id: principal.user_id,
                    email: principal.email,
                    organization_id: Some(session.org_id),
                    role: Some(session.role),
                },
                required_role,
            );
        }

        // 3. Resolve the slug, if any. An unknown slug is "no
        //    tenant", not an error — tenant-less routes keep working.
        let organization = match hint.slug.as_deref() {
            Some(slug) => self.directory.org_by_slug(slug).await?,
            None => None,
        };

        if let Some(org) = organization {
            // 4. Membership role, or the centralized superadmin
            //    bypass: platform staff with superadmin get a
            //    synthesized org_admin for any tenant, no per-tenant
            //    membership rows required.
            let role = match self
                .directory
                .membership_role(principal.user_id, org.id)
                .await?
            {
                Some(role) => role,
                None if meets_platform_role(
                    principal.platform_role,
                    Some(PlatformRole::Superadmin),
                ) =>
                {
                    debug!(user_id = %principal.user_id, org = %org.slug, "superadmin bypass");
                    OrgRole::OrgAdmin
                }
                None => {
                    return Err(AuthError::Forbidden {
                        reason: format!("no membership in organization {}", org.slug),
                    }
                    .into());
                }
            };
            return finish(
                OrgContext {
                    user_id: principal.user_id,
                    email: principal.email,
                    organization_id: Some(org.id),
                    role: Some(role),
                },
                required_role,
            );
        }

        // 5. No resolvable tenant. Optionally fall back to the
        //    principal's first membership — a single-tenant/dev
        //    convenience that stays behind an explicit flag.
        if hint.slug.is_none() && self.first_membership_fallback {
            if let Some(membership) = self.directory.first_membership(principal.user_id).await? {
                return finish(
                    OrgContext {
                        user_id: principal.user_id,
                        email: principal.email,
                        organization_id: Some(membership.organization_id),
                        role: Some(membership.role),
                    },
                    required_role,
                );
            }
        }

        // 6. Tenant-less context: identity only.
        finish(
            OrgContext {
                user_id: principal.user_id,
                email: principal.email,
                organization_id: None,
                role: None,
            },
            required_role,
        )
    }
}

/// Apply the caller's role requirement to a built context.
fn finish(context: OrgContext, required_role: Option<OrgRole>) -> AniviseResult<OrgContext> {
    if meets_org_role(context.role, required_role) {
        Ok(context)
    } else {
        Err(AuthError::Forbidden {
            reason: format!("requires org role {required_role:?}"),
        }
        .into())
    }
}
