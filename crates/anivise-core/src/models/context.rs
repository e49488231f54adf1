//! Resolved per-request authorization context.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::role::OrgRole;

/// The (tenant, principal, role) triple every protected handler relies
/// on.
///
/// Constructed fresh on every request and never persisted. When
/// `organization_id` is present it refers to a real, non-deleted
/// organization; `role` is the *effective* role after the superadmin
/// bypass and impersonation are applied, not necessarily a stored
/// membership row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgContext {
    pub user_id: Uuid,
    pub email: String,
    pub organization_id: Option<Uuid>,
    pub role: Option<OrgRole>,
}

/// A tenant slug extracted from network signals.
///
/// Carries no guarantee the slug maps to a real organization —
/// resolution to an id happens downstream against the directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TenantHint {
    pub slug: Option<String>,
    /// Set when the reserved `admin` subdomain was requested; the
    /// administrative console is not a tenant.
    pub is_admin_console: bool,
}

impl TenantHint {
    pub fn none() -> Self {
        Self::default()
    }
}
