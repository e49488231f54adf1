//! Impersonation session payload.
//!
//! The decoded contents of the signed impersonation credential. The
//! server holds no session table for these: the signed token in the
//! client's cookie is the entire state, and expiry bounds the blast
//! radius of a leaked credential.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::role::OrgRole;

/// Maximum age of an impersonation session, in milliseconds (2 hours).
pub const IMPERSONATION_MAX_AGE_MS: i64 = 2 * 60 * 60 * 1000;

/// "Principal X is acting as organization Y with role Z starting at
/// time T."
///
/// Field names are camelCase on the wire — this struct is serialized
/// verbatim into the cookie payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpersonationSession {
    pub org_id: Uuid,
    pub org_name: String,
    /// The role the impersonator presents as inside the tenant.
    pub role: OrgRole,
    /// Epoch milliseconds at which the impersonation was started.
    pub started_at: i64,
}

impl ImpersonationSession {
    /// Whether the session is still inside its age window at `now_ms`.
    pub fn is_active_at(&self, now_ms: i64) -> bool {
        now_ms - self.started_at <= IMPERSONATION_MAX_AGE_MS
    }
}
