//! Membership domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::role::OrgRole;

/// One (user, organization) membership pair and the role it grants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: Uuid,
    pub organization_id: Uuid,
    pub role: OrgRole,
    pub created_at: DateTime<Utc>,
}
