//! The authenticated actor behind a request.
//!
//! Initial login authentication is delegated to the external identity
//! provider; this type is what its session lookup hands back.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::role::PlatformRole;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    /// Platform-wide privilege, independent of tenant membership.
    pub platform_role: PlatformRole,
}
