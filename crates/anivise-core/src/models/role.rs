//! Role hierarchy.
//!
//! Two independent orderings: a platform-wide role attached to a user
//! account, and an organization-scoped role attached to one
//! (user, organization) membership. Both rank tables are exhaustive
//! matches, so adding an enum variant without ranking it is a compile
//! error rather than a runtime surprise.

use serde::{Deserialize, Serialize};

/// Privilege level global to the whole deployment, independent of any
/// tenant membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformRole {
    None,
    Staff,
    Superadmin,
}

/// Privilege level scoped to one tenant membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgRole {
    Member,
    Manager,
    OrgAdmin,
}

impl PlatformRole {
    pub fn rank(self) -> u8 {
        match self {
            PlatformRole::None => 0,
            PlatformRole::Staff => 1,
            PlatformRole::Superadmin => 2,
        }
    }
}

impl OrgRole {
    pub fn rank(self) -> u8 {
        match self {
            OrgRole::Member => 0,
            OrgRole::Manager => 1,
            OrgRole::OrgAdmin => 2,
        }
    }
}

/// True iff `actual` satisfies `required`.
///
/// An absent `required` means any authenticated member is sufficient.
/// An absent `actual` (no role in the current tenant) fails every
/// present requirement.
pub fn meets_org_role(actual: Option<OrgRole>, required: Option<OrgRole>) -> bool {
    match required {
        None => true,
        Some(req) => actual.is_some_and(|a| a.rank() >= req.rank()),
    }
}

/// Same pattern for platform roles. `PlatformRole::None` fails any
/// non-trivial requirement.
pub fn meets_platform_role(actual: PlatformRole, required: Option<PlatformRole>) -> bool {
    match required {
        None => true,
        Some(req) => actual.rank() >= req.rank(),
    }
}
