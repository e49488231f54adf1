//! Organization (tenant) domain model.
//!
//! Organizations are addressed by a URL-safe slug carried in the
//! request's subdomain. Soft-deleted organizations are never returned
//! by directory lookups, which is what keeps the resolved
//! `organization_id` pointing at a real, live tenant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One customer organization in the multi-tenant deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// URL-safe unique identifier (e.g., `acme`), used as the
    /// subdomain.
    pub slug: String,
    /// Arbitrary key-value metadata.
    pub metadata: serde_json::Value,
    /// Soft-deletion marker; deleted organizations are invisible to
    /// slug resolution.
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub slug: String,
    pub metadata: Option<serde_json::Value>,
}
