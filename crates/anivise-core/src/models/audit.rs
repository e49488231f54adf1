//! Audit event domain model.
//!
//! The core only emits events; persistence belongs to the external
//! audit backend behind [`crate::repository::AuditSink`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    ImpersonationStarted,
    ImpersonationEnded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub actor_id: Uuid,
    pub actor_email: String,
    pub action: AuditAction,
    pub organization_id: Option<Uuid>,
    pub metadata: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(
        actor_id: Uuid,
        actor_email: impl Into<String>,
        action: AuditAction,
        organization_id: Option<Uuid>,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            actor_id,
            actor_email: actor_email.into(),
            action,
            organization_id,
            metadata,
            timestamp: Utc::now(),
        }
    }
}
