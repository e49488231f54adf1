//! Notification domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    DossierCompleted,
    DossierFailed,
}

/// A user-facing notification about an asynchronous job. Delivery is
/// the [`crate::repository::Notifier`] implementation's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub organization_id: Uuid,
    pub job_id: Uuid,
    pub message: String,
}
