//! In-memory backends for the core traits.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use anivise_core::error::{AniviseError, AniviseResult};
use anivise_core::models::audit::AuditEvent;
use anivise_core::models::dossier::{DossierJob, JobResultUpdate, JobStatus};
use anivise_core::models::membership::Membership;
use anivise_core::models::notification::Notification;
use anivise_core::models::organization::{CreateOrganization, Organization};
use anivise_core::models::principal::Principal;
use anivise_core::models::role::OrgRole;
use anivise_core::repository::{
    AuditSink, Directory, DossierJobRepository, IdentityProvider, Notifier,
};

#[derive(Default)]
struct DirectoryData {
    organizations: Vec<Organization>,
    memberships: Vec<Membership>,
}

/// Organization and membership directory held in process memory.
#[derive(Clone, Default)]
pub struct MemoryDirectory {
    data: Arc<RwLock<DirectoryData>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_organization(&self, input: CreateOrganization) -> Organization {
        let now = Utc::now();
        let org = Organization {
            id: Uuid::new_v4(),
            name: input.name,
            slug: input.slug,
            metadata: input
                .metadata
                .unwrap_or(serde_json::Value::Object(Default::default())),
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        self.data.write().await.organizations.push(org.clone());
        org
    }

    pub async fn add_membership(&self, user_id: Uuid, organization_id: Uuid, role: OrgRole) {
        self.data.write().await.memberships.push(Membership {
            user_id,
            organization_id,
            role,
            created_at: Utc::now(),
        });
    }

    pub async fn soft_delete_organization(&self, id: Uuid) {
        let mut data = self.data.write().await;
        if let Some(org) = data.organizations.iter_mut().find(|o| o.id == id) {
            org.deleted_at = Some(Utc::now());
        }
    }
}

impl Directory for MemoryDirectory {
    async fn org_by_slug(&self, slug: &str) -> AniviseResult<Option<Organization>> {
        let data = self.data.read().await;
        Ok(data
            .organizations
            .iter()
            .find(|o| o.slug == slug && o.deleted_at.is_none())
            .cloned())
    }

    async fn membership_role(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> AniviseResult<Option<OrgRole>> {
        let data = self.data.read().await;
        Ok(data
            .memberships
            .iter()
            .find(|m| m.user_id == user_id && m.organization_id == organization_id)
            .map(|m| m.role))
    }

    async fn first_membership(&self, user_id: Uuid) -> AniviseResult<Option<Membership>> {
        let data = self.data.read().await;
        Ok(data
            .memberships
            .iter()
            .find(|m| m.user_id == user_id)
            .cloned())
    }
}

/// Session-token to principal map standing in for the external
/// identity provider.
#[derive(Clone, Default)]
pub struct MemoryIdentityProvider {
    tokens: Arc<RwLock<HashMap<String, Principal>>>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, token: impl Into<String>, principal: Principal) {
        self.tokens.write().await.insert(token.into(), principal);
    }
}

impl IdentityProvider for MemoryIdentityProvider {
    async fn principal_for_token(&self, token: &str) -> AniviseResult<Option<Principal>> {
        Ok(self.tokens.read().await.get(token).cloned())
    }
}

/// Dossier-job store held in process memory.
#[derive(Clone, Default)]
pub struct MemoryJobStore {
    jobs: Arc<RwLock<HashMap<Uuid, DossierJob>>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, organization_id: Uuid, requested_by: Uuid) -> DossierJob {
        let now = Utc::now();
        let job = DossierJob {
            id: Uuid::new_v4(),
            organization_id,
            requested_by,
            status: JobStatus::Running,
            result_data: None,
            error_message: None,
            created_at: now,
            updated_at: now,
        };
        self.jobs.write().await.insert(job.id, job.clone());
        job
    }
}

impl DossierJobRepository for MemoryJobStore {
    async fn get(&self, id: Uuid) -> AniviseResult<Option<DossierJob>> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn record_result(&self, id: Uuid, update: JobResultUpdate) -> AniviseResult<DossierJob> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(&id).ok_or_else(|| AniviseError::NotFound {
            entity: "dossier_job".into(),
            id: id.to_string(),
        })?;
        job.status = update.status;
        job.result_data = update.result_data;
        job.error_message = update.error_message;
        job.updated_at = Utc::now();
        Ok(job.clone())
    }
}

/// Audit sink that retains events for inspection.
#[derive(Clone, Default)]
pub struct MemoryAuditSink {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().await.clone()
    }
}

impl AuditSink for MemoryAuditSink {
    async fn record(&self, event: AuditEvent) -> AniviseResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

/// Notifier that records deliveries instead of sending them, so tests
/// can assert exact fan-out counts.
#[derive(Clone, Default)]
pub struct MemoryNotifier {
    direct: Arc<Mutex<Vec<(Uuid, Notification)>>>,
    broadcasts: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn direct_deliveries(&self) -> Vec<(Uuid, Notification)> {
        self.direct.lock().await.clone()
    }

    pub async fn superadmin_broadcasts(&self) -> Vec<Notification> {
        self.broadcasts.lock().await.clone()
    }
}

impl Notifier for MemoryNotifier {
    async fn notify_user(&self, user_id: Uuid, notification: Notification) -> AniviseResult<()> {
        self.direct.lock().await.push((user_id, notification));
        Ok(())
    }

    async fn broadcast_superadmins(&self, notification: Notification) -> AniviseResult<()> {
        self.broadcasts.lock().await.push(notification);
        Ok(())
    }
}
