//! Anivise Auth — tenant resolution, impersonation credential
//! signing/verification, per-request authorization context, and
//! automation-webhook authentication.

pub mod config;
pub mod context;
pub mod error;
pub mod impersonation;
pub mod tenant;
pub mod webhook;

pub use config::AuthConfig;
pub use context::OrgContextResolver;
pub use error::AuthError;
pub use impersonation::ImpersonationCodec;
pub use tenant::{TenantOverrides, resolve_tenant};
pub use webhook::WebhookAuthenticator;
