//! Named-secret provider abstraction.
//!
//! Webhook authentication material is looked up per automation system
//! so tenants can rotate secrets without a redeploy. Implementations
//! are expected to cache with a short TTL; a rotation must be observed
//! within that TTL.

use crate::error::AniviseResult;

/// Key for one named secret.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SecretName {
    /// The shared secret an automation system must present.
    WebhookSecret { system: String },
    /// The header name that system presents its secret under.
    WebhookHeaderName { system: String },
}

impl SecretName {
    pub fn webhook_secret(system: impl Into<String>) -> Self {
        SecretName::WebhookSecret {
            system: system.into(),
        }
    }

    pub fn webhook_header_name(system: impl Into<String>) -> Self {
        SecretName::WebhookHeaderName {
            system: system.into(),
        }
    }
}

/// Supplies current values for named secrets.
///
/// `Ok(None)` means the secret is not configured (callers fall back to
/// their static defaults); `Err` is an infrastructure fault and must
/// not be treated as "unset".
pub trait SecretProvider: Send + Sync {
    fn get(&self, name: &SecretName) -> impl Future<Output = AniviseResult<Option<String>>> + Send;
}
