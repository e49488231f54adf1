//! Automation-callback authentication.
//!
//! A trust boundary entirely separate from interactive sessions: the
//! workflow engine proves itself with a shared secret header, checked
//! before any of the request body is parsed.

use http::HeaderMap;
use subtle::ConstantTimeEq;
use tracing::warn;

use anivise_core::error::AniviseResult;
use anivise_core::models::dossier::WebhookIdentity;
use anivise_core::secrets::{SecretName, SecretProvider};

use crate::error::AuthError;

/// Default header an automation system presents its secret under,
/// when no per-system header name is configured.
pub const DEFAULT_WEBHOOK_HEADER: &str = "x-anivise-secret";

/// Fixed header name kept for the one legacy n8n callback endpoint.
pub const LEGACY_N8N_HEADER: &str = "x-n8n-secret";

/// Validates inbound callbacks against the secret provider, with a
/// static environment-configured secret as the rotation safety net.
pub struct WebhookAuthenticator<P: SecretProvider> {
    secrets: P,
    fallback_secret: Option<String>,
}

impl<P: SecretProvider> WebhookAuthenticator<P> {
    pub fn new(secrets: P, fallback_secret: Option<String>) -> Self {
        Self {
            secrets,
            fallback_secret,
        }
    }

    /// Authenticate a callback from `system`, resolving the header
    /// name dynamically (falling back to
    /// [`DEFAULT_WEBHOOK_HEADER`]).
    pub async fn authenticate(
        &self,
        system: &str,
        headers: &HeaderMap,
    ) -> AniviseResult<WebhookIdentity> {
        let header_name = self
            .secrets
            .get(&SecretName::webhook_header_name(system))
            .await?
            .unwrap_or_else(|| DEFAULT_WEBHOOK_HEADER.to_string());
        self.authenticate_with_header(system, &header_name, headers)
            .await
    }

    /// Authenticate against an explicitly named header (legacy
    /// endpoints pin their header name instead of resolving it).
    ///
    /// The expected secret is the dynamic per-system value when set,
    /// else the static fallback. Rejection carries no detail about
    /// which part of the check failed.
    pub async fn authenticate_with_header(
        &self,
        system: &str,
        header_name: &str,
        headers: &HeaderMap,
    ) -> AniviseResult<WebhookIdentity> {
        let expected = match self
            .secrets
            .get(&SecretName::webhook_secret(system))
            .await?
        {
            Some(secret) => Some(secret),
            None => self.fallback_secret.clone(),
        };

        let Some(expected) = expected else {
            // No secret configured anywhere: fail closed.
            warn!(system, "no webhook secret configured, rejecting callback");
            return Err(AuthError::WebhookUnauthorized.into());
        };

        let presented = headers.get(header_name).and_then(|v| v.to_str().ok());
        let authentic = presented
            .map(|p| bool::from(p.as_bytes().ct_eq(expected.as_bytes())))
            .unwrap_or(false);

        if authentic {
            Ok(WebhookIdentity {
                system: system.to_string(),
            })
        } else {
            warn!(system, "webhook authentication failed");
            Err(AuthError::WebhookUnauthorized.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anivise_core::error::AniviseError;
    use std::collections::HashMap;

    /// Provider over a fixed map; `Err` simulates a backend fault.
    struct MapSecrets {
        values: HashMap<SecretName, String>,
        fail: bool,
    }

    impl MapSecrets {
        fn new(values: impl IntoIterator<Item = (SecretName, &'static str)>) -> Self {
            Self {
                values: values
                    .into_iter()
                    .map(|(k, v)| (k, v.to_string()))
                    .collect(),
                fail: false,
            }
        }
    }

    impl SecretProvider for MapSecrets {
        async fn get(&self, name: &SecretName) -> AniviseResult<Option<String>> {
            if self.fail {
                return Err(AniviseError::Lookup("secret backend unreachable".into()));
            }
            Ok(self.values.get(name).cloned())
        }
    }

    fn headers(name: &str, value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            http::HeaderName::try_from(name).unwrap(),
            http::HeaderValue::try_from(value).unwrap(),
        );
        map
    }

    #[tokio::test]
    async fn accepts_dynamic_secret_under_default_header() {
        let auth = WebhookAuthenticator::new(
            MapSecrets::new([(SecretName::webhook_secret("n8n"), "s3cret")]),
            None,
        );
        let identity = auth
            .authenticate("n8n", &headers(DEFAULT_WEBHOOK_HEADER, "s3cret"))
            .await
            .unwrap();
        assert_eq!(identity.system, "n8n");
    }

    #[tokio::test]
    async fn wrong_secret_is_unauthorized() {
        let auth = WebhookAuthenticator::new(
            MapSecrets::new([(SecretName::webhook_secret("n8n"), "s3cret")]),
            None,
        );
        let err = auth
            .authenticate("n8n", &headers(DEFAULT_WEBHOOK_HEADER, "wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, AniviseError::WebhookUnauthorized));
    }

    #[tokio::test]
    async fn missing_header_is_indistinguishable_from_wrong_secret() {
        let auth = WebhookAuthenticator::new(
            MapSecrets::new([(SecretName::webhook_secret("n8n"), "s3cret")]),
            None,
        );
        let err = auth.authenticate("n8n", &HeaderMap::new()).await.unwrap_err();
        assert!(matches!(err, AniviseError::WebhookUnauthorized));
    }

    #[tokio::test]
    async fn dynamic_header_name_overrides_default() {
        let auth = WebhookAuthenticator::new(
            MapSecrets::new([
                (SecretName::webhook_secret("n8n"), "s3cret"),
                (SecretName::webhook_header_name("n8n"), "x-acme-callback-key"),
            ]),
            None,
        );
        assert!(
            auth.authenticate("n8n", &headers("x-acme-callback-key", "s3cret"))
                .await
                .is_ok()
        );
        // The default header is no longer honored once a dynamic name
        // is configured.
        assert!(
            auth.authenticate("n8n", &headers(DEFAULT_WEBHOOK_HEADER, "s3cret"))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn static_fallback_applies_when_dynamic_secret_unset() {
        let auth = WebhookAuthenticator::new(MapSecrets::new([]), Some("env-secret".into()));
        assert!(
            auth.authenticate("n8n", &headers(DEFAULT_WEBHOOK_HEADER, "env-secret"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn dynamic_secret_takes_precedence_over_fallback() {
        let auth = WebhookAuthenticator::new(
            MapSecrets::new([(SecretName::webhook_secret("n8n"), "rotated")]),
            Some("env-secret".into()),
        );
        assert!(
            auth.authenticate("n8n", &headers(DEFAULT_WEBHOOK_HEADER, "rotated"))
                .await
                .is_ok()
        );
        assert!(
            auth.authenticate("n8n", &headers(DEFAULT_WEBHOOK_HEADER, "env-secret"))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn no_secret_configured_fails_closed() {
        let auth = WebhookAuthenticator::<MapSecrets>::new(MapSecrets::new([]), None);
        let err = auth
            .authenticate("n8n", &headers(DEFAULT_WEBHOOK_HEADER, "anything"))
            .await
            .unwrap_err();
        assert!(matches!(err, AniviseError::WebhookUnauthorized));
    }

    #[tokio::test]
    async fn provider_fault_propagates_not_denies() {
        let mut secrets = MapSecrets::new([(SecretName::webhook_secret("n8n"), "s3cret")]);
        secrets.fail = true;
        let auth = WebhookAuthenticator::new(secrets, None);
        let err = auth
            .authenticate("n8n", &headers(DEFAULT_WEBHOOK_HEADER, "s3cret"))
            .await
            .unwrap_err();
        assert!(matches!(err, AniviseError::Lookup(_)));
    }

    #[tokio::test]
    async fn legacy_header_entry_point() {
        let auth = WebhookAuthenticator::new(MapSecrets::new([]), Some("legacy".into()));
        assert!(
            auth.authenticate_with_header("n8n", LEGACY_N8N_HEADER, &headers(LEGACY_N8N_HEADER, "legacy"))
                .await
                .is_ok()
        );
    }
}
