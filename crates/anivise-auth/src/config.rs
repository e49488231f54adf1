//! Trust-boundary configuration.

/// Configuration for tenant resolution and the two trust artifacts.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 signing secret for impersonation credentials.
    ///
    /// There is deliberately no default: [`crate::ImpersonationCodec`]
    /// refuses to construct when this is absent or empty, because a
    /// silently-defaulted signing key would let anyone mint valid
    /// impersonation cookies.
    pub impersonation_secret: Option<String>,
    /// App base domain for subdomain tenant parsing (e.g.,
    /// `app.anivise.com`). A loopback value disables subdomain
    /// routing and enables the explicit dev overrides instead.
    pub base_domain: String,
    /// Static fallback webhook secret, used when no dynamic per-system
    /// secret is configured. Rotating the dynamic secret never
    /// requires a redeploy; this is the safety net.
    pub webhook_fallback_secret: Option<String>,
    /// Allow resolving the acting organization from the principal's
    /// first membership when no tenant slug is present. A
    /// single-tenant/dev convenience; leave off in production, where a
    /// user with several memberships would land in an arbitrary one.
    pub first_membership_fallback: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            impersonation_secret: None,
            base_domain: "localhost".into(),
            webhook_fallback_secret: None,
            first_membership_fallback: false,
        }
    }
}
