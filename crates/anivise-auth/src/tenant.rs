//! Tenant resolution from network signals.
//!
//! Maps a request's hostname (plus optional dev overrides) to a tenant
//! slug. Pure string work, no I/O, no error conditions: a malformed
//! host resolves to "no tenant", because plenty of routes (marketing
//! pages, admin console) are tenant-less by design.

use anivise_core::models::context::TenantHint;

/// Reserved subdomain for the administrative console; never a tenant.
pub const ADMIN_SLUG: &str = "admin";

/// Explicit tenant override signals, consulted only when the base
/// domain is a loopback address (no real subdomain routing, i.e.
/// local/dev). Header wins over query param.
#[derive(Debug, Clone, Copy, Default)]
pub struct TenantOverrides<'a> {
    pub header: Option<&'a str>,
    pub query: Option<&'a str>,
}

/// Resolve the tenant slug for a request.
///
/// Ports are stripped from both the hostname and the base domain. With
/// a loopback base domain, subdomain parsing is disabled entirely and
/// only the overrides are consulted. Otherwise the slug is the
/// non-empty prefix of `host == slug + "." + base_domain`; `host ==
/// base_domain` and everything unparseable resolve to no tenant.
pub fn resolve_tenant(host: &str, base_domain: &str, overrides: TenantOverrides) -> TenantHint {
    let base = strip_port(base_domain).to_ascii_lowercase();

    if is_loopback(&base) {
        let slug = overrides
            .header
            .or(overrides.query)
            .map(str::trim)
            .filter(|s| !s.is_empty());
        return hint_from_slug(slug);
    }

    let host = strip_port(host).to_ascii_lowercase();
    if host == base {
        return TenantHint::none();
    }

    match host.strip_suffix(&base).and_then(|p| p.strip_suffix('.')) {
        Some(sub) if !sub.is_empty() => hint_from_slug(Some(sub)),
        _ => TenantHint::none(),
    }
}

fn hint_from_slug(slug: Option<&str>) -> TenantHint {
    let Some(slug) = slug else {
        return TenantHint::none();
    };
    let slug = slug.to_ascii_lowercase();
    if slug == ADMIN_SLUG {
        return TenantHint {
            slug: None,
            is_admin_console: true,
        };
    }
    // No charset validation: an odd prefix (e.g. from a double-dot
    // host) simply never matches any organization slug downstream.
    TenantHint {
        slug: Some(slug),
        is_admin_console: false,
    }
}

/// Drop a trailing `:port`, leaving bare IPv6 literals intact.
fn strip_port(host: &str) -> &str {
    let host = host.trim();
    match host.rsplit_once(':') {
        Some((name, port))
            if !name.is_empty()
                && !name.contains(':')
                && !port.is_empty()
                && port.bytes().all(|b| b.is_ascii_digit()) =>
        {
            name
        }
        _ => host,
    }
}

fn is_loopback(base: &str) -> bool {
    matches!(base, "localhost" | "127.0.0.1" | "::1" | "[::1]")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "app.anivise.com";

    fn no_overrides() -> TenantOverrides<'static> {
        TenantOverrides::default()
    }

    #[test]
    fn subdomain_resolves_to_slug() {
        let hint = resolve_tenant("acme.app.anivise.com", BASE, no_overrides());
        assert_eq!(hint.slug.as_deref(), Some("acme"));
        assert!(!hint.is_admin_console);
    }

    #[test]
    fn bare_base_domain_has_no_tenant() {
        let hint = resolve_tenant("app.anivise.com", BASE, no_overrides());
        assert_eq!(hint, TenantHint::none());
    }

    #[test]
    fn ports_are_stripped_from_both_sides() {
        let hint = resolve_tenant("acme.app.anivise.com:8443", "app.anivise.com:443", no_overrides());
        assert_eq!(hint.slug.as_deref(), Some("acme"));
    }

    #[test]
    fn hostname_is_case_insensitive() {
        let hint = resolve_tenant("Acme.App.Anivise.Com", BASE, no_overrides());
        assert_eq!(hint.slug.as_deref(), Some("acme"));
    }

    #[test]
    fn admin_subdomain_is_console_not_tenant() {
        let hint = resolve_tenant("admin.app.anivise.com", BASE, no_overrides());
        assert_eq!(hint.slug, None);
        assert!(hint.is_admin_console);
    }

    #[test]
    fn unrelated_host_has_no_tenant() {
        assert_eq!(resolve_tenant("evil.com", BASE, no_overrides()), TenantHint::none());
        assert_eq!(
            resolve_tenant("anivise.com", BASE, no_overrides()),
            TenantHint::none()
        );
    }

    #[test]
    fn malformed_hosts_resolve_safely() {
        // Empty prefix: no tenant.
        assert_eq!(
            resolve_tenant(".app.anivise.com", BASE, no_overrides()),
            TenantHint::none()
        );
        assert_eq!(resolve_tenant("", BASE, no_overrides()), TenantHint::none());
        // Suffix match without a dot boundary is not a subdomain.
        assert_eq!(
            resolve_tenant("evilapp.anivise.com", BASE, no_overrides()),
            TenantHint::none()
        );
        // Double-dot hosts yield a prefix no organization can own.
        assert_eq!(
            resolve_tenant("acme..app.anivise.com", BASE, no_overrides())
                .slug
                .as_deref(),
            Some("acme.")
        );
    }

    #[test]
    fn nested_prefix_is_returned_verbatim() {
        assert_eq!(
            resolve_tenant("a.b.app.anivise.com", BASE, no_overrides())
                .slug
                .as_deref(),
            Some("a.b")
        );
    }

    #[test]
    fn loopback_base_disables_subdomain_parsing() {
        let hint = resolve_tenant("acme.localhost", "localhost:3000", no_overrides());
        assert_eq!(hint, TenantHint::none());
    }

    #[test]
    fn loopback_base_consults_overrides_header_first() {
        let hint = resolve_tenant(
            "localhost:3000",
            "localhost:3000",
            TenantOverrides {
                header: Some("acme"),
                query: Some("beta"),
            },
        );
        assert_eq!(hint.slug.as_deref(), Some("acme"));

        let hint = resolve_tenant(
            "localhost:3000",
            "localhost:3000",
            TenantOverrides {
                header: None,
                query: Some("beta"),
            },
        );
        assert_eq!(hint.slug.as_deref(), Some("beta"));
    }

    #[test]
    fn overrides_are_ignored_outside_loopback() {
        let hint = resolve_tenant(
            "app.anivise.com",
            BASE,
            TenantOverrides {
                header: Some("acme"),
                query: None,
            },
        );
        assert_eq!(hint, TenantHint::none());
    }

    #[test]
    fn admin_override_flags_console() {
        let hint = resolve_tenant(
            "localhost",
            "localhost",
            TenantOverrides {
                header: Some("admin"),
                query: None,
            },
        );
        assert!(hint.is_admin_console);
        assert_eq!(hint.slug, None);
    }

    #[test]
    fn ipv6_base_is_loopback() {
        let hint = resolve_tenant("[::1]:3000", "[::1]:3000", no_overrides());
        assert_eq!(hint, TenantHint::none());
    }
}
