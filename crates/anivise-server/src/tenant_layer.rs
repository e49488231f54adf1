//! Tenant-hint middleware.
//!
//! Resolves the tenant slug from the Host header (or the dev
//! overrides) on every request, stores the [`TenantHint`] in request
//! extensions, and rewrites the internal headers downstream code
//! reads. Incoming values of those headers are always stripped first:
//! across the production trust boundary they are not client-settable,
//! only this layer writes them.

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use percent_encoding::percent_decode_str;

use anivise_auth::tenant::{TenantOverrides, resolve_tenant};
use anivise_core::repository::{
    AuditSink, Directory, DossierJobRepository, IdentityProvider, Notifier,
};
use anivise_core::secrets::SecretProvider;

use crate::state::AppState;

/// Internal header carrying the resolved tenant slug.
pub const ORG_SLUG_HEADER: &str = "x-organization-slug";
/// Internal marker header for the reserved admin console subdomain.
pub const ADMIN_SUBDOMAIN_HEADER: &str = "x-is-admin-subdomain";
/// Dev-only query parameter overriding the tenant slug.
pub const ORG_QUERY_PARAM: &str = "org";

pub async fn attach_tenant_hint<I, D, J, P, N, A>(
    State(state): State<AppState<I, D, J, P, N, A>>,
    mut req: Request,
    next: Next,
) -> Response
where
    I: IdentityProvider + Clone,
    D: Directory + Clone,
    J: DossierJobRepository + Clone,
    P: SecretProvider,
    N: Notifier + Clone,
    A: AuditSink + Clone,
{
    let host = req
        .headers()
        .get(http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let header_override = req
        .headers()
        .get(ORG_SLUG_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let query_override = req
        .uri()
        .query()
        .and_then(|q| query_param(q, ORG_QUERY_PARAM));

    let hint = resolve_tenant(
        &host,
        &state.config.base_domain,
        TenantOverrides {
            header: header_override.as_deref(),
            query: query_override.as_deref(),
        },
    );

    let headers = req.headers_mut();
    headers.remove(ORG_SLUG_HEADER);
    headers.remove(ADMIN_SUBDOMAIN_HEADER);
    if let Some(slug) = &hint.slug
        && let Ok(value) = HeaderValue::from_str(slug)
    {
        headers.insert(ORG_SLUG_HEADER, value);
    }
    if hint.is_admin_console {
        headers.insert(ADMIN_SUBDOMAIN_HEADER, HeaderValue::from_static("true"));
    }
    req.extensions_mut().insert(hint);

    next.run(req).await
}

fn query_param(query: &str, name: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k != name {
            return None;
        }
        let decoded = percent_decode_str(v).decode_utf8().ok()?;
        (!decoded.is_empty()).then(|| decoded.into_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_param_extraction() {
        assert_eq!(query_param("org=acme&x=1", "org").as_deref(), Some("acme"));
        assert_eq!(query_param("x=1", "org"), None);
        assert_eq!(query_param("org=", "org"), None);
    }

    #[test]
    fn query_param_is_percent_decoded() {
        assert_eq!(
            query_param("org=acme%2Dco", "org").as_deref(),
            Some("acme-co")
        );
        assert_eq!(query_param("org=%20", "org").as_deref(), Some(" "));
        // Invalid UTF-8 after decoding is treated as absent.
        assert_eq!(query_param("org=%ff", "org"), None);
    }
}
