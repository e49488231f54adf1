//! Impersonation cookie adapter.
//!
//! The only place in the codebase that touches transport-layer
//! cookies; the core codec deals purely in token strings.

use http::{HeaderMap, HeaderValue};

use anivise_core::error::{AniviseError, AniviseResult};
use anivise_core::models::impersonation::IMPERSONATION_MAX_AGE_MS;

pub const IMPERSONATION_COOKIE: &str = "impersonation";

fn parse_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie = headers.get(http::header::COOKIE)?;
    let s = cookie.to_str().ok()?;
    for part in s.split(';') {
        let p = part.trim();
        if let Some((k, v)) = p.split_once('=')
            && k == name
        {
            return Some(v.to_string());
        }
    }
    None
}

/// The raw impersonation token from the request, if any.
pub fn impersonation_token(headers: &HeaderMap) -> Option<String> {
    parse_cookie(headers, IMPERSONATION_COOKIE)
}

/// Build the Set-Cookie value storing an impersonation token:
/// `HttpOnly`, `SameSite=Lax`, `Max-Age` matching the session age
/// window, `Path=/`, plus `Secure` outside local dev.
pub fn set_impersonation_cookie(token: &str, secure: bool) -> AniviseResult<HeaderValue> {
    let max_age_secs = IMPERSONATION_MAX_AGE_MS / 1000;
    let secure_attr = if secure { "; Secure" } else { "" };
    HeaderValue::from_str(&format!(
        "{IMPERSONATION_COOKIE}={token}; HttpOnly{secure_attr}; SameSite=Lax; Max-Age={max_age_secs}; Path=/"
    ))
    .map_err(|e| AniviseError::Internal(format!("cookie value: {e}")))
}

/// Build the Set-Cookie value that discards the impersonation token.
pub fn clear_impersonation_cookie(secure: bool) -> AniviseResult<HeaderValue> {
    let secure_attr = if secure { "; Secure" } else { "" };
    HeaderValue::from_str(&format!(
        "{IMPERSONATION_COOKIE}=; HttpOnly{secure_attr}; SameSite=Lax; Max-Age=0; Path=/"
    ))
    .map_err(|e| AniviseError::Internal(format!("cookie value: {e}")))
}
