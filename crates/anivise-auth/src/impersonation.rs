//! Impersonation credential codec.
//!
//! Token format: `base64(payload JSON) + "." + hex(HMAC-SHA256)`, the
//! signature computed over the exact payload bytes. Verification is
//! constant-time and every malformed, tampered, or expired token
//! collapses into the same "no session" answer — the codec never
//! tells a caller (or an attacker) which check failed.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use anivise_core::models::impersonation::ImpersonationSession;

use crate::config::AuthConfig;
use crate::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies impersonation credentials.
///
/// Holds no session table: the signed token is the entire server-side
/// state, so revocation before natural expiry happens by discarding
/// the stored cookie, not by invalidating the token itself.
pub struct ImpersonationCodec {
    key: Vec<u8>,
}

impl ImpersonationCodec {
    /// Build a codec from configuration.
    ///
    /// Fails when the signing secret is absent or empty. There is no
    /// fallback key.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        match config.impersonation_secret.as_deref() {
            Some(secret) if !secret.is_empty() => Ok(Self {
                key: secret.as_bytes().to_vec(),
            }),
            _ => Err(AuthError::MissingImpersonationSecret),
        }
    }

    /// Hex HMAC-SHA256 signature over `payload`.
    pub fn sign(&self, payload: &[u8]) -> Result<String, AuthError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| AuthError::Crypto(format!("HMAC key: {e}")))?;
        mac.update(payload);
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Serialize and sign a session into the compact token form.
    pub fn encode(&self, session: &ImpersonationSession) -> Result<String, AuthError> {
        let payload = serde_json::to_vec(session)
            .map_err(|e| AuthError::Crypto(format!("session serialize: {e}")))?;
        let signature = self.sign(&payload)?;
        Ok(format!("{}.{}", STANDARD.encode(&payload), signature))
    }

    /// Parse and verify a token against the current clock.
    ///
    /// Returns `None` for anything that is not a correctly signed,
    /// unexpired session.
    pub fn decode(&self, token: &str) -> Option<ImpersonationSession> {
        self.decode_at(token, Utc::now())
    }

    /// Like [`decode`](Self::decode), with expiry evaluated against
    /// the supplied instant.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Option<ImpersonationSession> {
        let (payload_b64, signature_hex) = token.split_once('.')?;
        let payload = STANDARD.decode(payload_b64).ok()?;
        let signature = hex::decode(signature_hex).ok()?;

        // verify_slice is constant-time and treats a length mismatch
        // as an ordinary failure rather than a panic.
        let mut mac = HmacSha256::new_from_slice(&self.key).ok()?;
        mac.update(&payload);
        mac.verify_slice(&signature).ok()?;

        let session: ImpersonationSession = serde_json::from_slice(&payload).ok()?;
        if !session.is_active_at(now.timestamp_millis()) {
            return None;
        }
        Some(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anivise_core::models::impersonation::IMPERSONATION_MAX_AGE_MS;
    use anivise_core::models::role::OrgRole;
    use uuid::Uuid;

    fn test_codec() -> ImpersonationCodec {
        ImpersonationCodec::new(&AuthConfig {
            impersonation_secret: Some("test-impersonation-secret".into()),
            ..AuthConfig::default()
        })
        .unwrap()
    }

    fn session_started_at(started_at: i64) -> ImpersonationSession {
        ImpersonationSession {
            org_id: Uuid::new_v4(),
            org_name: "Acme Corp".into(),
            role: OrgRole::Manager,
            started_at,
        }
    }

    #[test]
    fn missing_secret_refuses_to_construct() {
        assert!(matches!(
            ImpersonationCodec::new(&AuthConfig::default()),
            Err(AuthError::MissingImpersonationSecret)
        ));
        assert!(matches!(
            ImpersonationCodec::new(&AuthConfig {
                impersonation_secret: Some(String::new()),
                ..AuthConfig::default()
            }),
            Err(AuthError::MissingImpersonationSecret)
        ));
    }

    #[test]
    fn round_trip() {
        let codec = test_codec();
        let session = session_started_at(Utc::now().timestamp_millis());
        let token = codec.encode(&session).unwrap();
        assert_eq!(codec.decode(&token), Some(session));
    }

    #[test]
    fn flipping_any_signature_bit_invalidates() {
        let codec = test_codec();
        let session = session_started_at(Utc::now().timestamp_millis());
        let token = codec.encode(&session).unwrap();

        let dot = token.find('.').unwrap();
        for i in dot + 1..token.len() {
            let mut bytes = token.as_bytes().to_vec();
            bytes[i] ^= 0x01;
            let tampered = String::from_utf8(bytes).unwrap();
            assert_eq!(codec.decode(&tampered), None, "bit flip at {i} survived");
        }
    }

    #[test]
    fn tampered_payload_invalidates() {
        let codec = test_codec();
        let session = session_started_at(Utc::now().timestamp_millis());
        let token = codec.encode(&session).unwrap();

        let mut bytes = token.as_bytes().to_vec();
        bytes[0] ^= 0x01;
        let tampered = String::from_utf8(bytes).unwrap();
        assert_eq!(codec.decode(&tampered), None);
    }

    #[test]
    fn expiry_boundary() {
        let codec = test_codec();
        let now = Utc::now();
        let now_ms = now.timestamp_millis();

        let just_expired = session_started_at(now_ms - IMPERSONATION_MAX_AGE_MS - 1);
        let token = codec.encode(&just_expired).unwrap();
        assert_eq!(codec.decode_at(&token, now), None);

        let just_inside = session_started_at(now_ms - IMPERSONATION_MAX_AGE_MS + 1);
        let token = codec.encode(&just_inside).unwrap();
        assert_eq!(codec.decode_at(&token, now), Some(just_inside));
    }

    #[test]
    fn malformed_tokens_are_absent_not_errors() {
        let codec = test_codec();
        for token in [
            "",
            ".",
            "no-separator",
            "not-base64!!.deadbeef",
            "aGVsbG8=.nothex",
            "aGVsbG8=.dead", // wrong signature length
        ] {
            assert_eq!(codec.decode(token), None, "token {token:?}");
        }
        // Valid base64, valid signature over non-JSON payload.
        let payload = b"not json";
        let sig = codec.sign(payload).unwrap();
        let token = format!("{}.{}", STANDARD.encode(payload), sig);
        assert_eq!(codec.decode(&token), None);
    }

    #[test]
    fn different_secrets_do_not_cross_verify() {
        let a = test_codec();
        let b = ImpersonationCodec::new(&AuthConfig {
            impersonation_secret: Some("another-secret".into()),
            ..AuthConfig::default()
        })
        .unwrap();
        let token = a
            .encode(&session_started_at(Utc::now().timestamp_millis()))
            .unwrap();
        assert_eq!(b.decode(&token), None);
    }
}
