//! Trust-boundary error types.

use anivise_core::error::AniviseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no authenticated principal")]
    Unauthenticated,

    #[error("insufficient role: {reason}")]
    Forbidden { reason: String },

    #[error("impersonation signing secret is not configured")]
    MissingImpersonationSecret,

    #[error("webhook authentication failed")]
    WebhookUnauthorized,

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for AniviseError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated => AniviseError::Unauthenticated,
            AuthError::Forbidden { reason } => AniviseError::Forbidden { reason },
            AuthError::MissingImpersonationSecret => {
                AniviseError::Config("impersonation signing secret is not configured".into())
            }
            AuthError::WebhookUnauthorized => AniviseError::WebhookUnauthorized,
            AuthError::Crypto(msg) => AniviseError::Crypto(msg),
        }
    }
}
