//! Error types for the Anivise system.
//!
//! Authorization failures (`Unauthenticated`, `Forbidden`) are kept
//! distinct so the HTTP layer can map them to 401 vs 403. Lookup I/O
//! faults stay a separate variant: the core never converts an
//! unreachable backend into a policy denial.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AniviseError {
    #[error("no authenticated principal")]
    Unauthenticated,

    #[error("authorization denied: {reason}")]
    Forbidden { reason: String },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("webhook authentication failed")]
    WebhookUnauthorized,

    #[error("webhook payload references a foreign resource: {entity} with id {id}")]
    WebhookResourceMismatch { entity: String, id: String },

    #[error("Lookup error: {0}")]
    Lookup(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AniviseResult<T> = Result<T, AniviseError>;
