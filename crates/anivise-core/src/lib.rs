//! Anivise Core — domain models, error taxonomy, and the async lookup
//! traits the trust-boundary logic is generic over.

pub mod error;
pub mod models;
pub mod repository;
pub mod secrets;

pub use error::{AniviseError, AniviseResult};
