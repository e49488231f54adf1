//! Anivise Directory — in-memory implementations of the core lookup
//! traits, used by the dev server and by integration tests.
//!
//! The production relational backend lives outside this repository;
//! these implementations honor the same contracts (soft-deleted
//! organizations are invisible, "not found" is `Ok(None)`).

pub mod memory;
pub mod secrets;

pub use memory::{
    MemoryAuditSink, MemoryDirectory, MemoryIdentityProvider, MemoryJobStore, MemoryNotifier,
};
pub use secrets::{CachedSecretProvider, MemorySecretStore};
