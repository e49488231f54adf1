//! Domain models for Anivise.
//!
//! These are the core types shared across all crates.

pub mod audit;
pub mod context;
pub mod dossier;
pub mod impersonation;
pub mod membership;
pub mod notification;
pub mod organization;
pub mod principal;
pub mod role;
