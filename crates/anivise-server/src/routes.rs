//! HTTP route handlers.

pub mod callbacks;
pub mod impersonation;
pub mod me;
