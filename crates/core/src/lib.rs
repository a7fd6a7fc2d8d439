//! Shared domain primitives for the todohub backend.
//!
//! - [`types`] -- id and timestamp aliases used across crates.
//! - [`error`] -- the domain error taxonomy.
//! - [`access`] -- the pure sharing-authorization engine.

pub mod access;
pub mod error;
pub mod types;
