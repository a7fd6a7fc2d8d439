//! Request-boundary middleware.
//!
//! - [`auth`] -- bearer-token authentication extractor.

pub mod auth;
