//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `todohub_db`, consult
//! `todohub_core::access` for authorization, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod auth;
pub mod shares;
pub mod todos;
pub mod users;
