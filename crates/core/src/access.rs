//! Ownership and sharing authorization decisions.
//!
//! Pure decision functions, evaluated fresh on every operation. The caller
//! resolves the todo (a missing todo is `NotFound` before any permission
//! logic runs) and passes the requesting identity explicitly -- there is no
//! request-context lookup here, which keeps the rules unit-testable.
//!
//! A share grants read visibility only. Write access (update, delete) and
//! share management always require ownership.

use crate::error::CoreError;
use crate::types::DbId;

/// Allow a read if the requester owns the todo or holds a share grant on it.
pub fn authorize_read(
    user_id: DbId,
    owner_id: DbId,
    shared_with: &[DbId],
) -> Result<(), CoreError> {
    if user_id == owner_id || shared_with.contains(&user_id) {
        return Ok(());
    }
    Err(CoreError::Forbidden(
        "You do not have access to this todo".into(),
    ))
}

/// Allow an update or delete only for the owner. Shares never grant write.
pub fn authorize_write(user_id: DbId, owner_id: DbId) -> Result<(), CoreError> {
    if user_id == owner_id {
        return Ok(());
    }
    Err(CoreError::Forbidden("Only the owner may modify a todo".into()))
}

/// Allow creating a share only for the owner, and never with themselves.
///
/// Ownership is checked before the self-share rule, so a non-owner probing
/// with the owner's id still sees 403 rather than 400.
pub fn authorize_share(
    user_id: DbId,
    owner_id: DbId,
    target_user_id: DbId,
) -> Result<(), CoreError> {
    if user_id != owner_id {
        return Err(CoreError::Forbidden(
            "Only the owner may share a todo".into(),
        ));
    }
    if target_user_id == owner_id {
        return Err(CoreError::Validation(
            "A todo cannot be shared with its owner".into(),
        ));
    }
    Ok(())
}

/// Allow removing a share only for the owner.
pub fn authorize_unshare(user_id: DbId, owner_id: DbId) -> Result<(), CoreError> {
    if user_id == owner_id {
        return Ok(());
    }
    Err(CoreError::Forbidden(
        "Only the owner may unshare a todo".into(),
    ))
}
