//! Profile: one row per identity, created on first read.

use studyhall_store::{Profile, Store, StoreError};

use crate::{Error, UserContext, require_nonempty};

/// Fetch the caller's profile, creating it with the identity as display
/// name on first sight.
pub fn get_or_init_profile(ctx: &UserContext, store: &Store) -> Result<Profile, Error> {
    match store.get_profile(&ctx.user_id) {
        Ok(profile) => Ok(profile),
        Err(StoreError::NotFound(_)) => {
            Ok(store.upsert_profile(&ctx.user_id, &ctx.user_id)?)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn set_display_name(
    ctx: &UserContext,
    store: &Store,
    display_name: &str,
) -> Result<Profile, Error> {
    let display_name = require_nonempty(display_name, "display name")?;
    Ok(store.upsert_profile(&ctx.user_id, &display_name)?)
}
