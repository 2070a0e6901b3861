use soroban_sdk::{Address, Env};

use crate::errors::LendingError;
use crate::storage::{self, DataKey};

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

/// First check of every mutating entry point.
pub fn require_not_paused(env: &Env) -> Result<(), LendingError> {
    if is_paused(env) {
        return Err(LendingError::Paused);
    }
    Ok(())
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().persistent().set(&DataKey::Paused, &paused);
}

/// `caller` must be the stored owner and must have signed the invocation.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), LendingError> {
    storage::ensure_initialized(env)?;
    let owner = storage::owner(env)?;
    if owner != *caller {
        return Err(LendingError::NotOwner);
    }
    caller.require_auth();
    Ok(())
}
