use soroban_sdk::{log, Address, Env, InvokeError, Symbol};

use crate::errors::LendingError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CallErrorKind {
    Undecodable,
    ContractRevert,
    HostError,
}

impl CallErrorKind {
    pub fn as_code(&self) -> u32 {
        match self {
            CallErrorKind::Undecodable => 0,
            CallErrorKind::ContractRevert => 1,
            CallErrorKind::HostError => 2,
        }
    }
}

/// Unwraps the result of a generated `try_*` client call.
///
/// Any failure of the callee is logged and mapped to `on_failure`; the caller
/// returns it, so nothing done in this invocation is committed.
pub(crate) fn settle_call<T, C, E>(
    env: &Env,
    contract: &Address,
    function: &str,
    outcome: Result<Result<T, C>, Result<E, InvokeError>>,
    on_failure: LendingError,
) -> Result<T, LendingError> {
    let kind = match outcome {
        Ok(Ok(value)) => return Ok(value),
        Ok(Err(_)) => CallErrorKind::Undecodable,
        Err(Ok(_)) => CallErrorKind::ContractRevert,
        Err(Err(_)) => CallErrorKind::HostError,
    };
    log!(
        env,
        "external call failed",
        contract.clone(),
        Symbol::new(env, function),
        kind.as_code()
    );
    Err(on_failure)
}

pub fn to_i128(amount: u128) -> Result<i128, LendingError> {
    if amount > i128::MAX as u128 {
        return Err(LendingError::MathOverflow);
    }
    Ok(amount as i128)
}

/// Current ledger time. All accrual reads the clock through here.
pub fn now(env: &Env) -> u64 {
    env.ledger().timestamp()
}
