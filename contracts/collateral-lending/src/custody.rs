//! Moves collateral and debt asset in and out of the contract's custody.

use soroban_sdk::{token, Address, Env};

use crate::errors::LendingError;
use crate::helpers::{settle_call, to_i128};

/// Transfers `amount` of `token` from `from` into the contract.
pub fn pull(env: &Env, token: &Address, from: &Address, amount: u128) -> Result<(), LendingError> {
    let amount = to_i128(amount)?;
    let client = token::Client::new(env, token);
    let outcome = client.try_transfer(from, &env.current_contract_address(), &amount);
    settle_call(env, token, "transfer", outcome, LendingError::TransferFailed)
}

/// Transfers `amount` of `token` from the contract to `to`.
pub fn push(env: &Env, token: &Address, to: &Address, amount: u128) -> Result<(), LendingError> {
    let amount = to_i128(amount)?;
    let client = token::Client::new(env, token);
    let outcome = client.try_transfer(&env.current_contract_address(), to, &amount);
    settle_call(env, token, "transfer", outcome, LendingError::TransferFailed)
}

pub fn held_balance(env: &Env, token: &Address) -> Result<u128, LendingError> {
    let client = token::Client::new(env, token);
    let outcome = client.try_balance(&env.current_contract_address());
    let balance: i128 = settle_call(env, token, "balance", outcome, LendingError::TransferFailed)?;
    Ok(if balance < 0 { 0 } else { balance as u128 })
}
