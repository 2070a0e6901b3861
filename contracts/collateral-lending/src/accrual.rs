//! Simple (non-compounding) per-second interest on a debt position, and the
//! interest-first allocation of repayments.

use soroban_sdk::{Env, U256};

use crate::constants::{BPS_DENOMINATOR, SECONDS_PER_YEAR};
use crate::errors::LendingError;
use crate::math::Debt;
use crate::storage::DebtPosition;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Accrual {
    pub position: DebtPosition,
    pub interest: Debt,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RepaymentSplit {
    pub interest_paid: Debt,
    pub principal_paid: Debt,
}

/// `principal * annual_rate_bps * elapsed / (10_000 * SECONDS_PER_YEAR)`, rounded down.
pub fn interest_delta(
    env: &Env,
    principal: Debt,
    annual_rate_bps: u32,
    elapsed: u64,
) -> Result<Debt, LendingError> {
    if principal.is_zero() || annual_rate_bps == 0 || elapsed == 0 {
        return Ok(Debt(0));
    }
    let numerator = U256::from_u128(env, principal.0)
        .mul(&U256::from_u32(env, annual_rate_bps))
        .mul(&U256::from_u128(env, elapsed as u128));
    let denominator = U256::from_u128(env, BPS_DENOMINATOR * SECONDS_PER_YEAR);
    numerator
        .div(&denominator)
        .to_u128()
        .map(Debt)
        .ok_or(LendingError::MathOverflow)
}

/// Brings `debt` current to `now` without touching storage.
///
/// A clock reading at or before the checkpoint leaves the position as is, so
/// the checkpoint never moves backwards and a second accrual in the same
/// second adds nothing.
pub fn accrue(
    env: &Env,
    debt: &DebtPosition,
    annual_rate_bps: u32,
    now: u64,
) -> Result<Accrual, LendingError> {
    if now <= debt.last_accrual_timestamp {
        return Ok(Accrual {
            position: debt.clone(),
            interest: Debt(0),
        });
    }
    let elapsed = now - debt.last_accrual_timestamp;
    let interest = interest_delta(env, debt.principal(), annual_rate_bps, elapsed)?;
    let accrued_interest = debt.accrued_interest().checked_add(interest)?;
    Ok(Accrual {
        position: DebtPosition {
            principal: debt.principal,
            accrued_interest: accrued_interest.0,
            last_accrual_timestamp: now,
        },
        interest,
    })
}

/// Applies `amount` to accrued interest first and the remainder to principal.
///
/// `debt` must already be current. Paying more than the total is rejected.
pub fn apply_repayment(
    debt: &DebtPosition,
    amount: Debt,
) -> Result<(DebtPosition, RepaymentSplit), LendingError> {
    if amount.is_zero() {
        return Err(LendingError::InvalidAmount);
    }
    if amount > debt.total()? {
        return Err(LendingError::RepayExceedsDebt);
    }
    let interest_paid = amount.min(debt.accrued_interest());
    let principal_paid = amount.checked_sub(interest_paid)?;
    let position = DebtPosition {
        principal: debt.principal().checked_sub(principal_paid)?.0,
        accrued_interest: debt.accrued_interest().checked_sub(interest_paid)?.0,
        last_accrual_timestamp: debt.last_accrual_timestamp,
    };
    Ok((
        position,
        RepaymentSplit {
            interest_paid,
            principal_paid,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(principal: u128, accrued_interest: u128, last: u64) -> DebtPosition {
        DebtPosition {
            principal,
            accrued_interest,
            last_accrual_timestamp: last,
        }
    }

    #[test]
    fn full_year_at_hundred_percent_doubles_the_debt() {
        let env = Env::default();
        let debt = position(1_000_000_000, 0, 100);
        let out = accrue(&env, &debt, 10_000, 100 + SECONDS_PER_YEAR as u64).unwrap();
        assert_eq!(out.interest, Debt(1_000_000_000));
        assert_eq!(out.position.accrued_interest, 1_000_000_000);
        assert_eq!(out.position.principal, 1_000_000_000);
    }

    #[test]
    fn fifteen_seconds_accrues_pro_rata() {
        let env = Env::default();
        // 1000 units at 100% for 15s: 1_000e6 * 15 / 31_536_000 = 475 base units
        let delta = interest_delta(&env, Debt(1_000_000_000), 10_000, 15).unwrap();
        assert_eq!(delta, Debt(475));
    }

    #[test]
    fn accrual_is_simple_not_compounding() {
        let env = Env::default();
        let debt = position(1_000_000_000, 0, 0);
        let half = SECONDS_PER_YEAR as u64 / 2;
        let first = accrue(&env, &debt, 10_000, half).unwrap();
        let second = accrue(&env, &first.position, 10_000, 2 * half).unwrap();
        assert_eq!(second.position.accrued_interest, 1_000_000_000);
    }

    #[test]
    fn no_elapsed_time_is_a_no_op() {
        let env = Env::default();
        let debt = position(500, 7, 42);
        let out = accrue(&env, &debt, 10_000, 42).unwrap();
        assert_eq!(out.position, debt);
        assert_eq!(out.interest, Debt(0));
    }

    #[test]
    fn clock_behind_checkpoint_keeps_checkpoint() {
        let env = Env::default();
        let debt = position(500, 0, 1_000);
        let out = accrue(&env, &debt, 10_000, 900).unwrap();
        assert_eq!(out.position.last_accrual_timestamp, 1_000);
    }

    #[test]
    fn zero_principal_only_moves_checkpoint() {
        let env = Env::default();
        let out = accrue(&env, &DebtPosition::default(), 10_000, 55).unwrap();
        assert_eq!(out.position, position(0, 0, 55));
    }

    #[test]
    fn repayment_goes_to_interest_first() {
        let debt = position(1_000, 300, 9);
        let (after, split) = apply_repayment(&debt, Debt(500)).unwrap();
        assert_eq!(split.interest_paid, Debt(300));
        assert_eq!(split.principal_paid, Debt(200));
        assert_eq!(after, position(800, 0, 9));
    }

    #[test]
    fn partial_repayment_smaller_than_interest() {
        let debt = position(1_000, 300, 9);
        let (after, split) = apply_repayment(&debt, Debt(100)).unwrap();
        assert_eq!(split.principal_paid, Debt(0));
        assert_eq!(after, position(1_000, 200, 9));
    }

    #[test]
    fn exact_repayment_closes_position() {
        let debt = position(1_000, 300, 9);
        let (after, _) = apply_repayment(&debt, Debt(1_300)).unwrap();
        assert!(after.is_closed());
    }

    #[test]
    fn over_repayment_is_rejected() {
        let debt = position(1_000, 300, 9);
        assert_eq!(
            apply_repayment(&debt, Debt(1_301)),
            Err(LendingError::RepayExceedsDebt)
        );
        assert_eq!(
            apply_repayment(&DebtPosition::default(), Debt(1)),
            Err(LendingError::RepayExceedsDebt)
        );
    }
}
