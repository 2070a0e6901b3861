//! Fixed-point quantities.
//!
//! Collateral and USD figures carry 18 fractional digits, the debt asset
//! carries 6. Each scale gets its own type so a collateral amount can never be
//! added to a debt amount by accident; conversions between them go through the
//! named methods below. Products are widened to `U256` before dividing.

use soroban_sdk::{Env, U256};

use crate::constants::{
    BPS_DENOMINATOR, HEALTH_FACTOR_INFINITE, MAX_ORACLE_DECIMALS, PRICE_DECIMALS,
    USD_TO_DEBT_SCALE, WAD,
};
use crate::errors::LendingError;

/// Collateral asset amount, 18 fractional digits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Collateral(pub u128);

/// Debt asset amount, 6 fractional digits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Debt(pub u128);

/// USD value, 18 fractional digits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Usd(pub u128);

/// USD per whole collateral unit, 18 fractional digits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(pub u128);

/// `a * b / denominator`, rounded down, without intermediate overflow.
pub fn mul_div_floor(env: &Env, a: u128, b: u128, denominator: u128) -> Result<u128, LendingError> {
    if denominator == 0 {
        return Err(LendingError::MathOverflow);
    }
    U256::from_u128(env, a)
        .mul(&U256::from_u128(env, b))
        .div(&U256::from_u128(env, denominator))
        .to_u128()
        .ok_or(LendingError::MathOverflow)
}

pub fn pow10(decimals: u32) -> Result<u128, LendingError> {
    if decimals > MAX_ORACLE_DECIMALS {
        return Err(LendingError::MathOverflow);
    }
    10u128
        .checked_pow(decimals)
        .ok_or(LendingError::MathOverflow)
}

impl Collateral {
    pub fn checked_add(self, other: Collateral) -> Result<Collateral, LendingError> {
        self.0
            .checked_add(other.0)
            .map(Collateral)
            .ok_or(LendingError::MathOverflow)
    }

    pub fn checked_sub(self, other: Collateral) -> Result<Collateral, LendingError> {
        self.0
            .checked_sub(other.0)
            .map(Collateral)
            .ok_or(LendingError::InsufficientCollateral)
    }

    /// `amount * price / 1e18`.
    pub fn value_in_usd(self, env: &Env, price: Price) -> Result<Usd, LendingError> {
        mul_div_floor(env, self.0, price.0, WAD).map(Usd)
    }
}

impl Usd {
    pub fn mul_bps(self, env: &Env, bps: u32) -> Result<Usd, LendingError> {
        mul_div_floor(env, self.0, bps as u128, BPS_DENOMINATOR).map(Usd)
    }

    /// Drops the 12 digits the debt asset does not carry.
    pub fn to_debt_floor(self) -> Debt {
        Debt(self.0 / USD_TO_DEBT_SCALE)
    }
}

impl Debt {
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Debt) -> Result<Debt, LendingError> {
        self.0
            .checked_add(other.0)
            .map(Debt)
            .ok_or(LendingError::MathOverflow)
    }

    pub fn checked_sub(self, other: Debt) -> Result<Debt, LendingError> {
        self.0
            .checked_sub(other.0)
            .map(Debt)
            .ok_or(LendingError::MathOverflow)
    }

    pub fn saturating_sub(self, other: Debt) -> Debt {
        Debt(self.0.saturating_sub(other.0))
    }
}

impl Price {
    /// Rescales a raw oracle quote with `decimals` fractional digits to 18.
    pub fn from_oracle(raw: i128, decimals: u32) -> Result<Price, LendingError> {
        if raw <= 0 {
            return Err(LendingError::PriceUnavailable);
        }
        let raw = raw as u128;
        if decimals <= PRICE_DECIMALS {
            raw.checked_mul(pow10(PRICE_DECIMALS - decimals)?)
                .map(Price)
                .ok_or(LendingError::MathOverflow)
        } else {
            Ok(Price(raw / pow10(decimals - PRICE_DECIMALS)?))
        }
    }
}

/// Collateral value over total debt as an 18-digit ratio, `u128::MAX` when
/// there is no debt or the ratio does not fit.
///
/// `value / (debt * 1e12) * 1e18` reduces to `value * 1e6 / debt`.
pub fn health_factor(env: &Env, collateral_value: Usd, total_debt: Debt) -> Result<u128, LendingError> {
    if total_debt.is_zero() {
        return Ok(HEALTH_FACTOR_INFINITE);
    }
    match mul_div_floor(env, collateral_value.0, WAD / USD_TO_DEBT_SCALE, total_debt.0) {
        Err(LendingError::MathOverflow) => Ok(HEALTH_FACTOR_INFINITE),
        other => other,
    }
}
