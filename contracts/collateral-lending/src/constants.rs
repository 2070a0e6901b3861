pub const BPS_DENOMINATOR: u128 = 10_000u128;
pub const SECONDS_PER_YEAR: u128 = 365 * 24 * 60 * 60;

pub const COLLATERAL_DECIMALS: u32 = 18;
pub const DEBT_DECIMALS: u32 = 6;
pub const PRICE_DECIMALS: u32 = 18;

pub const WAD: u128 = 1_000_000_000_000_000_000u128; // 1e18
/// Factor between an 18-digit USD value and a 6-digit debt amount.
pub const USD_TO_DEBT_SCALE: u128 = 1_000_000_000_000u128; // 1e12

pub const MAX_ANNUAL_RATE_BPS: u32 = 100_000; // 1000% APR cap to keep accrual bounded
pub const LIQUIDATION_THRESHOLD_BPS: u32 = 8_000;
pub const DEFAULT_ORACLE_MAX_AGE_MULTIPLIER: u64 = 2;
pub const MAX_ORACLE_DECIMALS: u32 = 38;

/// Reported in place of a ratio when the account carries no debt.
pub const HEALTH_FACTOR_INFINITE: u128 = u128::MAX;
