use soroban_sdk::{contracttype, Address, Env, Symbol};

use crate::constants::{DEFAULT_ORACLE_MAX_AGE_MULTIPLIER, LIQUIDATION_THRESHOLD_BPS};
use crate::errors::LendingError;
use crate::math::{Collateral, Debt};

// Storage key types for the contract
#[contracttype]
pub enum DataKey {
    Initialized,            // bool flag to prevent re-initialization
    Owner,                  // Address
    CollateralToken,        // Address, 18 decimals
    DebtToken,              // Address, 6 decimals
    Oracle,                 // Address (Reflector interface)
    AnnualRateBps,          // u32, 10_000 = 100%
    MaxLtvBps,              // u32, 5_000 = 50%
    Paused,                 // bool
    OracleAssetSymbol,      // Optional Reflector symbol override for the collateral
    OracleMaxAgeMultiplier, // u64 multiplier of oracle resolution (default 2)
    TotalCollateral,        // u128
    TotalPrincipal,         // u128
    Account(Address),       // Account per user
}

const TTL_THRESHOLD: u32 = 100_000;
pub(crate) const TTL_EXTEND_TO: u32 = 200_000;

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DebtPosition {
    pub principal: u128,
    pub accrued_interest: u128,
    pub last_accrual_timestamp: u64,
}

impl DebtPosition {
    pub fn principal(&self) -> Debt {
        Debt(self.principal)
    }

    pub fn accrued_interest(&self) -> Debt {
        Debt(self.accrued_interest)
    }

    pub fn total(&self) -> Result<Debt, LendingError> {
        self.principal().checked_add(self.accrued_interest())
    }

    pub fn is_closed(&self) -> bool {
        self.principal == 0 && self.accrued_interest == 0
    }
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Account {
    pub collateral_amount: u128,
    pub collateral_enabled: bool,
    pub debt: DebtPosition,
}

impl Account {
    pub fn collateral(&self) -> Collateral {
        Collateral(self.collateral_amount)
    }
}

/// Read-only projection returned by `get_account_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountInfo {
    pub collateral_amount: u128,
    pub collateral_price_usd: u128,
    pub collateral_value_usd: u128,
    pub total_debt: u128,
    pub max_borrow: u128,
    pub health_factor: u128,
    pub collateral_enabled: bool,
    pub annual_interest_rate_bps: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DebtInfo {
    pub principal: u128,
    pub accrued_interest: u128,
    pub total_debt: u128,
    pub last_accrual_timestamp: u64,
}

impl DebtInfo {
    pub fn from_position(debt: &DebtPosition) -> Result<DebtInfo, LendingError> {
        Ok(DebtInfo {
            principal: debt.principal,
            accrued_interest: debt.accrued_interest,
            total_debt: debt.total()?.0,
            last_accrual_timestamp: debt.last_accrual_timestamp,
        })
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceQuote {
    pub asset: Address,
    pub usd_price: u128,
    pub as_of: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LendingConfig {
    pub owner: Address,
    pub collateral_token: Address,
    pub debt_token: Address,
    pub oracle: Address,
    pub annual_interest_rate_bps: u32,
    pub max_ltv_bps: u32,
    pub liquidation_threshold_bps: u32,
    pub oracle_asset_symbol: Option<Symbol>,
    pub oracle_max_age_multiplier: u64,
    pub paused: bool,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .persistent()
        .get::<_, bool>(&DataKey::Initialized)
        .unwrap_or(false)
}

pub fn ensure_initialized(env: &Env) -> Result<(), LendingError> {
    if !is_initialized(env) {
        return Err(LendingError::NotInitialized);
    }
    bump_core_ttl(env);
    Ok(())
}

pub fn bump_core_ttl(env: &Env) {
    let persistent = env.storage().persistent();
    for key in [
        DataKey::Initialized,
        DataKey::Owner,
        DataKey::CollateralToken,
        DataKey::DebtToken,
        DataKey::Oracle,
        DataKey::AnnualRateBps,
        DataKey::MaxLtvBps,
        DataKey::Paused,
        DataKey::OracleAssetSymbol,
        DataKey::OracleMaxAgeMultiplier,
        DataKey::TotalCollateral,
        DataKey::TotalPrincipal,
    ] {
        if persistent.has(&key) {
            persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
        }
    }
}

pub fn bump_account_ttl(env: &Env, user: &Address) {
    let persistent = env.storage().persistent();
    let key = DataKey::Account(user.clone());
    if persistent.has(&key) {
        persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

fn read_required<V>(env: &Env, key: &DataKey) -> Result<V, LendingError>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    env.storage()
        .persistent()
        .get(key)
        .ok_or(LendingError::NotInitialized)
}

pub fn owner(env: &Env) -> Result<Address, LendingError> {
    read_required(env, &DataKey::Owner)
}

pub fn collateral_token(env: &Env) -> Result<Address, LendingError> {
    read_required(env, &DataKey::CollateralToken)
}

pub fn debt_token(env: &Env) -> Result<Address, LendingError> {
    read_required(env, &DataKey::DebtToken)
}

pub fn oracle(env: &Env) -> Result<Address, LendingError> {
    read_required(env, &DataKey::Oracle)
}

pub fn annual_rate_bps(env: &Env) -> Result<u32, LendingError> {
    read_required(env, &DataKey::AnnualRateBps)
}

pub fn max_ltv_bps(env: &Env) -> Result<u32, LendingError> {
    read_required(env, &DataKey::MaxLtvBps)
}

pub fn oracle_asset_symbol(env: &Env) -> Option<Symbol> {
    env.storage().persistent().get(&DataKey::OracleAssetSymbol)
}

pub fn oracle_max_age_multiplier(env: &Env) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::OracleMaxAgeMultiplier)
        .unwrap_or(DEFAULT_ORACLE_MAX_AGE_MULTIPLIER)
}

pub fn load_config(env: &Env) -> Result<LendingConfig, LendingError> {
    ensure_initialized(env)?;
    Ok(LendingConfig {
        owner: owner(env)?,
        collateral_token: collateral_token(env)?,
        debt_token: debt_token(env)?,
        oracle: oracle(env)?,
        annual_interest_rate_bps: annual_rate_bps(env)?,
        max_ltv_bps: max_ltv_bps(env)?,
        liquidation_threshold_bps: LIQUIDATION_THRESHOLD_BPS,
        oracle_asset_symbol: oracle_asset_symbol(env),
        oracle_max_age_multiplier: oracle_max_age_multiplier(env),
        paused: crate::pausable::is_paused(env),
    })
}

/// A user that never deposited reads as the all-zero account.
pub fn read_account(env: &Env, user: &Address) -> Account {
    bump_account_ttl(env, user);
    env.storage()
        .persistent()
        .get(&DataKey::Account(user.clone()))
        .unwrap_or_default()
}

pub fn write_account(env: &Env, user: &Address, account: &Account) {
    env.storage()
        .persistent()
        .set(&DataKey::Account(user.clone()), account);
    bump_account_ttl(env, user);
}

pub fn total_collateral(env: &Env) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::TotalCollateral)
        .unwrap_or(0u128)
}

pub fn set_total_collateral(env: &Env, total: u128) {
    env.storage()
        .persistent()
        .set(&DataKey::TotalCollateral, &total);
}

pub fn total_principal(env: &Env) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::TotalPrincipal)
        .unwrap_or(0u128)
}

pub fn set_total_principal(env: &Env, total: u128) {
    env.storage()
        .persistent()
        .set(&DataKey::TotalPrincipal, &total);
}
