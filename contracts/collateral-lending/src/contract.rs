use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

use crate::accrual::{self, Accrual};
use crate::constants::MAX_ANNUAL_RATE_BPS;
use crate::custody;
use crate::errors::LendingError;
use crate::events::{
    Borrow, CollateralToggled, Deposit, Initialized, InterestAccrued, MaxLtvUpdated,
    OracleAssetSymbolMapped, OracleMaxAgeMultiplierUpdated, OracleUpdated, OwnerUpdated, Paused,
    Repay, Unpaused, Withdraw,
};
use crate::helpers::now;
use crate::math::{Collateral, Debt, Price};
use crate::oracle;
use crate::pausable::{self, require_not_paused, require_owner};
use crate::risk::BorrowCapacity;
use crate::storage::{
    self, Account, AccountInfo, DataKey, DebtInfo, LendingConfig, PriceQuote,
};

#[contract]
pub struct CollateralLending;

fn validate_max_ltv(max_ltv_bps: u32) -> Result<(), LendingError> {
    if max_ltv_bps == 0 || max_ltv_bps > 10_000 {
        return Err(LendingError::InvalidConfig);
    }
    Ok(())
}

/// Debt of `account` brought current to the ledger clock. Nothing is written.
fn accrue_account(env: &Env, account: &Account) -> Result<Accrual, LendingError> {
    accrual::accrue(env, &account.debt, storage::annual_rate_bps(env)?, now(env))
}

fn publish_accrual(env: &Env, user: &Address, accrued: &Accrual) {
    if accrued.interest.is_zero() {
        return;
    }
    InterestAccrued {
        user: user.clone(),
        interest: accrued.interest.0,
        accrued_interest: accrued.position.accrued_interest,
        timestamp: accrued.position.last_accrual_timestamp,
    }
    .publish(env);
}

fn require_positive(amount: u128) -> Result<(), LendingError> {
    if amount == 0 {
        return Err(LendingError::InvalidAmount);
    }
    Ok(())
}

#[contractimpl]
impl CollateralLending {
    /// Initialize the market. Rates are in basis points (10_000 = 100%).
    pub fn initialize(
        env: Env,
        owner: Address,
        collateral_token: Address,
        debt_token: Address,
        oracle: Address,
        annual_interest_rate_bps: u32,
        max_ltv_bps: u32,
    ) -> Result<(), LendingError> {
        if storage::is_initialized(&env) {
            return Err(LendingError::AlreadyInitialized);
        }
        owner.require_auth();
        if annual_interest_rate_bps > MAX_ANNUAL_RATE_BPS {
            return Err(LendingError::InvalidConfig);
        }
        validate_max_ltv(max_ltv_bps)?;
        if collateral_token == debt_token {
            return Err(LendingError::InvalidConfig);
        }

        let storage = env.storage().persistent();
        storage.set(&DataKey::Owner, &owner);
        storage.set(&DataKey::CollateralToken, &collateral_token);
        storage.set(&DataKey::DebtToken, &debt_token);
        storage.set(&DataKey::Oracle, &oracle);
        storage.set(&DataKey::AnnualRateBps, &annual_interest_rate_bps);
        storage.set(&DataKey::MaxLtvBps, &max_ltv_bps);
        storage.set(&DataKey::TotalCollateral, &0u128);
        storage.set(&DataKey::TotalPrincipal, &0u128);
        pausable::set_paused(&env, false);
        storage.set(&DataKey::Initialized, &true);

        Initialized {
            owner,
            collateral_token,
            debt_token,
            oracle,
            annual_interest_rate_bps,
            max_ltv_bps,
        }
        .publish(&env);
        Ok(())
    }

    /// Pull `amount` of collateral from `user` into custody.
    pub fn deposit(env: Env, user: Address, amount: u128) -> Result<(), LendingError> {
        require_not_paused(&env)?;
        storage::ensure_initialized(&env)?;
        user.require_auth();
        require_positive(amount)?;

        let token = storage::collateral_token(&env)?;
        let mut account = storage::read_account(&env, &user);
        let collateral = account.collateral().checked_add(Collateral(amount))?;
        let total = Collateral(storage::total_collateral(&env)).checked_add(Collateral(amount))?;

        custody::pull(&env, &token, &user, amount)?;

        account.collateral_amount = collateral.0;
        storage::write_account(&env, &user, &account);
        storage::set_total_collateral(&env, total.0);

        Deposit {
            user,
            amount,
            collateral_amount: collateral.0,
        }
        .publish(&env);
        Ok(())
    }

    /// Return `amount` of collateral to `user`. Only allowed with no debt.
    pub fn withdraw(env: Env, user: Address, amount: u128) -> Result<(), LendingError> {
        require_not_paused(&env)?;
        storage::ensure_initialized(&env)?;
        user.require_auth();
        require_positive(amount)?;

        let token = storage::collateral_token(&env)?;
        let mut account = storage::read_account(&env, &user);
        let accrued = accrue_account(&env, &account)?;
        if !accrued.position.is_closed() {
            return Err(LendingError::OutstandingDebt);
        }
        let remaining = account.collateral().checked_sub(Collateral(amount))?;
        let total = storage::total_collateral(&env).saturating_sub(amount);

        custody::push(&env, &token, &user, amount)?;

        account.collateral_amount = remaining.0;
        account.debt = accrued.position;
        storage::write_account(&env, &user, &account);
        storage::set_total_collateral(&env, total);

        Withdraw {
            user,
            amount,
            collateral_amount: remaining.0,
        }
        .publish(&env);
        Ok(())
    }

    pub fn enable_collateral(env: Env, user: Address) -> Result<(), LendingError> {
        require_not_paused(&env)?;
        storage::ensure_initialized(&env)?;
        user.require_auth();

        let mut account = storage::read_account(&env, &user);
        account.collateral_enabled = true;
        storage::write_account(&env, &user, &account);

        CollateralToggled {
            user,
            enabled: true,
        }
        .publish(&env);
        Ok(())
    }

    /// Opt out of borrowing. Fails while any debt, interest included, is open.
    pub fn disable_collateral(env: Env, user: Address) -> Result<(), LendingError> {
        require_not_paused(&env)?;
        storage::ensure_initialized(&env)?;
        user.require_auth();

        let mut account = storage::read_account(&env, &user);
        let accrued = accrue_account(&env, &account)?;
        if !accrued.position.is_closed() {
            return Err(LendingError::CollateralInUse);
        }

        account.debt = accrued.position;
        account.collateral_enabled = false;
        storage::write_account(&env, &user, &account);

        CollateralToggled {
            user,
            enabled: false,
        }
        .publish(&env);
        Ok(())
    }

    /// Borrow `amount` of the debt asset against enabled collateral.
    pub fn borrow(env: Env, user: Address, amount: u128) -> Result<(), LendingError> {
        require_not_paused(&env)?;
        storage::ensure_initialized(&env)?;
        user.require_auth();
        require_positive(amount)?;

        let mut account = storage::read_account(&env, &user);
        if !account.collateral_enabled {
            return Err(LendingError::CollateralNotEnabled);
        }
        let accrued = accrue_account(&env, &account)?;

        let quote = oracle::collateral_price(&env)?;
        let capacity = BorrowCapacity::assess(
            &env,
            account.collateral(),
            Price(quote.usd_price),
            storage::max_ltv_bps(&env)?,
            accrued.position.total()?,
        )?;
        if !capacity.admits(Debt(amount))? {
            return Err(LendingError::BorrowExceedsMax);
        }

        let principal = accrued.position.principal().checked_add(Debt(amount))?;
        let total_principal = Debt(storage::total_principal(&env)).checked_add(Debt(amount))?;
        let mut position = accrued.position.clone();
        position.principal = principal.0;
        let total_debt = position.total()?;

        let token = storage::debt_token(&env)?;
        custody::push(&env, &token, &user, amount)?;

        account.debt = position;
        storage::write_account(&env, &user, &account);
        storage::set_total_principal(&env, total_principal.0);

        publish_accrual(&env, &user, &accrued);
        Borrow {
            user,
            amount,
            total_debt: total_debt.0,
        }
        .publish(&env);
        Ok(())
    }

    /// Repay `amount` of the debt asset: accrued interest first, then principal.
    pub fn repay(env: Env, user: Address, amount: u128) -> Result<(), LendingError> {
        require_not_paused(&env)?;
        storage::ensure_initialized(&env)?;
        user.require_auth();
        require_positive(amount)?;

        let mut account = storage::read_account(&env, &user);
        let accrued = accrue_account(&env, &account)?;
        let (position, split) = accrual::apply_repayment(&accrued.position, Debt(amount))?;
        let total_principal = Debt(storage::total_principal(&env)).saturating_sub(split.principal_paid);
        let total_debt = position.total()?;

        let token = storage::debt_token(&env)?;
        custody::pull(&env, &token, &user, amount)?;

        account.debt = position;
        storage::write_account(&env, &user, &account);
        storage::set_total_principal(&env, total_principal.0);

        publish_accrual(&env, &user, &accrued);
        Repay {
            user,
            amount,
            interest_paid: split.interest_paid.0,
            principal_paid: split.principal_paid.0,
            total_debt: total_debt.0,
        }
        .publish(&env);
        Ok(())
    }

    /// Persist the interest checkpoint of `user`. Callable by anyone.
    pub fn accrue_interest(env: Env, user: Address) -> Result<DebtInfo, LendingError> {
        require_not_paused(&env)?;
        storage::ensure_initialized(&env)?;

        let mut account = storage::read_account(&env, &user);
        let accrued = accrue_account(&env, &account)?;
        // Users without debt keep no record until they deposit
        if !account.debt.is_closed() {
            account.debt = accrued.position.clone();
            storage::write_account(&env, &user, &account);
            publish_accrual(&env, &user, &accrued);
        }
        DebtInfo::from_position(&account.debt)
    }

    /// Collateral, debt and borrowing headroom of `user`, with interest
    /// projected to the current ledger time.
    pub fn get_account_info(env: Env, user: Address) -> Result<AccountInfo, LendingError> {
        storage::ensure_initialized(&env)?;
        let account = storage::read_account(&env, &user);
        let accrued = accrue_account(&env, &account)?;
        let quote = oracle::collateral_price(&env)?;
        let capacity = BorrowCapacity::assess(
            &env,
            account.collateral(),
            Price(quote.usd_price),
            storage::max_ltv_bps(&env)?,
            accrued.position.total()?,
        )?;
        Ok(AccountInfo {
            collateral_amount: account.collateral_amount,
            collateral_price_usd: quote.usd_price,
            collateral_value_usd: capacity.collateral_value.0,
            total_debt: capacity.total_debt.0,
            max_borrow: capacity.max_borrow().0,
            health_factor: capacity.health_factor(&env)?,
            collateral_enabled: account.collateral_enabled,
            annual_interest_rate_bps: storage::annual_rate_bps(&env)?,
        })
    }

    /// Principal and projected interest of `user`. The timestamp is the last
    /// persisted checkpoint.
    pub fn get_debt_info(env: Env, user: Address) -> Result<DebtInfo, LendingError> {
        storage::ensure_initialized(&env)?;
        let account = storage::read_account(&env, &user);
        let accrued = accrue_account(&env, &account)?;
        let mut info = DebtInfo::from_position(&accrued.position)?;
        info.last_accrual_timestamp = account.debt.last_accrual_timestamp;
        Ok(info)
    }

    pub fn get_price_quote(env: Env) -> Result<PriceQuote, LendingError> {
        storage::ensure_initialized(&env)?;
        oracle::collateral_price(&env)
    }

    pub fn get_config(env: Env) -> Result<LendingConfig, LendingError> {
        storage::load_config(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, LendingError> {
        storage::ensure_initialized(&env)?;
        storage::owner(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        pausable::is_paused(&env)
    }

    /// Debt asset held in custody and available to borrowers.
    pub fn get_available_liquidity(env: Env) -> Result<u128, LendingError> {
        storage::ensure_initialized(&env)?;
        custody::held_balance(&env, &storage::debt_token(&env)?)
    }

    pub fn get_total_collateral(env: Env) -> Result<u128, LendingError> {
        storage::ensure_initialized(&env)?;
        Ok(storage::total_collateral(&env))
    }

    /// Sum of outstanding principal over all accounts, interest excluded.
    pub fn get_total_principal(env: Env) -> Result<u128, LendingError> {
        storage::ensure_initialized(&env)?;
        Ok(storage::total_principal(&env))
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), LendingError> {
        require_owner(&env, &caller)?;
        pausable::set_paused(&env, true);
        Paused { owner: caller }.publish(&env);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), LendingError> {
        require_owner(&env, &caller)?;
        pausable::set_paused(&env, false);
        Unpaused { owner: caller }.publish(&env);
        Ok(())
    }

    /// Owner: transfer ownership to `new_owner`.
    pub fn set_owner(env: Env, caller: Address, new_owner: Address) -> Result<(), LendingError> {
        require_owner(&env, &caller)?;
        env.storage().persistent().set(&DataKey::Owner, &new_owner);
        OwnerUpdated { owner: new_owner }.publish(&env);
        Ok(())
    }

    /// Owner: change the loan-to-value ceiling. Existing debt is not touched;
    /// only later borrows see the new limit.
    pub fn set_max_ltv(env: Env, caller: Address, max_ltv_bps: u32) -> Result<(), LendingError> {
        require_owner(&env, &caller)?;
        validate_max_ltv(max_ltv_bps)?;
        env.storage()
            .persistent()
            .set(&DataKey::MaxLtvBps, &max_ltv_bps);
        MaxLtvUpdated { max_ltv_bps }.publish(&env);
        Ok(())
    }

    pub fn set_oracle(env: Env, caller: Address, oracle: Address) -> Result<(), LendingError> {
        require_owner(&env, &caller)?;
        env.storage().persistent().set(&DataKey::Oracle, &oracle);
        OracleUpdated { oracle }.publish(&env);
        Ok(())
    }

    /// Owner: price the collateral under a Reflector symbol (e.g. `ETH`)
    /// instead of its token address. `None` clears the override.
    pub fn set_oracle_asset_symbol(
        env: Env,
        caller: Address,
        symbol: Option<Symbol>,
    ) -> Result<(), LendingError> {
        require_owner(&env, &caller)?;
        match symbol.clone() {
            Some(sym) => env
                .storage()
                .persistent()
                .set(&DataKey::OracleAssetSymbol, &sym),
            None => env
                .storage()
                .persistent()
                .remove(&DataKey::OracleAssetSymbol),
        }
        OracleAssetSymbolMapped { symbol }.publish(&env);
        Ok(())
    }

    pub fn set_oracle_max_age_multiplier(
        env: Env,
        caller: Address,
        multiplier: u64,
    ) -> Result<(), LendingError> {
        require_owner(&env, &caller)?;
        if multiplier == 0 {
            return Err(LendingError::InvalidConfig);
        }
        env.storage()
            .persistent()
            .set(&DataKey::OracleMaxAgeMultiplier, &multiplier);
        OracleMaxAgeMultiplierUpdated { multiplier }.publish(&env);
        Ok(())
    }
}
