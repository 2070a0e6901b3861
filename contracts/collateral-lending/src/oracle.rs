use soroban_sdk::{Address, Env};

use crate::errors::LendingError;
use crate::helpers::{now, settle_call};
use crate::math::Price;
use crate::reflector::{Asset, ReflectorClient};
use crate::storage::{self, PriceQuote};

/// Reflector asset key for the collateral: the symbol override if one is
/// mapped, otherwise the token contract itself.
fn collateral_asset(env: &Env, collateral_token: &Address) -> Asset {
    match storage::oracle_asset_symbol(env) {
        Some(sym) => Asset::Other(sym),
        None => Asset::Stellar(collateral_token.clone()),
    }
}

/// Latest USD price of the collateral, normalised to 18 fractional digits.
///
/// A missing, non-positive or stale quote fails the whole call, as does any
/// failure of the oracle contract itself.
pub fn collateral_price(env: &Env) -> Result<PriceQuote, LendingError> {
    let oracle_addr = storage::oracle(env)?;
    let collateral_token = storage::collateral_token(env)?;
    let client = ReflectorClient::new(env, &oracle_addr);

    let decimals: u32 = settle_call(
        env,
        &oracle_addr,
        "decimals",
        client.try_decimals(),
        LendingError::OracleCallFailed,
    )?;
    let asset = collateral_asset(env, &collateral_token);
    let quote = settle_call(
        env,
        &oracle_addr,
        "lastprice",
        client.try_lastprice(&asset),
        LendingError::OracleCallFailed,
    )?
    .ok_or(LendingError::PriceUnavailable)?;

    // Staleness check: older than k * resolution is rejected
    let resolution: u32 = settle_call(
        env,
        &oracle_addr,
        "resolution",
        client.try_resolution(),
        LendingError::OracleCallFailed,
    )?;
    let max_age = (resolution as u64).saturating_mul(storage::oracle_max_age_multiplier(env));
    if quote.timestamp.saturating_add(max_age) < now(env) {
        return Err(LendingError::StalePrice);
    }

    let price = Price::from_oracle(quote.price, decimals)?;
    Ok(PriceQuote {
        asset: collateral_token,
        usd_price: price.0,
        as_of: quote.timestamp,
    })
}
