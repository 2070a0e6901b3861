use soroban_sdk::Env;

use crate::errors::LendingError;
use crate::math::{self, Collateral, Debt, Price, Usd};

/// Borrowing headroom of one account at one price.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BorrowCapacity {
    pub collateral_value: Usd,
    /// Largest total debt the collateral supports, in debt units.
    pub ceiling: Debt,
    pub total_debt: Debt,
}

impl BorrowCapacity {
    pub fn assess(
        env: &Env,
        collateral: Collateral,
        price: Price,
        max_ltv_bps: u32,
        total_debt: Debt,
    ) -> Result<BorrowCapacity, LendingError> {
        let collateral_value = collateral.value_in_usd(env, price)?;
        let ceiling = collateral_value.mul_bps(env, max_ltv_bps)?.to_debt_floor();
        Ok(BorrowCapacity {
            collateral_value,
            ceiling,
            total_debt,
        })
    }

    /// Additional debt still allowed; zero once the account is at or over
    /// its ceiling (e.g. after a price drop).
    pub fn max_borrow(&self) -> Debt {
        self.ceiling.saturating_sub(self.total_debt)
    }

    /// Whether `amount` more debt keeps total debt within the ceiling.
    pub fn admits(&self, amount: Debt) -> Result<bool, LendingError> {
        Ok(self.total_debt.checked_add(amount)? <= self.ceiling)
    }

    pub fn health_factor(&self, env: &Env) -> Result<u128, LendingError> {
        math::health_factor(env, self.collateral_value, self.total_debt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{HEALTH_FACTOR_INFINITE, WAD};

    fn tenth_of_a_unit() -> Collateral {
        Collateral(WAD / 10)
    }

    #[test]
    fn half_ltv_on_a_tenth_at_2650_allows_132_5() {
        let env = Env::default();
        let cap =
            BorrowCapacity::assess(&env, tenth_of_a_unit(), Price(2_650 * WAD), 5_000, Debt(0))
                .unwrap();
        assert_eq!(cap.collateral_value, Usd(265 * WAD));
        assert_eq!(cap.ceiling, Debt(132_500_000));
        assert_eq!(cap.max_borrow(), Debt(132_500_000));
        assert!(cap.admits(Debt(132_500_000)).unwrap());
        assert!(!cap.admits(Debt(132_500_001)).unwrap());
        assert_eq!(cap.health_factor(&env).unwrap(), HEALTH_FACTOR_INFINITE);
    }

    #[test]
    fn over_leveraged_account_admits_nothing() {
        let env = Env::default();
        // Price halved after borrowing the full 132.5
        let cap = BorrowCapacity::assess(
            &env,
            tenth_of_a_unit(),
            Price(1_325 * WAD),
            5_000,
            Debt(132_500_000),
        )
        .unwrap();
        assert_eq!(cap.max_borrow(), Debt(0));
        assert!(!cap.admits(Debt(1)).unwrap());
        // $132.5 of collateral against 132.5 of debt
        assert_eq!(cap.health_factor(&env).unwrap(), WAD);
    }
}
