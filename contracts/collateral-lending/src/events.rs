use soroban_sdk::{contractevent, Address, Symbol};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Initialized {
    #[topic]
    pub owner: Address,
    pub collateral_token: Address,
    pub debt_token: Address,
    pub oracle: Address,
    pub annual_interest_rate_bps: u32,
    pub max_ltv_bps: u32,
}

/// Collateral pulled into custody.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    #[topic]
    pub user: Address,
    pub amount: u128,
    pub collateral_amount: u128,
}

/// Collateral returned to the user.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdraw {
    #[topic]
    pub user: Address,
    pub amount: u128,
    pub collateral_amount: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateralToggled {
    #[topic]
    pub user: Address,
    pub enabled: bool,
}

/// Debt asset paid out. Front ends refresh account state on this.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Borrow {
    #[topic]
    pub user: Address,
    pub amount: u128,
    pub total_debt: u128,
}

/// Debt asset paid back, split into its interest and principal parts.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Repay {
    #[topic]
    pub user: Address,
    pub amount: u128,
    pub interest_paid: u128,
    pub principal_paid: u128,
    pub total_debt: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InterestAccrued {
    #[topic]
    pub user: Address,
    pub interest: u128,
    pub accrued_interest: u128,
    pub timestamp: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Paused {
    #[topic]
    pub owner: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Unpaused {
    #[topic]
    pub owner: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerUpdated {
    #[topic]
    pub owner: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MaxLtvUpdated {
    pub max_ltv_bps: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleUpdated {
    #[topic]
    pub oracle: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleAssetSymbolMapped {
    pub symbol: Option<Symbol>,
}

#[contractevent(topics = ["oracle_max_age_multiplier"])]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleMaxAgeMultiplierUpdated {
    pub multiplier: u64,
}
