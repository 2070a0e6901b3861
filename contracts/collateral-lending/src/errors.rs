use soroban_sdk::contracterror;

/// Groups errors by the kind of failure so off-chain consumers can branch on
/// the category first and on the specific code second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup (codes 1-99).
    Initialization,
    /// Caller is not allowed to perform the call (codes 100-199).
    Authorization,
    /// Arguments or account state reject the request (codes 200-299).
    Validation,
    /// Global contract state rejects the request (codes 300-399).
    State,
    /// Oracle or token contract failed (codes 400-499).
    External,
    /// Fixed-point math left its range (codes 700-799).
    Arithmetic,
}

/// Error codes returned by every fallible lending entry point.
///
/// Codes are wire-stable: clients match on them. Append new variants at the
/// end of their category block only.
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LendingError {
    // --- Initialization (1-99) ---
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidConfig = 3,

    // --- Authorization (100-199) ---
    NotOwner = 100,

    // --- Validation (200-299) ---
    InvalidAmount = 200,
    BorrowExceedsMax = 201,
    RepayExceedsDebt = 202,
    OutstandingDebt = 203,
    CollateralInUse = 204,
    InsufficientCollateral = 205,
    CollateralNotEnabled = 206,

    // --- State (300-399) ---
    Paused = 300,

    // --- External (400-499) ---
    PriceUnavailable = 400,
    StalePrice = 401,
    OracleCallFailed = 402,
    TransferFailed = 403,

    // --- Arithmetic (700-799) ---
    MathOverflow = 700,
}

impl LendingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LendingError::NotInitialized
            | LendingError::AlreadyInitialized
            | LendingError::InvalidConfig => ErrorCategory::Initialization,

            LendingError::NotOwner => ErrorCategory::Authorization,

            LendingError::InvalidAmount
            | LendingError::BorrowExceedsMax
            | LendingError::RepayExceedsDebt
            | LendingError::OutstandingDebt
            | LendingError::CollateralInUse
            | LendingError::InsufficientCollateral
            | LendingError::CollateralNotEnabled => ErrorCategory::Validation,

            LendingError::Paused => ErrorCategory::State,

            LendingError::PriceUnavailable
            | LendingError::StalePrice
            | LendingError::OracleCallFailed
            | LendingError::TransferFailed => ErrorCategory::External,

            LendingError::MathOverflow => ErrorCategory::Arithmetic,
        }
    }

    /// Reason string surfaced to users. Front ends match on these verbatim.
    pub fn reason(&self) -> &'static str {
        match self {
            LendingError::NotInitialized => "Contract not initialized",
            LendingError::AlreadyInitialized => "Contract already initialized",
            LendingError::InvalidConfig => "Invalid configuration",
            LendingError::NotOwner => "Caller is not the owner",
            LendingError::InvalidAmount => "Amount must be greater than zero",
            LendingError::BorrowExceedsMax => "Borrow amount exceeds maximum allowed",
            LendingError::RepayExceedsDebt => "Repay amount exceeds debt",
            LendingError::OutstandingDebt => "Cannot withdraw with outstanding debt",
            LendingError::CollateralInUse => "Cannot disable collateral with outstanding debt",
            LendingError::InsufficientCollateral => "Insufficient collateral",
            LendingError::CollateralNotEnabled => "Collateral not enabled",
            LendingError::Paused => "Contract is paused",
            LendingError::PriceUnavailable => "Price unavailable",
            LendingError::StalePrice => "Price is stale",
            LendingError::OracleCallFailed => "Oracle call failed",
            LendingError::TransferFailed => "Token transfer failed",
            LendingError::MathOverflow => "Arithmetic overflow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorCategory, LendingError};

    const ALL: [LendingError; 17] = [
        LendingError::NotInitialized,
        LendingError::AlreadyInitialized,
        LendingError::InvalidConfig,
        LendingError::NotOwner,
        LendingError::InvalidAmount,
        LendingError::BorrowExceedsMax,
        LendingError::RepayExceedsDebt,
        LendingError::OutstandingDebt,
        LendingError::CollateralInUse,
        LendingError::InsufficientCollateral,
        LendingError::CollateralNotEnabled,
        LendingError::Paused,
        LendingError::PriceUnavailable,
        LendingError::StalePrice,
        LendingError::OracleCallFailed,
        LendingError::TransferFailed,
        LendingError::MathOverflow,
    ];

    #[test]
    fn codes_fall_inside_their_category_range() {
        for err in ALL {
            let code = err as u32;
            let range = match err.category() {
                ErrorCategory::Initialization => 1..=99,
                ErrorCategory::Authorization => 100..=199,
                ErrorCategory::Validation => 200..=299,
                ErrorCategory::State => 300..=399,
                ErrorCategory::External => 400..=499,
                ErrorCategory::Arithmetic => 700..=799,
            };
            assert!(range.contains(&code), "{:?} has code {}", err, code);
        }
    }

    #[test]
    fn reasons_are_distinct_and_non_empty() {
        for (i, a) in ALL.iter().enumerate() {
            assert!(!a.reason().is_empty());
            for b in ALL.iter().skip(i + 1) {
                assert_ne!(a.reason(), b.reason());
            }
        }
    }

    #[test]
    fn user_facing_reasons_match_front_end_strings() {
        assert_eq!(
            LendingError::BorrowExceedsMax.reason(),
            "Borrow amount exceeds maximum allowed"
        );
        assert_eq!(LendingError::RepayExceedsDebt.reason(), "Repay amount exceeds debt");
        assert_eq!(LendingError::Paused.reason(), "Contract is paused");
        assert_eq!(LendingError::Paused.category(), ErrorCategory::State);
        assert_eq!(LendingError::NotOwner.category(), ErrorCategory::Authorization);
    }
}
