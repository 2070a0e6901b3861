#![no_std]

mod accrual;
mod constants;
mod contract;
mod custody;
mod errors;
mod events;
mod helpers;
mod math;
mod oracle;
mod pausable;
mod reflector;
mod risk;
mod storage;

pub use constants::*;
pub use contract::{CollateralLending, CollateralLendingClient};
pub use errors::{ErrorCategory, LendingError};
pub use events::*;
pub use reflector::{Asset, PriceData};
pub use storage::{AccountInfo, DebtInfo, LendingConfig, PriceQuote};
