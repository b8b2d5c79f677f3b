//! Debt and maturity math for collateralized loans.
//!
//! Interest is charged on the disbursed principal per elapsed whole month:
//! - base tier: a fixed percentage per month, capped at the contracted
//!   number of months
//! - delayed tier: an additional percentage per whole month past maturity,
//!   on top of the fully accrued base tier
//!
//! Partial months do not accrue. The debt equals the principal exactly at
//! the loan clock start and never decreases as time passes.

use odra::prelude::*;
use odra::casper_types::{U256, U512};

/// 30 days in milliseconds (Casper block time is in milliseconds)
pub const MONTH_IN_MILLIS: u64 = 2_592_000_000;

/// A contract year is 12 thirty-day months
pub const MONTHS_PER_YEAR: u64 = 12;

/// Percent divisor
pub const PERCENT: u64 = 100;

/// Debt computation result
#[odra::odra_type]
pub struct DebtBreakdown {
    /// Principal disbursed at acceptance
    pub principal: U256,
    /// Interest accrued up to the contracted maturity
    pub base_interest: U256,
    /// Penalty interest accrued past maturity
    pub delayed_interest: U256,
    /// Total outstanding obligation
    pub total: U256,
}

/// Principal disbursed against a collateral deposit: half the collateral,
/// converted at the fixed multiplier. The halving happens before the
/// multiplication, matching the contract's lending terms exactly.
pub fn principal_for(collateral: U512, multiplier: u64) -> U256 {
    let motes = U256::from(collateral.as_u128());
    motes / U256::from(2u64) * U256::from(multiplier)
}

/// Whole months elapsed since `start_time`; zero when time has not advanced.
pub fn elapsed_months(start_time: u64, now: u64) -> u64 {
    if now <= start_time {
        return 0;
    }
    (now - start_time) / MONTH_IN_MILLIS
}

/// The instant the loan matures and becomes capturable.
pub fn maturity_time(start_time: u64, period_in_years: u64) -> u64 {
    start_time + period_in_years * MONTHS_PER_YEAR * MONTH_IN_MILLIS
}

/// Whether the contracted period has fully elapsed.
pub fn is_past_maturity(start_time: u64, period_in_years: u64, now: u64) -> bool {
    now >= maturity_time(start_time, period_in_years)
}

/// Compute the outstanding debt on a loan at `now`.
///
/// `monthly_rate` and `delayed_rate` are percentages of the principal per
/// whole month. The base tier stops growing once the contracted
/// `period_in_years * 12` months have elapsed; every further whole month
/// adds the delayed tier instead.
pub fn current_debt(
    principal: U256,
    monthly_rate: u64,
    delayed_rate: u64,
    start_time: u64,
    period_in_years: u64,
    now: u64,
) -> DebtBreakdown {
    let contract_months = period_in_years * MONTHS_PER_YEAR;
    let elapsed = elapsed_months(start_time, now);

    let base_months = elapsed.min(contract_months);
    let delayed_months = elapsed.saturating_sub(contract_months);

    let base_interest =
        principal * U256::from(monthly_rate) * U256::from(base_months) / U256::from(PERCENT);
    let delayed_interest =
        principal * U256::from(delayed_rate) * U256::from(delayed_months) / U256::from(PERCENT);

    DebtBreakdown {
        principal,
        base_interest,
        delayed_interest,
        total: principal + base_interest + delayed_interest,
    }
}
