//! Common types used across the leverage protocol.

use odra::prelude::*;
use odra::casper_types::U512;

/// Lifecycle status of a borrower's loan slot
#[odra::odra_type]
#[derive(Copy, Default)]
pub enum LoanStatus {
    /// No loan has ever been requested for this borrower
    #[default]
    Undefined = 0,
    /// Collateral is escrowed, waiting for a lender
    Requested = 1,
    /// Principal disbursed, debt accruing
    Active = 2,
    /// Repaid or captured; the slot can be reused by a new request
    Completed = 3,
}

/// Loan record, one per borrower address.
///
/// `start_time` is set when the request is created and never changes: it is
/// both the interest clock and the maturity anchor, so acceptance timing does
/// not affect when the loan matures.
#[odra::odra_type]
pub struct LoanRecord {
    /// Escrowed collateral (in motes)
    pub amount: U512,
    /// Lifecycle status
    pub status: LoanStatus,
    /// Contracted loan period
    pub period_in_years: u64,
    /// Block time (ms) of the creating request
    pub start_time: u64,
    /// Assigned lender; the contract's own address while Requested
    pub lender: Address,
}
