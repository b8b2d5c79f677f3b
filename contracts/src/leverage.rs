//! Collateralized leverage contract.
//!
//! A borrower escrows CSPR and opens a loan request; a lender funds it with
//! sUSD sized at half the collateral's value; the debt accrues monthly
//! interest until it is repaid, and once the contracted period has elapsed
//! an unpaid loan's collateral can be captured by the lender.
//!
//! Each borrower address owns exactly one loan slot:
//!
//! | Status    | Entered by             | Left by                        |
//! |-----------|------------------------|--------------------------------|
//! | Undefined | (initial)              | `new_loan_request`             |
//! | Requested | `new_loan_request`     | `accept_loan_request`          |
//! | Active    | `accept_loan_request`  | `pay_debt`, `capture_collateral` |
//! | Completed | `pay_debt`, `capture_collateral` | `new_loan_request`   |
//!
//! Every state-changing entry point commits its record mutation before any
//! external transfer, so a reentrant call through the token contract always
//! observes the post-transition record.

use odra::prelude::*;
use odra::casper_types::{U256, U512};
use odra::ContractRef;
use crate::errors::LeverageError;
use crate::interest;
use crate::stable_token::{Cep18Token, Cep18TokenContractRef};
use crate::types::{LoanRecord, LoanStatus};

/// Interest per elapsed whole month, percent of principal
pub const MONTHLY_INTEREST_RATE: u64 = 10;
/// Additional interest per whole month past maturity, percent of principal
pub const MONTHLY_DELAYED_INTEREST_RATE: u64 = 5;
/// sUSD smallest units lent per mote of collateral value
pub const SUSD_CSPR_MULTIPLIER: u64 = 1294;
/// Minimum collateral: 0.01 CSPR in motes
pub const MIN_COLLATERAL: u64 = 10_000_000;
/// Minimum loan period
pub const MIN_PERIOD_IN_YEARS: u64 = 1;

pub mod events {
    use odra::prelude::*;
    use odra::casper_types::U512;

    #[odra::event]
    pub struct NewLoanRequest {
        pub borrower: Address,
        pub amount: U512,
        pub period_in_years: u64,
    }

    #[odra::event]
    pub struct LoanRequestAccepted {
        pub borrower: Address,
        pub lender: Address,
    }

    #[odra::event]
    pub struct LoanCompleted {
        pub borrower: Address,
        pub lender: Address,
    }

    #[odra::event]
    pub struct LoanCaptured {
        pub borrower: Address,
        pub lender: Address,
    }
}

/// Collateralized leverage contract
#[odra::module(events = [
    events::NewLoanRequest,
    events::LoanRequestAccepted,
    events::LoanCompleted,
    events::LoanCaptured
])]
pub struct CollateralizedLeverage {
    /// Administrative owner, set at deployment; used only by `terminate`
    owner: Var<Address>,
    /// sUSD token contract address
    stable_token: Var<Address>,
    /// One loan record per borrower
    loan_records: Mapping<Address, LoanRecord>,
}

#[odra::module]
impl CollateralizedLeverage {
    /// Initialize the contract
    pub fn init(&mut self, stable_token: Address) {
        self.owner.set(self.env().caller());
        self.stable_token.set(stable_token);
    }

    // ========== State-Changing Entry Points ==========

    /// Open a loan request, escrowing the attached CSPR as collateral.
    ///
    /// Allowed when the caller has no loan slot yet or a Completed one;
    /// Requested and Active slots cannot be overwritten.
    #[odra(payable)]
    pub fn new_loan_request(&mut self, period_in_years: u64) {
        let borrower = self.env().caller();
        let amount = self.env().attached_value();

        if amount < U512::from(MIN_COLLATERAL) {
            self.env().revert(LeverageError::BelowMinimumCollateral);
        }
        if period_in_years < MIN_PERIOD_IN_YEARS {
            self.env().revert(LeverageError::BelowMinimumPeriod);
        }
        match self.status_of(borrower) {
            LoanStatus::Undefined | LoanStatus::Completed => {}
            _ => self.env().revert(LeverageError::InvalidState),
        }

        let record = LoanRecord {
            amount,
            status: LoanStatus::Requested,
            period_in_years,
            start_time: self.env().get_block_time(),
            lender: self.env().self_address(),
        };
        self.loan_records.set(&borrower, record);

        self.env().emit_event(events::NewLoanRequest {
            borrower,
            amount,
            period_in_years,
        });
    }

    /// Fund a requested loan: the caller becomes the lender and disburses
    /// the principal (half the collateral at the fixed multiplier) to the
    /// borrower. Requires a prior sUSD approval for this contract.
    pub fn accept_loan_request(&mut self, borrower: Address) {
        let lender = self.env().caller();
        let mut record = match self.loan_records.get(&borrower) {
            Some(r) if r.status == LoanStatus::Requested => r,
            _ => self.env().revert(LeverageError::InvalidState),
        };

        let principal = interest::principal_for(record.amount, SUSD_CSPR_MULTIPLIER);

        // Transition first; the token pull is an external call.
        record.status = LoanStatus::Active;
        record.lender = lender;
        self.loan_records.set(&borrower, record);

        self.stable_token_ref().transfer_from(lender, borrower, principal);

        self.env().emit_event(events::LoanRequestAccepted { borrower, lender });
    }

    /// Repay the outstanding debt and reclaim the escrowed collateral.
    /// The caller is the borrower; requires a prior sUSD approval covering
    /// the current debt.
    pub fn pay_debt(&mut self) {
        let borrower = self.env().caller();
        let mut record = match self.loan_records.get(&borrower) {
            Some(r) if r.status == LoanStatus::Active => r,
            _ => self.env().revert(LeverageError::InvalidState),
        };

        let debt = self.debt_for(&record);
        let lender = record.lender;
        let amount = record.amount;

        // Transition first; the token pull is an external call.
        record.status = LoanStatus::Completed;
        self.loan_records.set(&borrower, record);

        self.stable_token_ref().transfer_from(borrower, lender, debt);
        self.env().transfer_tokens(&borrower, &amount);

        self.env().emit_event(events::LoanCompleted { borrower, lender });
    }

    /// Seize the collateral of a matured, unpaid loan. Only the assigned
    /// lender may capture, and never before maturity. The debt is written
    /// off; no sUSD moves.
    pub fn capture_collateral(&mut self, borrower: Address) {
        let caller = self.env().caller();
        let mut record = match self.loan_records.get(&borrower) {
            Some(r) if r.status == LoanStatus::Active => r,
            _ => self.env().revert(LeverageError::InvalidState),
        };

        if caller != record.lender {
            self.env().revert(LeverageError::NotLender);
        }
        let now = self.env().get_block_time();
        if !interest::is_past_maturity(record.start_time, record.period_in_years, now) {
            self.env().revert(LeverageError::NotCapturable);
        }

        let lender = record.lender;
        let amount = record.amount;

        record.status = LoanStatus::Completed;
        self.loan_records.set(&borrower, record);

        self.env().transfer_tokens(&lender, &amount);

        self.env().emit_event(events::LoanCaptured { borrower, lender });
    }

    /// Sweep the contract's CSPR balance to the owner (teardown path).
    pub fn terminate(&mut self) {
        self.require_owner();
        let owner = self.env().caller();
        let balance = self.env().self_balance();
        if balance > U512::zero() {
            self.env().transfer_tokens(&owner, &balance);
        }
    }

    // ========== View Entry Points ==========

    /// Outstanding debt of the caller's loan; zero unless the loan is Active.
    pub fn current_debt(&self) -> U256 {
        let borrower = self.env().caller();
        match self.loan_records.get(&borrower) {
            Some(r) if r.status == LoanStatus::Active => self.debt_for(&r),
            _ => U256::zero(),
        }
    }

    /// Whether a borrower's loan is Active and past its contracted maturity.
    /// Caller-independent; capture itself additionally requires the lender.
    pub fn is_capturable(&self, borrower: Address) -> bool {
        match self.loan_records.get(&borrower) {
            Some(r) if r.status == LoanStatus::Active => interest::is_past_maturity(
                r.start_time,
                r.period_in_years,
                self.env().get_block_time(),
            ),
            _ => false,
        }
    }

    /// Get a borrower's loan record
    pub fn get_loan_record(&self, borrower: Address) -> Option<LoanRecord> {
        self.loan_records.get(&borrower)
    }

    /// Get the contract owner
    pub fn owner(&self) -> Option<Address> {
        self.owner.get()
    }

    /// Get the sUSD token address
    pub fn stable_token(&self) -> Option<Address> {
        self.stable_token.get()
    }

    // ========== Constants ==========

    /// Monthly interest rate in percent
    pub fn monthly_interest_rate(&self) -> u64 {
        MONTHLY_INTEREST_RATE
    }

    /// Monthly delayed interest rate in percent
    pub fn monthly_delayed_interest_rate(&self) -> u64 {
        MONTHLY_DELAYED_INTEREST_RATE
    }

    /// sUSD units per mote of collateral value
    pub fn susd_cspr_multiplier(&self) -> u64 {
        SUSD_CSPR_MULTIPLIER
    }

    /// Minimum collateral in motes
    pub fn min_collateral(&self) -> U512 {
        U512::from(MIN_COLLATERAL)
    }

    /// Minimum loan period
    pub fn min_period_in_years(&self) -> u64 {
        MIN_PERIOD_IN_YEARS
    }

    // ========== Internal ==========

    fn status_of(&self, borrower: Address) -> LoanStatus {
        self.loan_records
            .get(&borrower)
            .map(|r| r.status)
            .unwrap_or_default()
    }

    fn debt_for(&self, record: &LoanRecord) -> U256 {
        let principal = interest::principal_for(record.amount, SUSD_CSPR_MULTIPLIER);
        interest::current_debt(
            principal,
            MONTHLY_INTEREST_RATE,
            MONTHLY_DELAYED_INTEREST_RATE,
            record.start_time,
            record.period_in_years,
            self.env().get_block_time(),
        )
        .total
    }

    fn stable_token_ref(&self) -> Cep18TokenContractRef {
        let token = self
            .stable_token
            .get()
            .unwrap_or_else(|| self.env().self_address());
        Cep18TokenContractRef::new(self.env().clone(), token)
    }

    fn require_owner(&self) {
        if self.owner.get() != Some(self.env().caller()) {
            self.env().revert(LeverageError::NotOwner);
        }
    }
}
