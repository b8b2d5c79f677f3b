//! CSPR-Leverage Integration Tests
//!
//! End-to-end loan lifecycle scenarios driven entirely through the public
//! entry points on the Odra host VM.

#[cfg(test)]
mod lifecycle {
    use cspr_leverage_contracts::errors::LeverageError;
    use cspr_leverage_contracts::interest;
    use cspr_leverage_contracts::leverage::{
        events, CollateralizedLeverage, CollateralizedLeverageHostRef,
        CollateralizedLeverageInitArgs, MIN_COLLATERAL, SUSD_CSPR_MULTIPLIER,
    };
    use cspr_leverage_contracts::stable_token::{StableUsd, StableUsdHostRef};
    use cspr_leverage_contracts::types::LoanStatus;
    use odra::casper_types::{U256, U512};
    use odra::host::{Deployer, HostEnv, HostRef, NoArgs};
    use odra::prelude::*;
    use pretty_assertions::assert_eq;

    const ONE_MONTH: u64 = interest::MONTH_IN_MILLIS;

    struct Fixture {
        env: HostEnv,
        token: StableUsdHostRef,
        leverage: CollateralizedLeverageHostRef,
        admin: Address,
        borrower: Address,
        lender: Address,
    }

    fn fixture() -> Fixture {
        let env = odra_test::env();
        let admin = env.get_account(0);
        let borrower = env.get_account(1);
        let lender = env.get_account(2);

        env.set_caller(admin);
        let token = StableUsd::deploy(&env, NoArgs);
        env.set_caller(admin);
        let leverage = CollateralizedLeverage::deploy(
            &env,
            CollateralizedLeverageInitArgs {
                stable_token: *token.address(),
            },
        );

        Fixture {
            env,
            token,
            leverage,
            admin,
            borrower,
            lender,
        }
    }

    impl Fixture {
        fn open_request(&mut self, amount: u64, years: u64) {
            self.env.set_caller(self.borrower);
            self.leverage
                .with_tokens(U512::from(amount))
                .new_loan_request(years);
        }

        fn fund_lender(&mut self, amount: U256) {
            self.env.set_caller(self.admin);
            self.token.mint(self.lender, amount);
            self.env.set_caller(self.lender);
            self.token.approve(*self.leverage.address(), amount);
        }

        fn accept(&mut self) {
            self.env.set_caller(self.lender);
            self.leverage.accept_loan_request(self.borrower);
        }

        fn status(&self) -> LoanStatus {
            self.leverage
                .get_loan_record(self.borrower)
                .map(|r| r.status)
                .unwrap_or_default()
        }
    }

    /// The repayment walkthrough: request, accept, let three months pass,
    /// settle the debt and reclaim the collateral.
    #[test]
    fn test_loan_repaid_after_three_months() {
        let mut f = fixture();
        let principal = interest::principal_for(U512::from(MIN_COLLATERAL), SUSD_CSPR_MULTIPLIER);

        f.open_request(MIN_COLLATERAL, 1);
        assert_eq!(f.status(), LoanStatus::Requested);

        f.fund_lender(principal);
        f.accept();
        assert_eq!(f.status(), LoanStatus::Active);
        assert_eq!(f.token.balance_of(f.borrower), principal);

        f.env.advance_block_time(3 * ONE_MONTH);

        f.env.set_caller(f.borrower);
        let debt = f.leverage.current_debt();
        assert!(debt > principal);
        assert_eq!(debt, principal * U256::from(130u64) / U256::from(100u64));

        // The borrower holds the principal; mint the interest share on top.
        f.env.set_caller(f.admin);
        f.token.mint(f.borrower, debt - principal);
        f.env.set_caller(f.borrower);
        f.token.approve(*f.leverage.address(), debt);

        let borrower_cspr = f.env.balance_of(&f.borrower);
        f.env.set_caller(f.borrower);
        f.leverage.pay_debt();

        assert_eq!(f.status(), LoanStatus::Completed);
        assert_eq!(f.token.balance_of(f.lender), debt);
        assert_eq!(f.token.balance_of(f.borrower), U256::zero());
        assert_eq!(
            f.env.balance_of(&f.borrower) - borrower_cspr,
            U512::from(MIN_COLLATERAL)
        );
        assert!(f.env.emitted_event(
            f.leverage.address(),
            &events::LoanCompleted {
                borrower: f.borrower,
                lender: f.lender,
            }
        ));
    }

    /// The default walkthrough: the loan is never repaid, the lender waits
    /// out the full period and seizes the collateral.
    #[test]
    fn test_unpaid_loan_captured_after_maturity() {
        let mut f = fixture();
        let principal = interest::principal_for(U512::from(MIN_COLLATERAL), SUSD_CSPR_MULTIPLIER);

        f.open_request(MIN_COLLATERAL, 1);
        f.fund_lender(principal);
        f.accept();

        assert!(!f.leverage.is_capturable(f.borrower));

        f.env.advance_block_time(12 * ONE_MONTH);
        assert!(f.leverage.is_capturable(f.borrower));

        let lender_cspr = f.env.balance_of(&f.lender);
        let lender_susd = f.token.balance_of(f.lender);

        f.env.set_caller(f.lender);
        f.leverage.capture_collateral(f.borrower);

        assert_eq!(f.status(), LoanStatus::Completed);
        assert_eq!(
            f.env.balance_of(&f.lender) - lender_cspr,
            U512::from(MIN_COLLATERAL)
        );
        // Capture moves no sUSD
        assert_eq!(f.token.balance_of(f.lender), lender_susd);
        assert_eq!(f.token.balance_of(f.borrower), principal);
        assert!(f.env.emitted_event(
            f.leverage.address(),
            &events::LoanCaptured {
                borrower: f.borrower,
                lender: f.lender,
            }
        ));
    }

    /// Debt keeps growing past maturity: the delayed tier stacks on top of
    /// the fully accrued base tier.
    #[test]
    fn test_debt_grows_through_both_tiers() {
        let mut f = fixture();
        let principal = interest::principal_for(U512::from(MIN_COLLATERAL), SUSD_CSPR_MULTIPLIER);

        f.open_request(MIN_COLLATERAL, 1);
        f.fund_lender(principal);
        f.accept();

        let mut previous = U256::zero();
        for _ in 0..14 {
            f.env.set_caller(f.borrower);
            let debt = f.leverage.current_debt();
            assert!(debt >= previous);
            previous = debt;
            f.env.advance_block_time(ONE_MONTH);
        }

        // 14 whole months on a 1-year loan: 12 * 10% base + 2 * 5% delayed
        f.env.set_caller(f.borrower);
        let debt = f.leverage.current_debt();
        assert_eq!(debt, principal * U256::from(230u64) / U256::from(100u64));
    }

    /// A borrower who cannot cover the accrued debt cannot repay: the token
    /// failure aborts the whole operation and the loan stays Active.
    #[test]
    fn test_pay_debt_aborts_when_borrower_cannot_cover_interest() {
        let mut f = fixture();
        let principal = interest::principal_for(U512::from(MIN_COLLATERAL), SUSD_CSPR_MULTIPLIER);

        f.open_request(MIN_COLLATERAL, 1);
        f.fund_lender(principal);
        f.accept();

        f.env.advance_block_time(ONE_MONTH);

        // Approve more than the balance: the pull fails on balance, not
        // allowance, and nothing settles.
        f.env.set_caller(f.borrower);
        f.token
            .approve(*f.leverage.address(), principal * U256::from(2u64));

        f.env.set_caller(f.borrower);
        assert_eq!(
            f.leverage.try_pay_debt(),
            Err(LeverageError::InsufficientBalance.into())
        );
        assert_eq!(f.status(), LoanStatus::Active);
        assert_eq!(f.token.balance_of(f.borrower), principal);
    }

    /// Loan slots are per borrower: two borrowers run independent loans
    /// against the same lender without contention.
    #[test]
    fn test_borrower_slots_are_independent() {
        let mut f = fixture();
        let other = f.env.get_account(3);
        let principal = interest::principal_for(U512::from(MIN_COLLATERAL), SUSD_CSPR_MULTIPLIER);

        f.open_request(MIN_COLLATERAL, 1);

        f.env.set_caller(other);
        f.leverage
            .with_tokens(U512::from(2 * MIN_COLLATERAL))
            .new_loan_request(2);

        f.fund_lender(principal);
        f.accept();

        assert_eq!(f.status(), LoanStatus::Active);
        let other_record = f.leverage.get_loan_record(other).unwrap();
        assert_eq!(other_record.status, LoanStatus::Requested);
        assert_eq!(other_record.amount, U512::from(2 * MIN_COLLATERAL));
    }

    /// A completed slot is history, not a tombstone: the same borrower can
    /// open a fresh request and drive it through a second full cycle.
    #[test]
    fn test_full_second_cycle_after_completion() {
        let mut f = fixture();
        let principal = interest::principal_for(U512::from(MIN_COLLATERAL), SUSD_CSPR_MULTIPLIER);

        // First cycle ends in repayment at zero elapsed months.
        f.open_request(MIN_COLLATERAL, 1);
        f.fund_lender(principal);
        f.accept();
        f.env.set_caller(f.borrower);
        f.token.approve(*f.leverage.address(), principal);
        f.env.set_caller(f.borrower);
        f.leverage.pay_debt();
        assert_eq!(f.status(), LoanStatus::Completed);

        // Second cycle over the same slot ends in capture.
        f.open_request(MIN_COLLATERAL, 1);
        assert_eq!(f.status(), LoanStatus::Requested);
        f.fund_lender(principal);
        f.accept();
        f.env.advance_block_time(12 * ONE_MONTH);
        f.env.set_caller(f.lender);
        f.leverage.capture_collateral(f.borrower);
        assert_eq!(f.status(), LoanStatus::Completed);
    }
}
