//! CSPR-Leverage Contracts
//!
//! Casper-native collateral-backed lending: CSPR-collateralized sUSD loans
//! with monthly interest and post-maturity collateral capture.
//!
//! ## Architecture
//!
//! - **CollateralizedLeverage**: per-borrower loan registry, debt
//!   settlement and collateral escrow
//! - **StableUsd (sUSD)**: CEP-18 style stable token the loans are
//!   denominated in; the lending contract reaches it only through the
//!   `Cep18Token` interface
//! - **interest**: pure monthly-accrual debt math shared by the contract
//!   and its tests
//!
//! ## Loan lifecycle
//!
//! A borrower escrows CSPR with `new_loan_request`; a lender funds the
//! principal with `accept_loan_request`; the loan ends with `pay_debt`
//! (borrower reclaims collateral) or, after maturity, `capture_collateral`
//! (lender keeps the collateral). A completed slot can be reused by a
//! fresh request.

#![cfg_attr(target_arch = "wasm32", no_std)]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

// Re-export odra for downstream usage
pub use odra;

// Core module declarations
pub mod errors;
pub mod interest;
pub mod types;

// Contract modules
pub mod leverage;
pub mod stable_token;
