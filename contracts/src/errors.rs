//! Protocol error definitions.

use odra::prelude::*;

/// Leverage protocol errors
#[odra::odra_error]
pub enum LeverageError {
    // Loan errors (1xx)
    BelowMinimumCollateral = 100,
    BelowMinimumPeriod = 101,
    InvalidState = 102,
    NotLender = 103,
    NotCapturable = 104,

    // Access control errors (2xx)
    NotOwner = 200,

    // Token errors (3xx)
    InsufficientBalance = 300,
    InsufficientAllowance = 301,
}

impl LeverageError {
    pub const fn message(&self) -> &'static str {
        match self {
            // Loan
            LeverageError::BelowMinimumCollateral => "at least 0.01 cspr",
            LeverageError::BelowMinimumPeriod => "at least 1 year",
            LeverageError::InvalidState => "invalid state",
            LeverageError::NotLender => "not lender",
            LeverageError::NotCapturable => "not capturable",

            // Access control
            LeverageError::NotOwner => "not owner",

            // Token
            LeverageError::InsufficientBalance => "insufficient balance",
            LeverageError::InsufficientAllowance => "insufficient allowance",
        }
    }
}

impl core::fmt::Display for LeverageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}
