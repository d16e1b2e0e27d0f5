// ⚠️ ATM errors

use crate::denomination::Denomination;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AtmError {
    /// A stash carried a negative banknote count
    #[error("invalid amount: {count} notes of {denomination}")]
    InvalidAmount {
        denomination: Denomination,
        count: i64,
    },

    #[error("invalid withdrawal amount: {amount}")]
    InvalidWithdrawal { amount: i64 },

    #[error("withdrawal of {requested} exceeds limit of {limit}")]
    WithdrawalLimitExceeded { requested: i64, limit: i64 },

    /// No combination of the vault's banknotes sums to the request
    #[error("cannot pay out exactly {requested} (vault holds {available})")]
    InsufficientExactChange { requested: i64, available: i128 },

    #[error("banknote count overflow for {denomination}")]
    CountOverflow { denomination: Denomination },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
