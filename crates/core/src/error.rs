//! Ledger error model.

use thiserror::Error;

use crate::store::StoreError;

/// Result type used across the ledger.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Failure of a single ledger invocation.
///
/// Every variant is terminal for the invocation; the engine never retries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The operation was called with the wrong number of arguments.
    #[error("incorrect number of arguments for {operation}: expecting {expected}, got {actual}")]
    ArgumentCount {
        operation: String,
        expected: usize,
        actual: usize,
    },

    /// An account read hit an absent key.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// Amount text did not parse as an integer, or the result overflowed.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Unknown operation name, or an unknown unit tag passed to `exchange`.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The underlying store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl LedgerError {
    pub fn argument_count(operation: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ArgumentCount {
            operation: operation.into(),
            expected,
            actual,
        }
    }

    pub fn account_not_found(account: impl Into<String>) -> Self {
        Self::AccountNotFound(account.into())
    }

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedOperation(msg.into())
    }

    /// Stable machine-readable code for responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ArgumentCount { .. } => "ARGUMENT_COUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::UnsupportedOperation(_) => "UNSUPPORTED_OPERATION",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    /// True when no store mutation can have happened before the failure.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}
