//! Error taxonomy for the ledger core.
//!
//! Every operation aborts with one of these before or during its atomic unit
//! of work; nothing is retried inside the core.

use thiserror::Error;

use crate::core_types::Currency;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed amount, PIN, phone number or meter number.
    #[error("{0}")]
    Validation(String),

    /// Transaction PIN did not match the stored credential.
    #[error("invalid transaction PIN")]
    Authorization,

    #[error("insufficient balance in {0} wallet")]
    InsufficientFunds(Currency),

    /// Wallet, recipient, bank or plan does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Self-transfer, currency-mismatch misuse, duplicate wallet creation.
    #[error("{0}")]
    Conflict(String),

    /// Bank directory / name-enquiry failure, including rate limiting.
    /// Carries the provider's message.
    #[error("{0}")]
    ExternalService(String),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Stable category string for caller-facing failure payloads.
    pub fn category(&self) -> &'static str {
        match self {
            LedgerError::Validation(_) => "VALIDATION",
            LedgerError::Authorization => "AUTHORIZATION",
            LedgerError::InsufficientFunds(_) => "INSUFFICIENT_FUNDS",
            LedgerError::NotFound(_) => "NOT_FOUND",
            LedgerError::Conflict(_) => "CONFLICT",
            LedgerError::ExternalService(_) => "EXTERNAL_SERVICE",
            LedgerError::Storage(_) | LedgerError::Internal(_) => "INTERNAL",
        }
    }
}
