use thiserror::Error;

use haya_core::{AccountId, DomainError};

use crate::storage::StorageError;

/// Error returned by transaction validation and ledger operations.
///
/// Every variant is recoverable by the caller; none of them is logged or
/// retried by the ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("transaction has no entries")]
    EmptyTransaction,

    #[error("transaction has only one entry")]
    SingleEntryTransaction,

    /// `sum` is the non-zero total of all entry amounts.
    #[error("transaction is unbalanced")]
    UnbalancedTransaction { sum: i128 },

    #[error("account not found: {0}")]
    AccountNotFound(AccountId),

    /// Metadata rejected by its bounds.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Relayed verbatim from the storage collaborator.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_errors_use_fixed_messages() {
        assert_eq!(
            LedgerError::EmptyTransaction.to_string(),
            "transaction has no entries"
        );
        assert_eq!(
            LedgerError::SingleEntryTransaction.to_string(),
            "transaction has only one entry"
        );
        assert_eq!(
            LedgerError::UnbalancedTransaction { sum: 100 }.to_string(),
            "transaction is unbalanced"
        );
    }

    #[test]
    fn storage_errors_convert_unchanged() {
        let source = StorageError::Unavailable("disk full".to_string());
        let err: LedgerError = source.clone().into();
        assert_eq!(err.to_string(), source.to_string());
        assert_eq!(err, LedgerError::Storage(source));
    }

    #[test]
    fn domain_errors_keep_their_message() {
        let err: LedgerError = DomainError::validation("metadata key must not be empty").into();
        assert_eq!(err.to_string(), "validation failed: metadata key must not be empty");
    }
}
