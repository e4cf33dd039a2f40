//! Persistence boundary consumed by the [`Ledger`](crate::Ledger).
//!
//! The ledger validates, storage persists. Implementations may reject a save
//! for their own reasons; those errors travel back to the caller unexamined.

use std::sync::Arc;

use thiserror::Error;

use haya_core::{AccountId, TransactionId};

use crate::account::Account;
use crate::balance::{BalanceQuery, PostedEntry};
use crate::transaction::Transaction;

/// Storage operation error.
///
/// These are infrastructure errors, as opposed to the balance errors in
/// [`LedgerError`](crate::LedgerError).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("duplicate transaction: {0}")]
    DuplicateTransaction(TransactionId),

    #[error("duplicate account: {0}")]
    DuplicateAccount(AccountId),

    /// An entry or a child account referenced an account storage does not hold.
    #[error("unknown account: {0}")]
    UnknownAccount(AccountId),

    #[error("account {0} cannot be its own parent")]
    SelfParent(AccountId),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Other(String),
}

/// Storage capability injected into a ledger.
///
/// ## Contract
///
/// - `save_transaction` receives only transactions that already passed the
///   balance check. Storage assigns a [`TransactionId`] when the transaction
///   carries none.
/// - `load_entries` returns the entries for which [`BalanceQuery::matches`]
///   holds. Order is unspecified; balances are computed by summation.
/// - `load_account` returns `Ok(None)` for unknown accounts.
pub trait Storage: Send + Sync {
    fn save_transaction(&self, transaction: &Transaction) -> Result<(), StorageError>;

    fn load_account(&self, id: AccountId) -> Result<Option<Account>, StorageError>;

    fn list_accounts(&self) -> Result<Vec<Account>, StorageError>;

    fn load_entries(&self, query: &BalanceQuery) -> Result<Vec<PostedEntry>, StorageError>;
}

impl<S> Storage for Arc<S>
where
    S: Storage + ?Sized,
{
    fn save_transaction(&self, transaction: &Transaction) -> Result<(), StorageError> {
        (**self).save_transaction(transaction)
    }

    fn load_account(&self, id: AccountId) -> Result<Option<Account>, StorageError> {
        (**self).load_account(id)
    }

    fn list_accounts(&self) -> Result<Vec<Account>, StorageError> {
        (**self).list_accounts()
    }

    fn load_entries(&self, query: &BalanceQuery) -> Result<Vec<PostedEntry>, StorageError> {
        (**self).load_entries(query)
    }
}
