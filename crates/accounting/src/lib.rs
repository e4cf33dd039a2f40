//! Accounting core (double-entry ledger).
//!
//! Pure domain logic only: no IO, no persistence. Storage is reached through the
//! [`Storage`] trait injected into a [`Ledger`].

pub mod account;
pub mod balance;
pub mod config;
pub mod entry;
pub mod error;
pub mod ledger;
pub mod metadata;
pub mod storage;
pub mod transaction;

pub use account::{Account, AccountType, BalanceSide};
pub use balance::{AccountBalance, BalanceQuery, PostedEntry};
pub use config::LedgerConfig;
pub use entry::{Amount, Entry};
pub use error::LedgerError;
pub use ledger::Ledger;
pub use metadata::{Metadata, MetadataLimits};
pub use storage::{Storage, StorageError};
pub use transaction::{BalanceCheck, Transaction, TransactionType};
