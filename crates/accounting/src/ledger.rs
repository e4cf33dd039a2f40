use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use haya_core::AccountId;

use crate::balance::{AccountBalance, BalanceQuery};
use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::storage::Storage;
use crate::transaction::{BalanceCheck, Transaction};

/// Double-entry ledger over an injected [`Storage`].
///
/// ## Contract
///
/// - [`add_transaction`](Self::add_transaction) calls
///   [`Storage::save_transaction`] at most once, and never for a transaction
///   that fails the balance check.
/// - Storage errors come back as [`LedgerError::Storage`] without being
///   inspected, retried or logged.
/// - Balance queries sum exactly the entries [`BalanceQuery::matches`]
///   accepts. The result is stamped with the query's `as_of`.
///
/// ## Design
///
/// The ledger holds no balances and buffers no transactions. Everything it
/// reports is derived from the entry stream storage returns, so callers
/// sharing one storage across threads see the same answers.
#[derive(Debug)]
pub struct Ledger<S> {
    storage: S,
    config: LedgerConfig,
}

impl<S> Ledger<S>
where
    S: Storage,
{
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, LedgerConfig::default())
    }

    pub fn with_config(storage: S, config: LedgerConfig) -> Self {
        Self { storage, config }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> LedgerConfig {
        self.config
    }

    /// Validate a transaction and hand it to storage.
    ///
    /// Unbalanced transactions fail fast with the balance error and storage is
    /// not touched. Storage errors are returned unchanged.
    pub fn add_transaction(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        match transaction.check_balance() {
            BalanceCheck::Balanced => {}
            // Vacuously balanced: forwarded unless configured otherwise.
            BalanceCheck::Empty if !self.config.reject_empty_transactions => {}
            BalanceCheck::Empty => return Err(LedgerError::EmptyTransaction),
            BalanceCheck::SingleEntry => return Err(LedgerError::SingleEntryTransaction),
            BalanceCheck::Unbalanced { sum } => {
                return Err(LedgerError::UnbalancedTransaction { sum });
            }
        }

        self.storage.save_transaction(transaction)?;

        debug!(
            transaction_id = ?transaction.id(),
            transaction_type = ?transaction.transaction_type(),
            entries = transaction.len(),
            "transaction added"
        );
        Ok(())
    }

    /// Balance as of now. `include_closed` decides whether closing
    /// transactions count.
    pub fn get_current_account_balance(
        &self,
        account_id: AccountId,
        include_closed: bool,
    ) -> Result<AccountBalance, LedgerError> {
        self.account_balance(BalanceQuery::new(account_id, Utc::now(), include_closed))
    }

    /// Balance at `time`, leaving closing transactions out.
    pub fn get_account_balance_at(
        &self,
        account_id: AccountId,
        time: DateTime<Utc>,
    ) -> Result<AccountBalance, LedgerError> {
        self.account_balance(BalanceQuery::new(account_id, time, false))
    }

    /// Balance at `time`, closing transactions included.
    pub fn get_account_balance_closed_at(
        &self,
        account_id: AccountId,
        time: DateTime<Utc>,
    ) -> Result<AccountBalance, LedgerError> {
        self.account_balance(BalanceQuery::new(account_id, time, true))
    }

    /// One balance per account known to storage, ordered by account id.
    ///
    /// When every stored transaction is balanced the balances sum to zero.
    pub fn trial_balance(
        &self,
        as_of: DateTime<Utc>,
        include_closed: bool,
    ) -> Result<Vec<AccountBalance>, LedgerError> {
        let mut accounts = self.storage.list_accounts()?;
        accounts.sort_by_key(|a| a.id());

        accounts
            .iter()
            .map(|account| {
                let query = BalanceQuery::new(account.id(), as_of, include_closed);
                self.sum_entries(&query).map(|balance| AccountBalance {
                    account_id: account.id(),
                    account_type: account.account_type(),
                    balance,
                    timestamp: as_of,
                })
            })
            .collect()
    }

    fn account_balance(&self, query: BalanceQuery) -> Result<AccountBalance, LedgerError> {
        let account = self
            .storage
            .load_account(query.account_id)?
            .ok_or(LedgerError::AccountNotFound(query.account_id))?;

        let balance = self.sum_entries(&query)?;

        Ok(AccountBalance {
            account_id: account.id(),
            account_type: account.account_type(),
            balance,
            timestamp: query.as_of,
        })
    }

    fn sum_entries(&self, query: &BalanceQuery) -> Result<i128, LedgerError> {
        let entries = self.storage.load_entries(query)?;
        let balance: i128 = entries
            .iter()
            .map(|posted| i128::from(posted.entry.amount()))
            .sum();

        trace!(
            account_id = %query.account_id,
            as_of = %query.as_of,
            include_closing = query.include_closing,
            entries = entries.len(),
            balance = %balance,
            "account balance computed"
        );
        Ok(balance)
    }
}
