use std::collections::{BTreeMap, HashSet};
use std::sync::RwLock;

use tracing::debug;

use haya_accounting::{Account, BalanceQuery, PostedEntry, Storage, StorageError, Transaction};
use haya_core::{AccountId, TransactionId};

/// A transaction as held by storage, with its assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTransaction {
    pub id: TransactionId,
    pub transaction: Transaction,
}

#[derive(Debug, Default)]
struct Journal {
    transactions: Vec<StoredTransaction>,
    ids: HashSet<TransactionId>,
}

/// In-memory ledger storage.
///
/// Intended for tests/dev and embedding. Accounts are keyed by id;
/// transactions are kept in insertion order. Not optimized for large ledgers:
/// balance queries scan every stored entry.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    accounts: RwLock<BTreeMap<AccountId, Account>>,
    journal: RwLock<Journal>,
}

fn poisoned() -> StorageError {
    StorageError::Unavailable("lock poisoned".to_string())
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account.
    ///
    /// A parent must already be registered, so the parent/child relation can
    /// only ever form a tree.
    pub fn insert_account(&self, account: Account) -> Result<(), StorageError> {
        let mut accounts = self.accounts.write().map_err(|_| poisoned())?;

        if accounts.contains_key(&account.id()) {
            return Err(StorageError::DuplicateAccount(account.id()));
        }
        if let Some(parent) = account.parent() {
            if parent == account.id() {
                return Err(StorageError::SelfParent(parent));
            }
            if !accounts.contains_key(&parent) {
                return Err(StorageError::UnknownAccount(parent));
            }
        }

        debug!(
            account_id = %account.id(),
            account_type = %account.account_type(),
            "account registered"
        );
        accounts.insert(account.id(), account);
        Ok(())
    }

    /// Direct children of `parent`, in id order.
    pub fn children_of(&self, parent: AccountId) -> Result<Vec<Account>, StorageError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        Ok(accounts
            .values()
            .filter(|a| a.parent() == Some(parent))
            .cloned()
            .collect())
    }

    pub fn transaction_count(&self) -> Result<usize, StorageError> {
        let journal = self.journal.read().map_err(|_| poisoned())?;
        Ok(journal.transactions.len())
    }

    /// Snapshot of all stored transactions in insertion order.
    pub fn transactions(&self) -> Result<Vec<StoredTransaction>, StorageError> {
        let journal = self.journal.read().map_err(|_| poisoned())?;
        Ok(journal.transactions.clone())
    }
}

impl Storage for InMemoryStorage {
    fn save_transaction(&self, transaction: &Transaction) -> Result<(), StorageError> {
        {
            let accounts = self.accounts.read().map_err(|_| poisoned())?;
            if let Some(entry) = transaction
                .entries()
                .iter()
                .find(|e| !accounts.contains_key(&e.account()))
            {
                return Err(StorageError::UnknownAccount(entry.account()));
            }
        }

        let mut journal = self.journal.write().map_err(|_| poisoned())?;

        let id = transaction.id().unwrap_or_else(TransactionId::new);
        if !journal.ids.insert(id) {
            return Err(StorageError::DuplicateTransaction(id));
        }

        let transaction = match transaction.id() {
            Some(_) => transaction.clone(),
            None => transaction.clone().with_id(id),
        };
        journal.transactions.push(StoredTransaction { id, transaction });

        debug!(transaction_id = %id, total = journal.transactions.len(), "transaction stored");
        Ok(())
    }

    fn load_account(&self, id: AccountId) -> Result<Option<Account>, StorageError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        Ok(accounts.get(&id).cloned())
    }

    fn list_accounts(&self) -> Result<Vec<Account>, StorageError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        Ok(accounts.values().cloned().collect())
    }

    fn load_entries(&self, query: &BalanceQuery) -> Result<Vec<PostedEntry>, StorageError> {
        let journal = self.journal.read().map_err(|_| poisoned())?;
        Ok(journal
            .transactions
            .iter()
            .filter(|stored| stored.transaction.timestamp() <= query.as_of)
            .flat_map(|stored| PostedEntry::from_transaction(stored.id, &stored.transaction))
            .filter(|posted| query.matches(posted))
            .collect())
    }
}
