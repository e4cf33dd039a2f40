//! Derived balances and the definition of which entries feed them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use haya_core::{AccountId, TransactionId};

use crate::account::AccountType;
use crate::entry::Entry;
use crate::transaction::{Transaction, TransactionType};

/// Read model: balance of one account at one point in time.
///
/// Never stored; computed from the entry stream on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub account_id: AccountId,
    pub account_type: AccountType,
    /// Signed sum of qualifying entry amounts (positive = net increase).
    pub balance: i128,
    pub timestamp: DateTime<Utc>,
}

/// An entry as handed back by storage, with the context of its transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedEntry {
    pub transaction_id: TransactionId,
    pub timestamp: DateTime<Utc>,
    pub transaction_type: TransactionType,
    pub entry: Entry,
}

impl PostedEntry {
    /// Flatten a stored transaction into its posted entries.
    pub fn from_transaction(
        transaction_id: TransactionId,
        transaction: &Transaction,
    ) -> impl Iterator<Item = PostedEntry> + '_ {
        transaction.entries().iter().map(move |entry| PostedEntry {
            transaction_id,
            timestamp: transaction.timestamp(),
            transaction_type: transaction.transaction_type(),
            entry: *entry,
        })
    }
}

/// Which entries count toward an account balance.
///
/// An entry qualifies when it targets `account_id` and its transaction's
/// timestamp is `<= as_of`. Entries of closing transactions are left out
/// unless `include_closing` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceQuery {
    pub account_id: AccountId,
    pub as_of: DateTime<Utc>,
    pub include_closing: bool,
}

impl BalanceQuery {
    pub fn new(account_id: AccountId, as_of: DateTime<Utc>, include_closing: bool) -> Self {
        Self {
            account_id,
            as_of,
            include_closing,
        }
    }

    pub fn matches(&self, posted: &PostedEntry) -> bool {
        posted.entry.account() == self.account_id
            && posted.timestamp <= self.as_of
            && (self.include_closing || posted.transaction_type != TransactionType::Closing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn posted(
        account: AccountId,
        at: DateTime<Utc>,
        transaction_type: TransactionType,
    ) -> PostedEntry {
        PostedEntry {
            transaction_id: TransactionId::new(),
            timestamp: at,
            transaction_type,
            entry: Entry::new(account, 10),
        }
    }

    #[test]
    fn cutoff_is_inclusive() {
        let account = AccountId::new();
        let now = Utc::now();
        let query = BalanceQuery::new(account, now, false);

        assert!(query.matches(&posted(account, now, TransactionType::Regular)));
        let later = now + Duration::seconds(1);
        assert!(!query.matches(&posted(account, later, TransactionType::Regular)));
    }

    #[test]
    fn closing_entries_only_count_when_requested() {
        let account = AccountId::new();
        let now = Utc::now();
        let closing = posted(account, now - Duration::days(1), TransactionType::Closing);

        assert!(!BalanceQuery::new(account, now, false).matches(&closing));
        assert!(BalanceQuery::new(account, now, true).matches(&closing));
    }

    #[test]
    fn other_accounts_never_match() {
        let now = Utc::now();
        let query = BalanceQuery::new(AccountId::new(), now, true);
        assert!(!query.matches(&posted(AccountId::new(), now, TransactionType::Regular)));
    }

    #[test]
    fn flattening_keeps_transaction_context() {
        let now = Utc::now();
        let id = TransactionId::new();
        let mut tx = Transaction::closing(now);
        tx.add_entries([Entry::new(AccountId::new(), -5), Entry::new(AccountId::new(), 5)]);

        let flat: Vec<_> = PostedEntry::from_transaction(id, &tx).collect();
        assert_eq!(flat.len(), 2);
        assert!(flat.iter().all(|p| p.transaction_id == id
            && p.timestamp == now
            && p.transaction_type == TransactionType::Closing));
        assert_eq!(flat[0].entry.amount(), -5);
    }
}
