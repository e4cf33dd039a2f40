use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use haya_core::{AccountId, JournalId, TransactionId};

use crate::entry::Entry;
use crate::error::LedgerError;
use crate::metadata::{Metadata, MetadataLimits};

/// Kind of transaction.
///
/// Closing transactions zero out or roll over period-end balances. They are
/// validated exactly like regular ones; the tag only matters to balance
/// queries, which may leave them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Regular,
    Closing,
}

/// Outcome of evaluating the balance invariant on a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceCheck {
    /// No entries. Vacuously balanced, but flagged.
    Empty,
    /// Exactly one entry. Can never balance.
    SingleEntry,
    /// Two or more entries summing to zero.
    Balanced,
    /// Two or more entries with a non-zero sum.
    Unbalanced { sum: i128 },
}

impl BalanceCheck {
    pub fn is_balanced(self) -> bool {
        matches!(self, BalanceCheck::Empty | BalanceCheck::Balanced)
    }

    pub fn error(self) -> Option<LedgerError> {
        match self {
            BalanceCheck::Empty => Some(LedgerError::EmptyTransaction),
            BalanceCheck::SingleEntry => Some(LedgerError::SingleEntryTransaction),
            BalanceCheck::Balanced => None,
            BalanceCheck::Unbalanced { sum } => Some(LedgerError::UnbalancedTransaction { sum }),
        }
    }
}

/// A set of entries posted together at one point in time.
///
/// ## Contract
///
/// - Entries can only be appended. Corrections are made by adding offsetting
///   entries, never by editing or removing existing ones.
/// - The balance invariant (entries sum to zero) is checked on demand, so a
///   transaction may be transiently unbalanced while it is being built.
/// - The id is never generated here. It is set with [`with_id`](Self::with_id)
///   or assigned by storage on save.
/// - Metadata always satisfies the transaction's current [`MetadataLimits`].
///
/// ## Design
///
/// Amounts are `i64`; every sum is widened to `i128` before adding, so no
/// realistic entry count can overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: Option<TransactionId>,
    journal: Option<JournalId>,
    timestamp: DateTime<Utc>,
    transaction_type: TransactionType,
    entries: Vec<Entry>,
    metadata: Metadata,
}

impl Transaction {
    pub fn new(timestamp: DateTime<Utc>, transaction_type: TransactionType) -> Self {
        Self {
            id: None,
            journal: None,
            timestamp,
            transaction_type,
            // A balanced transaction has at least two entries.
            entries: Vec::with_capacity(2),
            metadata: Metadata::default(),
        }
    }

    pub fn regular(timestamp: DateTime<Utc>) -> Self {
        Self::new(timestamp, TransactionType::Regular)
    }

    pub fn closing(timestamp: DateTime<Utc>) -> Self {
        Self::new(timestamp, TransactionType::Closing)
    }

    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_journal(mut self, journal: JournalId) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Replace the metadata bounds, keeping existing annotations.
    ///
    /// Fails with [`LedgerError::Domain`] if an existing annotation does not
    /// fit the new bounds.
    pub fn with_metadata_limits(mut self, limits: MetadataLimits) -> Result<Self, LedgerError> {
        let mut metadata = Metadata::with_limits(limits);
        for (k, v) in self.metadata.iter() {
            metadata.insert(k, v)?;
        }
        self.metadata = metadata;
        Ok(self)
    }

    pub fn id(&self) -> Option<TransactionId> {
        self.id
    }

    pub fn journal(&self) -> Option<JournalId> {
        self.journal
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn is_closing(&self) -> bool {
        self.transaction_type == TransactionType::Closing
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn add_entries(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.entries.extend(entries);
    }

    /// Insert or replace an annotation, returning the previous value.
    pub fn insert_metadata(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, LedgerError> {
        Ok(self.metadata.insert(key, value)?)
    }

    /// Sum of all entry amounts.
    pub fn sum(&self) -> i128 {
        self.entries.iter().map(|e| i128::from(e.amount())).sum()
    }

    /// Sum of all positive amounts. `0` when there are none.
    pub fn total_increases(&self) -> i128 {
        self.entries
            .iter()
            .filter(|e| e.is_increase())
            .map(|e| i128::from(e.amount()))
            .sum()
    }

    /// Sum of all negative amounts.
    ///
    /// **The result is `<= 0`, not a magnitude.** Callers computing turnover
    /// must negate it themselves; `total_increases() + total_decreases()`
    /// always equals [`sum`](Self::sum).
    pub fn total_decreases(&self) -> i128 {
        self.entries
            .iter()
            .filter(|e| e.is_decrease())
            .map(|e| i128::from(e.amount()))
            .sum()
    }

    /// Net effect of this transaction on one account.
    pub fn net_change_for(&self, account: AccountId) -> i128 {
        self.entries
            .iter()
            .filter(|e| e.account() == account)
            .map(|e| i128::from(e.amount()))
            .sum()
    }

    /// Evaluate the balance invariant against the current entries.
    pub fn check_balance(&self) -> BalanceCheck {
        match self.entries.len() {
            0 => BalanceCheck::Empty,
            1 => BalanceCheck::SingleEntry,
            _ => match self.sum() {
                0 => BalanceCheck::Balanced,
                sum => BalanceCheck::Unbalanced { sum },
            },
        }
    }

    /// Whether the transaction is balanced, plus the reason when it is not
    /// cleanly so.
    ///
    /// | entries | sum  | balanced | error                    |
    /// |---------|------|----------|--------------------------|
    /// | 0       |      | `true`   | `EmptyTransaction`       |
    /// | 1       | any  | `false`  | `SingleEntryTransaction` |
    /// | >= 2    | 0    | `true`   | none                     |
    /// | >= 2    | != 0 | `false`  | `UnbalancedTransaction`  |
    ///
    /// An empty transaction is reported as balanced *with* an error so callers
    /// can tell "nothing to validate" from "validated and correct".
    pub fn is_balanced(&self) -> (bool, Option<LedgerError>) {
        let check = self.check_balance();
        (check.is_balanced(), check.error())
    }
}
