use serde::{Deserialize, Serialize};

use haya_core::{AccountId, ValueObject};

/// Signed amount in the smallest currency unit (e.g. cents).
pub type Amount = i64;

/// One immutable line of a transaction.
///
/// A positive amount increases the account, a negative amount decreases it.
/// Whether that is a debit or a credit follows from the account type; keeping
/// the signed form makes summation commutative and associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    account: AccountId,
    amount: Amount,
}

impl Entry {
    pub fn new(account: AccountId, amount: Amount) -> Self {
        Self { account, amount }
    }

    pub fn account(&self) -> AccountId {
        self.account
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn is_increase(&self) -> bool {
        self.amount > 0
    }

    pub fn is_decrease(&self) -> bool {
        self.amount < 0
    }
}

impl ValueObject for Entry {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_amount_is_neither_increase_nor_decrease() {
        let entry = Entry::new(AccountId::new(), 0);
        assert!(!entry.is_increase());
        assert!(!entry.is_decrease());
    }

    fn assert_value_object<T: ValueObject>(_: &T) {}

    #[test]
    fn entries_compare_by_value() {
        assert_value_object(&Entry::new(AccountId::new(), 1));

        let account = AccountId::new();
        assert_eq!(Entry::new(account, -100), Entry::new(account, -100));
        assert_ne!(Entry::new(account, -100), Entry::new(account, 100));
    }
}
