use serde::{Deserialize, Serialize};

use haya_core::{AccountId, Entity};

/// High-level account type (determines the normal balance side).
///
/// The type only matters for reporting; the balance invariant of a
/// transaction is type-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// Resources owned by the business.
    Asset,
    /// Costs incurred by the business.
    Expense,
    /// Obligations of the business.
    Liability,
    /// The owner's claim on the assets of the business.
    Equity,
    /// Income earned by the business.
    Revenue,
}

/// Side of the books a balance is reported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceSide {
    Debit,
    Credit,
}

impl AccountType {
    pub const ALL: [AccountType; 5] = [
        AccountType::Asset,
        AccountType::Expense,
        AccountType::Liability,
        AccountType::Equity,
        AccountType::Revenue,
    ];

    /// The side on which an increase of this account type is recorded.
    pub fn normal_side(self) -> BalanceSide {
        match self {
            AccountType::Asset | AccountType::Expense => BalanceSide::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Revenue => {
                BalanceSide::Credit
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccountType::Asset => "Asset",
            AccountType::Expense => "Expense",
            AccountType::Liability => "Liability",
            AccountType::Equity => "Equity",
            AccountType::Revenue => "Revenue",
        }
    }
}

impl core::fmt::Display for AccountType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in the chart of accounts.
///
/// Accounts form a tree: a parent may have many children, a child has at most
/// one parent. `parent == None` marks a top-level account. Accounts are
/// created and retired by the surrounding application; the ledger only reads
/// their id and type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    parent: Option<AccountId>,
    name: String,
    account_type: AccountType,
}

impl Account {
    pub fn new(id: AccountId, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id,
            parent: None,
            name: name.into(),
            account_type,
        }
    }

    pub fn with_parent(mut self, parent: AccountId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn parent(&self) -> Option<AccountId> {
        self.parent
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_sides_follow_accounting_equation() {
        let debit_normal: Vec<_> = AccountType::ALL
            .into_iter()
            .filter(|t| t.normal_side() == BalanceSide::Debit)
            .collect();
        assert_eq!(debit_normal, vec![AccountType::Asset, AccountType::Expense]);
    }

    #[test]
    fn account_without_parent_is_top_level() {
        let root = Account::new(AccountId::new(), "Assets", AccountType::Asset);
        assert!(root.is_top_level());

        let child =
            Account::new(AccountId::new(), "Cash", AccountType::Asset).with_parent(root.id());
        assert!(!child.is_top_level());
        assert_eq!(child.parent(), Some(root.id()));
    }

    #[test]
    fn entity_identity_ignores_display_name() {
        let id = AccountId::new();
        let cash = Account::new(id, "Cash", AccountType::Asset);
        let renamed = Account::new(id, "Petty cash", AccountType::Asset);
        assert_eq!(Entity::id(&cash), Entity::id(&renamed));
        assert_ne!(cash, renamed);
    }

    #[test]
    fn account_type_serializes_by_name() {
        let json = serde_json::to_string(&AccountType::Liability).unwrap();
        assert_eq!(json, "\"Liability\"");
        assert_eq!(AccountType::Revenue.to_string(), "Revenue");
    }
}
