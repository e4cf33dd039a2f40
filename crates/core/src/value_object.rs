//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. A ledger entry is
/// the canonical example: `(account, amount)` fully describes it, and a
/// correction is a new offsetting entry rather than an edit.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Entry {
///     account: AccountId,
///     amount: i64,
/// }
///
/// impl ValueObject for Entry {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
