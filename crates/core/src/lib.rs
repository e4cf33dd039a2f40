//! `haya-core`: identifiers and error primitives shared by the ledger crates.
//!
//! This crate contains **pure domain** primitives (no storage, no IO).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AccountId, JournalId, TransactionId};
pub use value_object::ValueObject;
