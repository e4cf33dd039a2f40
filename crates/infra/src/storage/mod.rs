//! Storage adapters implementing [`haya_accounting::Storage`].
//!
//! Only an in-memory backend ships today; durable engines plug in behind the
//! same trait.

pub mod in_memory;

pub use in_memory::InMemoryStorage;
