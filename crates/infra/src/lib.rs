//! Infrastructure layer: storage adapters for the accounting core.

pub mod storage;


pub use storage::InMemoryStorage;
