pub mod codec;
pub mod json_backend;
pub mod memory;

use crate::errors::PersistenceError;

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Abstraction over synchronous, single-writer key-value stores holding
/// serialized documents.
pub trait KeyValueStore: Send + Sync {
    /// Returns the document stored under `key`, or `None` when nothing was saved yet.
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub use codec::{decode_expenses, encode_expenses, DecodedExpenses};
pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
