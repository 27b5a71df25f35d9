//! Storage Module
//!
//! Synchronous key-value backends the expiring cache persists records into.

#[cfg(test)]
mod failing;
mod file;
mod memory;

#[cfg(test)]
pub(crate) use failing::FailingStorage;
pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

// == Storage Backend ==
/// A synchronous string key-value store.
///
/// Implementations must make single-key reads and writes atomic; concurrent
/// writers to the same key resolve last-write-wins.
pub trait StorageBackend: Send + Sync {
    /// Returns the raw record stored under `id`, if any.
    fn read(&self, id: &str) -> Result<Option<String>>;

    /// Stores `serialized` under `id`, replacing any previous record.
    fn write(&self, id: &str, serialized: &str) -> Result<()>;

    /// Removes the record under `id`. Removing a missing id is not an error.
    fn delete(&self, id: &str) -> Result<()>;

    /// Lists every stored id.
    fn keys(&self) -> Result<Vec<String>>;
}
