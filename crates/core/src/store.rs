//! Key-value state store boundary.
//!
//! The ledger owns no state. Every balance lives in a [`StateStore`] keyed by
//! account, and every operation re-reads what it needs.

use std::sync::Arc;

use thiserror::Error;

/// Store operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend refused or failed the call.
    #[error("backend failure: {0}")]
    Backend(String),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("lock poisoned")]
    LockPoisoned,

    /// A stored value is not a decimal balance.
    #[error("corrupt value under key '{key}': {value:?}")]
    Corrupt { key: String, value: String },
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn corrupt(key: impl Into<String>, value: &[u8]) -> Self {
        Self::Corrupt {
            key: key.into(),
            value: String::from_utf8_lossy(value).into_owned(),
        }
    }
}

/// One write inside a [`WriteBatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Put { key: String, value: Vec<u8> },
    Delete { key: String },
}

impl WriteOp {
    pub fn key(&self) -> &str {
        match self {
            WriteOp::Put { key, .. } | WriteOp::Delete { key } => key,
        }
    }
}

/// Ordered set of writes handed to [`StateStore::commit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(mut self, key: impl Into<String>, value: Vec<u8>) -> Self {
        self.ops.push(WriteOp::Put {
            key: key.into(),
            value,
        });
        self
    }

    pub fn delete(mut self, key: impl Into<String>) -> Self {
        self.ops.push(WriteOp::Delete { key: key.into() });
        self
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }
}

impl IntoIterator for WriteBatch {
    type Item = WriteOp;
    type IntoIter = std::vec::IntoIter<WriteOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

/// Key-value store the ledger runs against.
///
/// Serializing conflicting access to the same key is the store's job; the
/// ledger holds no locks of its own.
///
/// ## Batches
///
/// [`commit`](StateStore::commit) has a default implementation that applies
/// the writes one at a time, in order, stopping at the first failure. Writes
/// applied before the failure stay applied. Stores with multi-key
/// transactions should override it so a batch lands all-or-nothing.
pub trait StateStore: Send + Sync {
    /// Read a value. `Ok(None)` means the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write a value, replacing any previous one.
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Apply a batch of writes.
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        for op in batch {
            match op {
                WriteOp::Put { key, value } => self.put(&key, value)?,
                WriteOp::Delete { key } => self.delete(&key)?,
            }
        }
        Ok(())
    }
}

impl<S> StateStore for Arc<S>
where
    S: StateStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        (**self).commit(batch)
    }
}
