//! State store adapters.
//!
//! The contract itself lives in `mizuki_core::store`; this module holds the
//! concrete backends.

pub mod in_memory;

pub use in_memory::InMemoryStateStore;
