//! Ledger module (account balances over a key-value store).
//!
//! Pure transition logic only: the store is injected per call.

pub mod engine;

pub use engine::LedgerEngine;
