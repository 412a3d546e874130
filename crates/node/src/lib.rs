//! `mizuki-node` — process wrapper around the ledger.
//!
//! Reads JSON invocations from a reader, answers on a writer.

pub mod session;
pub mod wire;

use mizuki_core::LedgerConfig;
use mizuki_infra::{CommandDispatcher, InMemoryStateStore};
use mizuki_ledger::LedgerEngine;

pub use session::{handle, serve, SessionStats};
pub use wire::{Request, Response};

/// Dispatcher over a fresh in-memory store, built from `config`.
pub fn build_dispatcher(config: LedgerConfig) -> CommandDispatcher<InMemoryStateStore> {
    CommandDispatcher::new(LedgerEngine::new(config), InMemoryStateStore::new())
}
