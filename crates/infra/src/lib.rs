//! Infrastructure layer: state store backends and the invocation boundary.

pub mod command_dispatcher;
pub mod state_store;

#[cfg(test)]
mod integration_tests;

pub use command_dispatcher::{CommandDispatcher, InvocationKind, Operation, Payload};
pub use state_store::InMemoryStateStore;
