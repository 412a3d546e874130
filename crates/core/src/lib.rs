//! `mizuki-core` — ledger building blocks.
//!
//! Errors, identifiers, value objects, configuration and the state store
//! contract. No IO lives here.

pub mod config;
pub mod error;
pub mod id;
pub mod store;
pub mod value_object;

pub use config::{AmountPolicy, ConfigError, LedgerConfig};
pub use error::{LedgerError, LedgerResult};
pub use id::AccountKey;
pub use store::{StateStore, StoreError, WriteBatch, WriteOp};
pub use value_object::{Amount, Balance, ExchangeRate, Unit, YEN_PER_UNIT};
