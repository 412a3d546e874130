//! Invocation boundary: operation name + string arguments → ledger engine.
//!
//! ## Invocation Flow
//!
//! ```text
//! (function, args)
//!   ↓
//! 1. Resolve the operation name (unknown → UnsupportedOperation)
//!   ↓
//! 2. Check the entry point (mutations via invoke, balance via query)
//!   ↓
//! 3. Check arity (wrong count → ArgumentCount, nothing is attempted)
//!   ↓
//! 4. Run the engine transition against the store
//!   ↓
//! 5. Format the payload (balance as decimal text, otherwise empty)
//! ```
//!
//! The dispatcher holds the store and one engine built from injected
//! configuration; it adds no state of its own.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use mizuki_core::{AccountKey, LedgerError, LedgerResult, StateStore};
use mizuki_ledger::LedgerEngine;

/// Response payload. `None` is the empty payload of the mutating operations.
pub type Payload = Option<String>;

/// Operations exposed at the invocation boundary.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    Entry,
    Leave,
    Remit,
    Exchange,
    Balance,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Entry,
        Operation::Leave,
        Operation::Remit,
        Operation::Exchange,
        Operation::Balance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Entry => "entry",
            Operation::Leave => "leave",
            Operation::Remit => "remit",
            Operation::Exchange => "exchange",
            Operation::Balance => "balance",
        }
    }

    /// Exact number of arguments the operation takes.
    pub fn arity(self) -> usize {
        match self {
            Operation::Entry | Operation::Leave | Operation::Balance => 1,
            Operation::Remit | Operation::Exchange => 3,
        }
    }

    /// Entry point the operation belongs to.
    pub fn kind(self) -> InvocationKind {
        match self {
            Operation::Balance => InvocationKind::Query,
            _ => InvocationKind::Invoke,
        }
    }
}

impl FromStr for Operation {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| LedgerError::unsupported(format!("'{s}'")))
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Entry point of an invocation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvocationKind {
    /// One-time setup hook; accepts anything and changes nothing.
    Init,
    /// State-changing operations.
    Invoke,
    /// Read-only operations.
    Query,
}

#[derive(Debug)]
pub struct CommandDispatcher<S> {
    engine: LedgerEngine,
    store: S,
}

impl<S> CommandDispatcher<S> {
    pub fn new(engine: LedgerEngine, store: S) -> Self {
        Self { engine, store }
    }

    pub fn engine(&self) -> &LedgerEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> CommandDispatcher<S>
where
    S: StateStore,
{
    /// Route an invocation to its entry point.
    ///
    /// Without an explicit kind, any operation is accepted.
    pub fn dispatch<A: AsRef<str>>(
        &self,
        kind: Option<InvocationKind>,
        function: &str,
        args: &[A],
    ) -> LedgerResult<Payload> {
        match kind {
            Some(InvocationKind::Init) => self.init(args),
            Some(InvocationKind::Invoke) => self.invoke(function, args),
            Some(InvocationKind::Query) => self.query(function, args),
            None => self.execute(function, args),
        }
    }

    pub fn init<A: AsRef<str>>(&self, args: &[A]) -> LedgerResult<Payload> {
        info!(args = args.len(), "init");
        Ok(None)
    }

    /// Run a state-changing operation (`entry`, `leave`, `remit`, `exchange`).
    #[instrument(level = "debug", skip(self, args), fields(args = args.len()))]
    pub fn invoke<A: AsRef<str>>(&self, function: &str, args: &[A]) -> LedgerResult<Payload> {
        let op = self.resolve(function, Some(InvocationKind::Invoke))?;
        self.run(op, args)
    }

    /// Run a read-only operation (`balance`).
    #[instrument(level = "debug", skip(self, args), fields(args = args.len()))]
    pub fn query<A: AsRef<str>>(&self, function: &str, args: &[A]) -> LedgerResult<Payload> {
        let op = self.resolve(function, Some(InvocationKind::Query))?;
        self.run(op, args)
    }

    /// Run any operation regardless of entry point.
    #[instrument(level = "debug", skip(self, args), fields(args = args.len()))]
    pub fn execute<A: AsRef<str>>(&self, function: &str, args: &[A]) -> LedgerResult<Payload> {
        let op = self.resolve(function, None)?;
        self.run(op, args)
    }

    fn resolve(&self, function: &str, entry: Option<InvocationKind>) -> LedgerResult<Operation> {
        let op: Operation = function.parse()?;
        match entry {
            Some(kind) if kind != op.kind() => Err(LedgerError::unsupported(format!(
                "'{function}' is not available through {kind:?}"
            ))),
            _ => Ok(op),
        }
    }

    fn run<A: AsRef<str>>(&self, op: Operation, args: &[A]) -> LedgerResult<Payload> {
        if args.len() != op.arity() {
            return Err(LedgerError::argument_count(op.name(), op.arity(), args.len()));
        }

        let arg = |i: usize| args[i].as_ref();
        let engine = &self.engine;
        let store = &self.store;

        match op {
            Operation::Entry => engine.entry(store, &AccountKey::from(arg(0)))?,
            Operation::Leave => engine.leave(store, &AccountKey::from(arg(0)))?,
            Operation::Remit => engine.remit(
                store,
                &AccountKey::from(arg(0)),
                &AccountKey::from(arg(1)),
                arg(2),
            )?,
            Operation::Exchange => {
                engine.exchange(store, &AccountKey::from(arg(0)), arg(1), arg(2))?
            }
            Operation::Balance => {
                let balance = engine.balance(store, &AccountKey::from(arg(0)))?;
                return Ok(Some(balance.to_string()));
            }
        }

        Ok(None)
    }
}
