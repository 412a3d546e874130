//! Integration tests for the full invocation pipeline.
//!
//! Tests: (function, args) → CommandDispatcher → LedgerEngine → StateStore
//!
//! Verifies:
//! - The documented scenarios end to end
//! - Failed operations leave every store entry untouched
//! - Remit atomicity depends on the store's batch commit

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use mizuki_core::{
        AmountPolicy, ExchangeRate, LedgerConfig, LedgerError, StateStore, StoreError,
    };
    use mizuki_ledger::LedgerEngine;

    use crate::command_dispatcher::CommandDispatcher;
    use crate::state_store::InMemoryStateStore;

    /// Store without multi-key transactions: uses the trait's sequential
    /// commit and refuses writes to one key.
    struct NonTransactionalStore {
        inner: InMemoryStateStore,
        refuse_writes_to: String,
    }

    impl StateStore for NonTransactionalStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            self.inner.get(key)
        }

        fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
            if key == self.refuse_writes_to {
                return Err(StoreError::backend(format!("write to {key} rejected")));
            }
            self.inner.put(key, value)
        }

        fn delete(&self, key: &str) -> Result<(), StoreError> {
            self.inner.delete(key)
        }
    }

    /// Transactional store that rejects any batch touching one key.
    struct RejectingBatchStore {
        inner: InMemoryStateStore,
        reject_batches_touching: String,
    }

    impl StateStore for RejectingBatchStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            self.inner.get(key)
        }

        fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
            self.inner.put(key, value)
        }

        fn delete(&self, key: &str) -> Result<(), StoreError> {
            self.inner.delete(key)
        }

        fn commit(&self, batch: mizuki_core::WriteBatch) -> Result<(), StoreError> {
            if batch
                .ops()
                .iter()
                .any(|op| op.key() == self.reject_batches_touching)
            {
                return Err(StoreError::backend("transaction aborted"));
            }
            self.inner.commit(batch)
        }
    }

    fn setup_with(config: LedgerConfig) -> CommandDispatcher<InMemoryStateStore> {
        CommandDispatcher::new(LedgerEngine::new(config), InMemoryStateStore::new())
    }

    fn setup() -> CommandDispatcher<InMemoryStateStore> {
        setup_with(LedgerConfig::default())
    }

    fn balance<S: StateStore>(d: &CommandDispatcher<S>, account: &str) -> String {
        d.query("balance", &[account])
            .unwrap()
            .expect("balance always has a payload")
    }

    #[test]
    fn remit_scenario() {
        let d = setup();
        d.invoke("entry", &["alice"]).unwrap();
        d.invoke("entry", &["bob"]).unwrap();
        d.invoke("remit", &["alice", "bob", "30"]).unwrap();

        assert_eq!(balance(&d, "alice"), "-30");
        assert_eq!(balance(&d, "bob"), "30");
    }

    #[test]
    fn yen_exchange_scenario() {
        let d = setup();
        d.invoke("entry", &["carol"]).unwrap();
        d.invoke("exchange", &["carol", "2", "yen"]).unwrap();
        assert_eq!(balance(&d, "carol"), "200");
    }

    #[test]
    fn mizuki_exchange_scenario() {
        let d = setup_with(LedgerConfig::default().with_rate(ExchangeRate::new(100).unwrap()));
        d.invoke("entry", &["dan"]).unwrap();
        d.invoke("exchange", &["dan", "1", "mizuki"]).unwrap();
        assert_eq!(balance(&d, "dan"), "-100");
    }

    #[test]
    fn configured_rate_reaches_the_engine() {
        let d = setup_with(LedgerConfig::default().with_rate(ExchangeRate::new(3).unwrap()));
        d.invoke("entry", &["dan"]).unwrap();
        d.invoke("exchange", &["dan", "5", "mizuki"]).unwrap();
        assert_eq!(balance(&d, "dan"), "-15");
    }

    #[test]
    fn ghost_balance_is_not_found() {
        let d = setup();
        assert_eq!(
            d.query("balance", &["ghost"]),
            Err(LedgerError::account_not_found("ghost"))
        );
    }

    #[test]
    fn account_lifecycle() {
        let d = setup();
        d.invoke("entry", &["erin"]).unwrap();
        assert_eq!(balance(&d, "erin"), "0");

        d.invoke("exchange", &["erin", "3", "yen"]).unwrap();
        d.invoke("entry", &["erin"]).unwrap();
        assert_eq!(balance(&d, "erin"), "0");

        d.invoke("leave", &["erin"]).unwrap();
        assert!(matches!(
            d.query("balance", &["erin"]),
            Err(LedgerError::AccountNotFound(_))
        ));
        assert!(d.store().is_empty().unwrap());
    }

    #[test]
    fn failed_operations_do_not_mutate_the_store() {
        let d = setup();
        d.invoke("entry", &["alice"]).unwrap();
        d.invoke("exchange", &["alice", "4", "yen"]).unwrap();
        let before = d.store().snapshot().unwrap();

        let failures: Vec<(&str, Vec<&str>)> = vec![
            ("remit", vec!["alice", "ghost", "10"]),
            ("remit", vec!["ghost", "alice", "10"]),
            ("remit", vec!["alice", "alice"]),
            ("exchange", vec!["ghost", "1", "yen"]),
            ("exchange", vec!["alice", "x", "yen"]),
            ("exchange", vec!["alice", "1", "euro"]),
            ("balance", vec!["ghost"]),
            ("burn", vec!["alice"]),
        ];

        for (function, args) in failures {
            let err = d.execute(function, args.as_slice()).unwrap_err();
            assert!(err.is_rejection(), "{function} {args:?}: {err}");
        }

        assert_eq!(d.store().snapshot().unwrap(), before);
    }

    #[test]
    fn lenient_amount_policy_is_a_no_op() {
        let d = setup_with(LedgerConfig::default().with_amount_policy(AmountPolicy::TreatAsZero));
        d.invoke("entry", &["alice"]).unwrap();
        d.invoke("entry", &["bob"]).unwrap();
        d.invoke("remit", &["alice", "bob", "12"]).unwrap();

        d.invoke("remit", &["alice", "bob", "twelve"]).unwrap();

        assert_eq!(balance(&d, "alice"), "-12");
        assert_eq!(balance(&d, "bob"), "12");
    }

    #[test]
    fn non_transactional_store_leaves_remit_half_applied() {
        let store = NonTransactionalStore {
            inner: InMemoryStateStore::new(),
            refuse_writes_to: "bob".to_string(),
        };
        store.inner.put("alice", b"50".to_vec()).unwrap();
        store.inner.put("bob", b"50".to_vec()).unwrap();
        let d = CommandDispatcher::new(LedgerEngine::new(LedgerConfig::default()), store);

        let err = d.invoke("remit", &["alice", "bob", "20"]).unwrap_err();
        assert!(matches!(err, LedgerError::Store(_)));

        // The partial-failure window: alice was debited, bob never credited.
        assert_eq!(balance(&d, "alice"), "30");
        assert_eq!(balance(&d, "bob"), "50");
    }

    #[test]
    fn transactional_store_keeps_remit_all_or_nothing() {
        let store = RejectingBatchStore {
            inner: InMemoryStateStore::new(),
            reject_batches_touching: "bob".to_string(),
        };
        store.inner.put("alice", b"50".to_vec()).unwrap();
        store.inner.put("bob", b"50".to_vec()).unwrap();
        let d = CommandDispatcher::new(LedgerEngine::new(LedgerConfig::default()), store);

        let err = d.invoke("remit", &["alice", "bob", "20"]).unwrap_err();
        assert!(matches!(err, LedgerError::Store(StoreError::Backend(_))));

        assert_eq!(balance(&d, "alice"), "50");
        assert_eq!(balance(&d, "bob"), "50");
    }

    #[test]
    fn corrupt_entry_is_a_store_error() {
        let d = setup();
        d.store().put("mallory", b"1e3".to_vec()).unwrap();
        assert!(matches!(
            d.query("balance", &["mallory"]),
            Err(LedgerError::Store(StoreError::Corrupt { .. }))
        ));
    }

    #[test]
    fn dispatchers_share_one_store() {
        let store = Arc::new(InMemoryStateStore::new());
        let engine = LedgerEngine::new(LedgerConfig::default());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let d = CommandDispatcher::new(engine.clone(), Arc::clone(&store));
                thread::spawn(move || {
                    for i in 0..25 {
                        let account = format!("acct-{t}-{i}");
                        d.invoke("entry", &[account.as_str()]).unwrap();
                        d.invoke("exchange", &[account.as_str(), "1", "yen"]).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let d = CommandDispatcher::new(engine, store);
        assert_eq!(d.store().len().unwrap(), 100);
        assert_eq!(balance(&d, "acct-3-24"), "100");
    }
}
