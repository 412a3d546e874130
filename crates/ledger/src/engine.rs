//! The ledger engine: five state transitions over a [`StateStore`].
//!
//! Each operation reads what it needs from the store, validates, computes the
//! new balances and writes them back. Nothing is cached between calls.

use tracing::{debug, info, warn};

use mizuki_core::{
    AccountKey, Amount, AmountPolicy, Balance, ExchangeRate, LedgerConfig, LedgerError,
    LedgerResult, StateStore, Unit, WriteBatch, YEN_PER_UNIT,
};

/// Stateless transition engine.
///
/// Holds only the immutable [`LedgerConfig`] it was built with. Cloning is
/// cheap and clones can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct LedgerEngine {
    config: LedgerConfig,
}

impl LedgerEngine {
    pub fn new(config: LedgerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn rate(&self) -> ExchangeRate {
        self.config.rate
    }

    /// Open `account` with a zero balance. An existing balance is overwritten.
    pub fn entry<S>(&self, store: &S, account: &AccountKey) -> LedgerResult<()>
    where
        S: StateStore + ?Sized,
    {
        info!(account = %account, "entry");
        self.put_balance(store, account, Balance::ZERO)
    }

    /// Remove `account`. Succeeds whether or not it existed.
    pub fn leave<S>(&self, store: &S, account: &AccountKey) -> LedgerResult<()>
    where
        S: StateStore + ?Sized,
    {
        info!(account = %account, "leave");
        store.delete(account.as_str()).map_err(|e| {
            warn!(account = %account, error = %e, "leave failed");
            LedgerError::from(e)
        })
    }

    /// Move `amount_text` from `from` to `to`.
    ///
    /// Both accounts are read before the amount is parsed, so a missing
    /// account wins over a malformed amount. Balances may go negative.
    ///
    /// The two writes go to the store as one [`WriteBatch`]; whether they land
    /// atomically is up to the store's `commit`.
    ///
    /// Remitting to the same account writes nothing and leaves the balance as
    /// it was. Applying both writes in order would instead let the credit win
    /// and add `amount` to the account.
    pub fn remit<S>(
        &self,
        store: &S,
        from: &AccountKey,
        to: &AccountKey,
        amount_text: &str,
    ) -> LedgerResult<()>
    where
        S: StateStore + ?Sized,
    {
        let from_balance = self.balance(store, from)?;
        let to_balance = self.balance(store, to)?;
        let amount = self.remit_amount(amount_text)?;

        info!(from = %from, to = %to, amount = amount.value(), "remit");

        if from == to {
            debug!(account = %from, "remit to self leaves balance unchanged");
            return Ok(());
        }

        let overflow =
            || LedgerError::invalid_amount(format!("remitting {amount_text} overflows a balance"));
        let new_from = from_balance.debit(amount).ok_or_else(overflow)?;
        let new_to = to_balance.credit(amount).ok_or_else(overflow)?;

        debug!(
            from = %from,
            from_balance = new_from.value(),
            to = %to,
            to_balance = new_to.value(),
            "commit remit"
        );

        let batch = WriteBatch::new()
            .put(from.as_str(), new_from.to_bytes())
            .put(to.as_str(), new_to.to_bytes());

        store.commit(batch).map_err(|e| {
            warn!(from = %from, to = %to, error = %e, "remit commit failed");
            LedgerError::from(e)
        })
    }

    /// Convert within one account.
    ///
    /// `yen` credits `amount * YEN_PER_UNIT`; `mizuki` debits
    /// `amount * rate`. Any other unit tag is refused.
    pub fn exchange<S>(
        &self,
        store: &S,
        account: &AccountKey,
        amount_text: &str,
        unit_text: &str,
    ) -> LedgerResult<()>
    where
        S: StateStore + ?Sized,
    {
        let amount = Amount::parse(amount_text)?;
        let unit: Unit = unit_text.parse()?;
        let balance = self.balance(store, account)?;

        info!(
            account = %account,
            amount = amount.value(),
            unit = %unit,
            balance = balance.value(),
            rate = self.config.rate.value(),
            "exchange"
        );

        let updated = match unit {
            Unit::Yen => amount
                .checked_mul(YEN_PER_UNIT)
                .and_then(|credit| balance.credit(credit)),
            Unit::Mizuki => amount
                .checked_mul(self.config.rate.value())
                .and_then(|debit| balance.debit(debit)),
        }
        .ok_or_else(|| {
            LedgerError::invalid_amount(format!(
                "exchanging {amount_text} {unit} overflows the balance"
            ))
        })?;

        self.put_balance(store, account, updated)
    }

    /// Current balance of `account`.
    pub fn balance<S>(&self, store: &S, account: &AccountKey) -> LedgerResult<Balance>
    where
        S: StateStore + ?Sized,
    {
        let bytes = store
            .get(account.as_str())?
            .ok_or_else(|| LedgerError::account_not_found(account.as_str()))?;
        Ok(Balance::from_bytes(account.as_str(), &bytes)?)
    }

    fn remit_amount(&self, amount_text: &str) -> LedgerResult<Amount> {
        match Amount::parse(amount_text) {
            Ok(amount) => Ok(amount),
            Err(err) => match self.config.amount_policy {
                AmountPolicy::Reject => Err(err),
                AmountPolicy::TreatAsZero => {
                    warn!(amount = amount_text, "unparsable remit amount treated as zero");
                    Ok(Amount::ZERO)
                }
            },
        }
    }

    fn put_balance<S>(&self, store: &S, account: &AccountKey, balance: Balance) -> LedgerResult<()>
    where
        S: StateStore + ?Sized,
    {
        debug!(account = %account, balance = balance.value(), "put balance");
        store
            .put(account.as_str(), balance.to_bytes())
            .map_err(|e| {
                warn!(account = %account, error = %e, "put balance failed");
                LedgerError::from(e)
            })
    }
}
