//! The settlement context.
//!
//! A [`Transaction`] binds an amount to the account it is owed on and
//! to the behavior that will pay it. It never picks a behavior
//! itself: one is assigned directly, or by a
//! [`SettlementService`](crate::SettlementService) after a lookup.

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::account::{ensure_non_negative, Account};
use crate::behavior::{SettlementBehavior, SettlementReceipt};
use crate::error::{Result, TadbirError};

/// Opaque transaction (order) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub u64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An amount owed on one account, plus the behavior that settles it.
///
/// Settling twice debits twice; nothing remembers a previous settle.
pub struct Transaction<'a> {
    id: TransactionId,
    amount: Decimal,
    account: &'a mut Account,
    behavior: Option<Arc<dyn SettlementBehavior>>,
}

impl<'a> Transaction<'a> {
    /// Binds `amount` to `account` without touching its balance.
    ///
    /// # Errors
    /// [`TadbirError::InvalidAmount`] for a negative amount.
    pub fn new(id: TransactionId, amount: Decimal, account: &'a mut Account) -> Result<Self> {
        ensure_non_negative(amount)?;
        Ok(Self {
            id,
            amount,
            account,
            behavior: None,
        })
    }

    /// Places an order: the account first accrues `amount`, then the
    /// transaction is bound to it.
    pub fn open(id: TransactionId, amount: Decimal, account: &'a mut Account) -> Result<Self> {
        account.accrue(amount)?;
        Self::new(id, amount, account)
    }

    /// Builder-style [`assign`](Transaction::assign).
    pub fn with_behavior(mut self, behavior: Arc<dyn SettlementBehavior>) -> Self {
        self.assign(behavior);
        self
    }

    /// Binds the behavior `settle()` will use, replacing any earlier one.
    pub fn assign(&mut self, behavior: Arc<dyn SettlementBehavior>) {
        debug!(transaction = %self.id, behavior = behavior.kind(), "Behavior assigned");
        self.behavior = Some(behavior);
    }

    pub fn behavior(&self) -> Option<&dyn SettlementBehavior> {
        self.behavior.as_deref()
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn account(&self) -> &Account {
        &*self.account
    }

    /// Pays the amount with the assigned behavior, then debits the account.
    ///
    /// # Errors
    /// - [`TadbirError::NoBehaviorAssigned`] if nothing was assigned
    /// - whatever the behavior returns; the balance is left as it was
    #[instrument(skip(self), fields(transaction = %self.id, amount = %self.amount))]
    pub fn settle(&mut self) -> Result<SettlementReceipt> {
        let behavior = self
            .behavior
            .as_ref()
            .ok_or(TadbirError::NoBehaviorAssigned { transaction: self.id })?;

        info!(account = %self.account.id(), behavior = behavior.kind(), "Settling transaction");
        let receipt = behavior.settle(self.amount)?;
        self.account.debit(self.amount);

        Ok(receipt)
    }
}

impl fmt::Debug for Transaction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("id", &self.id)
            .field("amount", &self.amount)
            .field("account", &self.account.id())
            .field("behavior", &self.behavior.as_ref().map(|b| b.kind().to_string()))
            .finish()
    }
}
