//! Accounts and their outstanding balance.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::behavior::{SettlementBehavior, SettlementReceipt};
use crate::error::{Result, TadbirError};

/// Opaque account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer account carrying what it still owes.
///
/// The balance has no floor: paying more than is owed leaves it
/// negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    name: String,
    balance: Decimal,
}

impl Account {
    /// Opens an account that owes nothing.
    pub fn new(id: AccountId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            balance: Decimal::ZERO,
        }
    }

    /// Starts the account at `balance` instead of zero.
    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = balance;
        self
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// What the account currently owes.
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Adds an order's value to what the account owes.
    ///
    /// # Errors
    /// [`TadbirError::InvalidAmount`] for a negative amount.
    pub fn accrue(&mut self, amount: Decimal) -> Result<()> {
        ensure_non_negative(amount)?;
        self.balance += amount;
        debug!(account = %self.id, %amount, balance = %self.balance, "Balance accrued");
        Ok(())
    }

    /// Pays `amount` straight through `behavior`, no transaction involved.
    ///
    /// The balance only drops if the behavior succeeds.
    pub fn settle_with(
        &mut self,
        behavior: &dyn SettlementBehavior,
        amount: Decimal,
    ) -> Result<SettlementReceipt> {
        ensure_non_negative(amount)?;
        info!(account = %self.id, %amount, behavior = behavior.kind(), "Settling directly");
        let receipt = behavior.settle(amount)?;
        self.debit(amount);
        Ok(receipt)
    }

    pub(crate) fn debit(&mut self, amount: Decimal) {
        self.balance -= amount;
        debug!(account = %self.id, %amount, balance = %self.balance, "Balance debited");
    }
}

pub(crate) fn ensure_non_negative(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(TadbirError::InvalidAmount { amount });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct Declined;

    impl SettlementBehavior for Declined {
        fn kind(&self) -> &str {
            "Declined"
        }

        fn settle(&self, _amount: Decimal) -> Result<SettlementReceipt> {
            Err(TadbirError::settlement_failed(self.kind(), "card declined"))
        }
    }

    struct Accepted;

    impl SettlementBehavior for Accepted {
        fn kind(&self) -> &str {
            "Accepted"
        }

        fn settle(&self, amount: Decimal) -> Result<SettlementReceipt> {
            Ok(SettlementReceipt::new(self.kind(), amount, "ok"))
        }
    }

    #[test]
    fn new_account_owes_nothing() {
        let account = Account::new(AccountId(1), "Erfan Ebrahimi");
        assert_eq!(account.balance(), Decimal::ZERO);
        assert_eq!(account.name(), "Erfan Ebrahimi");
    }

    #[test]
    fn accrue_adds_to_balance() {
        let mut account = Account::new(AccountId(1), "a").with_balance(dec!(10));
        account.accrue(dec!(50)).unwrap();
        assert_eq!(account.balance(), dec!(60));
    }

    #[test]
    fn accrue_rejects_negative() {
        let mut account = Account::new(AccountId(1), "a");
        let err = account.accrue(dec!(-1)).unwrap_err();
        assert!(matches!(err, TadbirError::InvalidAmount { .. }));
        assert_eq!(account.balance(), Decimal::ZERO);
    }

    #[test]
    fn settle_with_debits_on_success() {
        let mut account = Account::new(AccountId(1), "a").with_balance(dec!(50));
        let receipt = account.settle_with(&Accepted, dec!(50)).unwrap();
        assert_eq!(receipt.amount, dec!(50));
        assert_eq!(account.balance(), Decimal::ZERO);
    }

    #[test]
    fn settle_with_keeps_balance_on_failure() {
        let mut account = Account::new(AccountId(1), "a").with_balance(dec!(50));
        assert!(account.settle_with(&Declined, dec!(50)).is_err());
        assert_eq!(account.balance(), dec!(50));
    }

    #[test]
    fn balance_may_go_negative() {
        let mut account = Account::new(AccountId(1), "a");
        account.settle_with(&Accepted, dec!(20)).unwrap();
        assert_eq!(account.balance(), dec!(-20));
    }

    #[test]
    fn negative_direct_amount_rejected_before_behavior_runs() {
        let mut account = Account::new(AccountId(1), "a");
        let err = account.settle_with(&Declined, dec!(-5)).unwrap_err();
        assert!(matches!(err, TadbirError::InvalidAmount { .. }));
    }
}
