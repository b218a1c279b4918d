//! The settlement strategy seam.
//!
//! A [`SettlementBehavior`] handles an amount on behalf of a
//! transaction: it talks to whatever pays the bill and reports back
//! with a [`SettlementReceipt`]. Callers only ever see
//! `Arc<dyn SettlementBehavior>`, so new behaviors plug in without
//! touching the transaction or the service.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Compile-time registration name of a behavior type.
///
/// Usually derived with `#[derive(BehaviorKind)]`, which uses the
/// type name unless `#[behavior(name = "...")]` says otherwise.
pub trait BehaviorKind {
    const KIND: &'static str;
}

/// A payment method a transaction can be settled with.
///
/// Implementations must be shareable across threads: the registry
/// hands out the same instance to every caller of a singleton.
pub trait SettlementBehavior: Send + Sync {
    /// Name this behavior reports in receipts and logs.
    fn kind(&self) -> &str;

    /// Handles `amount`.
    ///
    /// # Errors
    /// Returns [`TadbirError::SettlementFailure`](crate::TadbirError::SettlementFailure)
    /// when the payment could not be made. The caller must then leave
    /// the account untouched.
    fn settle(&self, amount: Decimal) -> Result<SettlementReceipt>;
}

impl fmt::Debug for dyn SettlementBehavior + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SettlementBehavior({})", self.kind())
    }
}

/// Proof that a behavior handled an amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub behavior: String,
    pub amount: Decimal,
    pub note: String,
}

impl SettlementReceipt {
    pub fn new(behavior: impl Into<String>, amount: Decimal, note: impl Into<String>) -> Self {
        Self {
            behavior: behavior.into(),
            amount,
            note: note.into(),
        }
    }
}

impl fmt::Display for SettlementReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} via {})", self.note, self.amount, self.behavior)
    }
}
