//! Error types for registry and settlement operations.
//!
//! Every failure names the behavior or transaction involved and,
//! where it helps, ends with a hint on how to fix it.

use std::fmt;

use rust_decimal::Decimal;
use tadbir_support::rendering::{render_bullets, render_list};

use crate::key::BehaviorKey;
use crate::transaction::TransactionId;

/// Boxed cause carried by failures that come from behavior code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for all Tadbir operations.
#[derive(Debug, thiserror::Error)]
pub enum TadbirError {
    /// No registered behavior matches the requested name.
    #[error("{}", .0)]
    BehaviorNotFound(BehaviorNotFoundError),

    /// `settle()` was called before a behavior was bound.
    #[error(
        "Transaction {transaction} has no settlement behavior assigned\n  Hint: call .assign() first, or settle through a SettlementService"
    )]
    NoBehaviorAssigned { transaction: TransactionId },

    /// The behavior itself reported a failure.
    #[error("Settlement with {behavior} failed: {source}")]
    SettlementFailure {
        behavior: String,
        #[source]
        source: BoxError,
    },

    /// Name was already taken and the builder forbids overrides.
    #[error("{}", .0)]
    AlreadyRegistered(AlreadyRegisteredError),

    /// An alias reuses the name of a registered behavior.
    #[error(
        "Alias {alias} -> {target} shadows the registered behavior {alias}\n  Hint: pick an alias that is not already a behavior name"
    )]
    AliasShadowsBehavior { alias: BehaviorKey, target: BehaviorKey },

    /// A registered factory failed to produce its behavior.
    #[error("Failed to construct {key}: {source}")]
    ConstructionFailed {
        key: BehaviorKey,
        #[source]
        source: BoxError,
    },

    /// Amounts must be zero or positive.
    #[error("Invalid amount {amount}: settlement amounts cannot be negative")]
    InvalidAmount { amount: Decimal },
}

impl TadbirError {
    /// Wraps a behavior-side failure.
    pub fn settlement_failed(behavior: impl Into<String>, source: impl Into<BoxError>) -> Self {
        TadbirError::SettlementFailure {
            behavior: behavior.into(),
            source: source.into(),
        }
    }
}

/// Error when a behavior name could not be resolved.
#[derive(Debug)]
pub struct BehaviorNotFoundError {
    /// The name that was asked for, as given.
    pub requested: String,
    /// Names the registry does know.
    pub registered: Vec<String>,
    /// Registered names close to the request.
    pub suggestions: Vec<String>,
}

impl fmt::Display for BehaviorNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Settlement behavior '{}' not found", self.requested)?;
        write!(f, "\n  Registered: {}", render_list(&self.registered))?;
        f.write_str(&render_bullets("Did you mean one of", &self.suggestions))?;
        write!(
            f,
            "\n  Hint: register it on the builder or add its provider before .build()"
        )
    }
}

/// Error when a strict builder sees the same name twice.
#[derive(Debug)]
pub struct AlreadyRegisteredError {
    pub key: BehaviorKey,
}

impl fmt::Display for AlreadyRegisteredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Settlement behavior already registered: {}", self.key)?;
        write!(
            f,
            "\n  Hint: use .allow_override(true) to replace it, or register under another name"
        )
    }
}

/// Convenient Result type for Tadbir operations.
pub type Result<T> = std::result::Result<T, TadbirError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_behavior() {
        let err = TadbirError::BehaviorNotFound(BehaviorNotFoundError {
            requested: "PaypalSettlement".into(),
            registered: vec!["CreditCardSettlement".into()],
            suggestions: vec![],
        });

        let msg = err.to_string();
        assert!(msg.contains("'PaypalSettlement' not found"));
        assert!(msg.contains("Registered: CreditCardSettlement"));
        assert!(!msg.contains("Did you mean"));
    }

    #[test]
    fn not_found_lists_suggestions() {
        let err = BehaviorNotFoundError {
            requested: "WaletSettlement".into(),
            registered: vec!["WalletSettlement".into()],
            suggestions: vec!["WalletSettlement".into()],
        };

        let msg = err.to_string();
        assert!(msg.contains("Did you mean one of:"));
        assert!(msg.contains("- WalletSettlement"));
    }

    #[test]
    fn no_behavior_assigned_display() {
        let err = TadbirError::NoBehaviorAssigned {
            transaction: TransactionId(7),
        };
        assert!(err.to_string().contains("Transaction 7"));
    }

    #[test]
    fn settlement_failure_keeps_source() {
        use std::error::Error;

        let err = TadbirError::settlement_failed("CreditCardSettlement", "card declined");
        assert!(err.to_string().contains("card declined"));
        assert!(err.source().is_some());
    }

    #[test]
    fn alias_shadowing_names_both_keys() {
        let err = TadbirError::AliasShadowsBehavior {
            alias: BehaviorKey::new("CreditCardSettlement"),
            target: BehaviorKey::new("WalletSettlement"),
        };
        let msg = err.to_string();
        assert!(msg.contains("CreditCardSettlement -> WalletSettlement"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn already_registered_display() {
        let err = TadbirError::AlreadyRegistered(AlreadyRegisteredError {
            key: BehaviorKey::new("WalletSettlement"),
        });
        let msg = err.to_string();
        assert!(msg.contains("already registered: WalletSettlement"));
        assert!(msg.contains("allow_override"));
    }
}
