//! Name-driven settlement.
//!
//! [`SettlementService`] is the context for callers that only know a
//! behavior by name, e.g. from configuration or a command line.

use std::sync::Arc;

use tracing::info;

use crate::behavior::SettlementReceipt;
use crate::container::BehaviorRegistry;
use crate::error::Result;
use crate::transaction::Transaction;

/// Resolves a behavior by name and settles a transaction with it.
#[derive(Debug, Clone)]
pub struct SettlementService {
    registry: Arc<BehaviorRegistry>,
}

impl SettlementService {
    pub fn new(registry: Arc<BehaviorRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &BehaviorRegistry {
        &self.registry
    }

    /// Settles `transaction` with the behavior registered as `behavior`.
    ///
    /// Resolution happens first: an unknown name fails with
    /// [`TadbirError::BehaviorNotFound`](crate::TadbirError::BehaviorNotFound)
    /// and leaves both the transaction and its account untouched.
    pub fn settle(&self, transaction: &mut Transaction<'_>, behavior: &str) -> Result<SettlementReceipt> {
        let resolved = self.registry.resolve(behavior)?;

        info!(
            account = transaction.account().name(),
            transaction = %transaction.id(),
            amount = %transaction.amount(),
            behavior = resolved.kind(),
            "Paying transaction"
        );

        transaction.assign(resolved);
        transaction.settle()
    }
}
