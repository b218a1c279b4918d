use std::borrow::Cow;

use rust_decimal::Decimal;
use tracing::info;

use crate::{BehaviorKind, Result, SettlementBehavior, SettlementReceipt};

/// Pays from an online wallet such as PayPal.
#[derive(Debug, Clone, BehaviorKind)]
pub struct WalletSettlement {
    provider: Cow<'static, str>,
}

impl WalletSettlement {
    pub fn new(provider: impl Into<Cow<'static, str>>) -> Self {
        Self {
            provider: provider.into(),
        }
    }

    /// Wallet service the payment goes through.
    pub fn provider(&self) -> &str {
        &self.provider
    }
}

impl Default for WalletSettlement {
    fn default() -> Self {
        Self::new("paypal")
    }
}

impl SettlementBehavior for WalletSettlement {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn settle(&self, amount: Decimal) -> Result<SettlementReceipt> {
        info!(%amount, provider = %self.provider, "Paid with wallet");
        Ok(SettlementReceipt::new(
            Self::KIND,
            amount,
            format!("Paid with {}", self.provider),
        ))
    }
}
