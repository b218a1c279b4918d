//! Composition root: the one place that decides which behaviors exist.
//!
//! [`CreditCardSettlement`] arrives through compile-time discovery,
//! [`WalletSettlement`] and the short aliases through
//! [`PaymentsProvider`]. Build the registry once at startup and share it.

use std::sync::Arc;

use crate::behaviors::{CreditCardSettlement, WalletSettlement};
use crate::{BehaviorKey, BehaviorProvider, BehaviorRegistry, ProviderRegistry, Result};

/// Registers the wallet behavior and the friendly aliases.
#[derive(Debug, Default)]
pub struct PaymentsProvider {
    wallet: WalletSettlement,
}

impl PaymentsProvider {
    /// Provider whose wallet goes through `wallet_provider`.
    pub fn with_wallet(wallet_provider: impl Into<std::borrow::Cow<'static, str>>) -> Self {
        Self {
            wallet: WalletSettlement::new(wallet_provider),
        }
    }
}

impl BehaviorProvider for PaymentsProvider {
    fn register(&self, registry: &mut dyn ProviderRegistry) {
        registry.register_instance(BehaviorKey::of::<WalletSettlement>(), Arc::new(self.wallet.clone()));

        registry.register_alias("card".into(), BehaviorKey::of::<CreditCardSettlement>());
        registry.register_alias("wallet".into(), BehaviorKey::of::<WalletSettlement>());
        registry.register_alias("paypal".into(), BehaviorKey::of::<WalletSettlement>());
    }
}

/// Builds the registry the binary runs with.
pub fn default_registry() -> Result<BehaviorRegistry> {
    registry_with(&PaymentsProvider::default())
}

/// Builds a registry from discovered behaviors plus `provider`.
pub fn registry_with(provider: &dyn BehaviorProvider) -> Result<BehaviorRegistry> {
    BehaviorRegistry::builder()
        .discovered()
        .add_provider(provider)
        .build()
}
