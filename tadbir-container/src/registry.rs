//! Behavior storage: the table behind [`BehaviorRegistry`](crate::BehaviorRegistry).
//!
//! Maps a [`BehaviorKey`] to the factory that produces the behavior,
//! plus name aliases that point at registered keys.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::behavior::SettlementBehavior;
use crate::error::{AlreadyRegisteredError, Result, TadbirError};
use crate::key::{fold, BehaviorKey};
use crate::scope::Scope;

/// Type alias for behavior factories.
///
/// Singletons wrap their factory so it runs once; transients call it
/// on every resolve. `Arc` so a registration can be cloned cheaply.
pub type FactoryFn = Arc<dyn Fn() -> Result<Arc<dyn SettlementBehavior>> + Send + Sync>;

/// Registration entry for a single behavior.
#[derive(Clone)]
pub(crate) struct Registration {
    pub key: BehaviorKey,
    pub factory: FactoryFn,
    pub scope: Scope,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("key", &self.key)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Stores all behavior registrations.
///
/// Filled by the builder; read-only once the registry is built.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    registrations: HashMap<BehaviorKey, Registration>,
    aliases: HashMap<BehaviorKey, BehaviorKey>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under its key.
    ///
    /// # Errors
    /// Returns [`TadbirError::AlreadyRegistered`] if the key is
    /// taken and `allow_override` is false.
    pub fn register(&mut self, registration: Registration, allow_override: bool) -> Result<()> {
        let key = registration.key.clone();

        if self.registrations.contains_key(&key) {
            if !allow_override {
                return Err(TadbirError::AlreadyRegistered(AlreadyRegisteredError { key }));
            }
            debug!(key = %key, "Replacing registered behavior");
        }

        debug!(key = %key, scope = %registration.scope, "Registered behavior");
        // Remove first so the new spelling of the name is kept.
        self.registrations.remove(&key);
        self.registrations.insert(key, registration);
        Ok(())
    }

    /// Registers an alias: looking up `from` finds `to` instead.
    pub fn register_alias(&mut self, from: BehaviorKey, to: BehaviorKey) {
        debug!(from = %from, to = %to, "Registered alias");
        self.aliases.remove(&from);
        self.aliases.insert(from, to);
    }

    /// Looks up a registration by name, following aliases.
    pub fn get(&self, name: &str) -> Option<&Registration> {
        let folded = fold(name);
        if let Some(target) = self.aliases.get(folded.as_str()) {
            trace!(from = name, to = %target, "Following alias");
            return self.registrations.get(target.folded());
        }
        self.registrations.get(folded.as_str())
    }

    /// Returns every alias with its target.
    pub fn aliases(&self) -> impl Iterator<Item = (&BehaviorKey, &BehaviorKey)> {
        self.aliases.iter()
    }

    /// Returns `true` if `key` is registered directly (aliases aside).
    pub fn contains_key(&self, key: &BehaviorKey) -> bool {
        self.registrations.contains_key(key)
    }

    /// Returns the number of registered behaviors.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Returns true if no behaviors are registered.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.registrations.keys().map(BehaviorKey::name).collect();
        names.sort_unstable();
        names
    }

    /// Registered names and alias names, for suggestions.
    pub fn known_names(&self) -> Vec<&str> {
        let mut names = self.names();
        names.extend(self.aliases.keys().map(BehaviorKey::name));
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::SettlementReceipt;
    use rust_decimal::Decimal;

    struct Noop;

    impl SettlementBehavior for Noop {
        fn kind(&self) -> &str {
            "Noop"
        }

        fn settle(&self, amount: Decimal) -> Result<SettlementReceipt> {
            Ok(SettlementReceipt::new("Noop", amount, "nothing"))
        }
    }

    fn make_reg(name: &'static str) -> Registration {
        Registration {
            key: BehaviorKey::new(name),
            factory: Arc::new(|| Ok(Arc::new(Noop) as Arc<dyn SettlementBehavior>)),
            scope: Scope::Singleton,
        }
    }

    #[test]
    fn register_and_get_any_case() {
        let mut reg = Registry::new();
        reg.register(make_reg("CreditCardSettlement"), false).unwrap();
        assert!(reg.get("creditcardsettlement").is_some());
        assert!(reg.get("CREDITCARDSETTLEMENT").is_some());
        assert!(reg.get("WalletSettlement").is_none());
    }

    #[test]
    fn duplicate_fails_when_strict() {
        let mut reg = Registry::new();
        reg.register(make_reg("Wallet"), false).unwrap();
        let err = reg.register(make_reg("wallet"), false).unwrap_err();
        assert!(matches!(err, TadbirError::AlreadyRegistered(_)));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn duplicate_with_override_keeps_latest_spelling() {
        let mut reg = Registry::new();
        reg.register(make_reg("wallet"), false).unwrap();
        reg.register(make_reg("Wallet"), true).unwrap();
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.names(), vec!["Wallet"]);
    }

    #[test]
    fn alias_resolves() {
        let mut reg = Registry::new();
        reg.register(make_reg("CreditCardSettlement"), false).unwrap();
        reg.register_alias("card".into(), "CreditCardSettlement".into());

        let found = reg.get("Card").unwrap();
        assert_eq!(found.key.name(), "CreditCardSettlement");
    }

    #[test]
    fn names_sorted() {
        let mut reg = Registry::new();
        reg.register(make_reg("WalletSettlement"), false).unwrap();
        reg.register(make_reg("CreditCardSettlement"), false).unwrap();
        assert_eq!(reg.names(), vec!["CreditCardSettlement", "WalletSettlement"]);
    }
}
