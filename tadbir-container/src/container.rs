//! # The behavior registry
//!
//! Holds every settlement behavior the process knows about and
//! resolves one by name at call time.
//!
//! # Architecture
//! ```text
//! RegistryBuilder  ──build()──>  BehaviorRegistry  ──resolve(name)──>  Arc<dyn SettlementBehavior>
//!   ▲      ▲                           │
//!   │      └─ discovered()             └── shared through Arc by SettlementService
//!   └─ add_provider()
//! ```
//!
//! # Examples
//! ```rust
//! use std::sync::Arc;
//! use rust_decimal::Decimal;
//! use tadbir_container::prelude::*;
//!
//! struct CashSettlement;
//!
//! impl SettlementBehavior for CashSettlement {
//!     fn kind(&self) -> &str { "CashSettlement" }
//!     fn settle(&self, amount: Decimal) -> Result<SettlementReceipt> {
//!         Ok(SettlementReceipt::new(self.kind(), amount, "Paid in cash"))
//!     }
//! }
//!
//! let registry = BehaviorRegistry::builder()
//!     .register("CashSettlement", CashSettlement)
//!     .alias("cash", "CashSettlement")
//!     .build()
//!     .expect("Failed to build registry");
//!
//! let behavior = registry.resolve("CASH").expect("Failed to resolve");
//! assert_eq!(behavior.kind(), "CashSettlement");
//! assert!(registry.resolve("CardSettlement").is_err());
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tadbir_support::rendering::suggest_similar;
use tracing::{debug, info, instrument, trace, warn};

use crate::behavior::{BehaviorKind, SettlementBehavior};
use crate::error::{BehaviorNotFoundError, Result, TadbirError};
use crate::key::BehaviorKey;
use crate::provider::{discovered_entries, BehaviorProvider, ProviderRegistry};
use crate::registry::{FactoryFn, Registration, Registry};
use crate::scope::Scope;

const MAX_SUGGESTIONS: usize = 3;

// ============================================================
// RegistryBuilder
// ============================================================

/// Builds a [`BehaviorRegistry`].
///
/// Register every behavior, then call
/// [`build()`](RegistryBuilder::build) to get an immutable,
/// thread-safe registry.
///
/// By default a repeated name replaces the earlier registration.
/// Call [`allow_override(false)`](RegistryBuilder::allow_override)
/// to turn repeats into a build error instead.
pub struct RegistryBuilder {
    registry: Registry,
    allow_override: bool,
    first_error: Option<TadbirError>,
}

impl RegistryBuilder {
    fn new() -> Self {
        Self {
            registry: Registry::new(),
            allow_override: true,
            first_error: None,
        }
    }

    /// Allow replacing previously registered behaviors.
    pub fn allow_override(mut self, allow: bool) -> Self {
        self.allow_override = allow;
        self
    }

    // ── Singleton: pre-built instance ──

    /// Register a behavior instance under `name`.
    pub fn register<B: SettlementBehavior + 'static>(
        self,
        name: impl Into<Cow<'static, str>>,
        behavior: B,
    ) -> Self {
        self.register_shared(name, Arc::new(behavior))
    }

    /// Register a behavior under its own [`BehaviorKind::KIND`].
    pub fn register_behavior<B: BehaviorKind + SettlementBehavior + 'static>(self, behavior: B) -> Self {
        self.register(B::KIND, behavior)
    }

    /// Register an instance that is already behind an `Arc`.
    ///
    /// Useful when the caller keeps a handle to the same instance.
    pub fn register_shared(
        mut self,
        name: impl Into<Cow<'static, str>>,
        behavior: Arc<dyn SettlementBehavior>,
    ) -> Self {
        self.register_instance(BehaviorKey::new(name), behavior);
        self
    }

    // ── Factories ──

    /// Register a factory called once, on first resolve.
    pub fn singleton_with(
        mut self,
        name: impl Into<Cow<'static, str>>,
        factory: impl Fn() -> Result<Arc<dyn SettlementBehavior>> + Send + Sync + 'static,
    ) -> Self {
        self.register_singleton(BehaviorKey::new(name), Arc::new(factory));
        self
    }

    /// Register a factory called on every resolve.
    pub fn transient_with(
        mut self,
        name: impl Into<Cow<'static, str>>,
        factory: impl Fn() -> Result<Arc<dyn SettlementBehavior>> + Send + Sync + 'static,
    ) -> Self {
        self.register_transient(BehaviorKey::new(name), Arc::new(factory));
        self
    }

    /// Make `alias` resolve to the behavior registered as `target`.
    pub fn alias(
        mut self,
        alias: impl Into<Cow<'static, str>>,
        target: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.register_alias(BehaviorKey::new(alias), BehaviorKey::new(target));
        self
    }

    // ── Provider modules ──

    /// Add a [`BehaviorProvider`] module.
    pub fn add_provider(mut self, provider: &dyn BehaviorProvider) -> Self {
        debug!(provider = provider.name(), "Adding provider");
        provider.register(&mut self);
        self
    }

    /// Register every [`BehaviorEntry`](crate::BehaviorEntry) submitted
    /// through `inventory`.
    pub fn discovered(mut self) -> Self {
        for entry in discovered_entries() {
            trace!(name = entry.name(), scope = %entry.scope(), "Discovered behavior");
            let construct = *entry;
            let factory: FactoryFn = Arc::new(move || Ok(construct.construct()));
            match entry.scope() {
                Scope::Singleton => self.register_singleton(BehaviorKey::new(entry.name()), factory),
                Scope::Transient => self.register_transient(BehaviorKey::new(entry.name()), factory),
            }
        }
        self
    }

    // ── Build ──

    /// Build the registry.
    ///
    /// Fails with the first registration error seen,
    /// [`TadbirError::AliasShadowsBehavior`] for an alias that reuses a
    /// behavior name, or [`TadbirError::BehaviorNotFound`] for an alias
    /// whose target was never registered.
    #[instrument(skip(self), name = "registry_build")]
    pub fn build(self) -> Result<BehaviorRegistry> {
        info!(registered = self.registry.len(), "Building behavior registry");

        if let Some(err) = self.first_error {
            warn!(error = %err, "Registration failed");
            return Err(err);
        }

        let registry = BehaviorRegistry {
            registry: self.registry,
        };

        for (alias, target) in registry.registry.aliases() {
            // Aliases are looked up first, so one named like a behavior would hide it.
            if registry.registry.contains_key(alias) {
                warn!(alias = %alias, target = %target, "Alias shadows a registered behavior");
                return Err(TadbirError::AliasShadowsBehavior {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
            if !registry.registry.contains_key(target) {
                warn!(alias = %alias, target = %target, "Alias points at an unregistered behavior");
                return Err(registry.not_found(target.name()));
            }
        }

        info!(behaviors = ?registry.names(), "Behavior registry built");
        Ok(registry)
    }

    // ── Internal ──

    fn insert(&mut self, key: BehaviorKey, scope: Scope, factory: FactoryFn) {
        let registration = Registration { key, factory, scope };
        if let Err(err) = self.registry.register(registration, self.allow_override) {
            self.first_error.get_or_insert(err);
        }
    }
}

/// Wraps `factory` so it runs at most once.
fn once(factory: FactoryFn) -> FactoryFn {
    let cell: OnceCell<Arc<dyn SettlementBehavior>> = OnceCell::new();
    Arc::new(move || cell.get_or_try_init(|| factory()).cloned())
}

// ProviderRegistry impl so providers can register into the builder
impl ProviderRegistry for RegistryBuilder {
    fn register_singleton(&mut self, key: BehaviorKey, factory: FactoryFn) {
        self.insert(key, Scope::Singleton, once(factory));
    }

    fn register_transient(&mut self, key: BehaviorKey, factory: FactoryFn) {
        self.insert(key, Scope::Transient, factory);
    }

    fn register_instance(&mut self, key: BehaviorKey, behavior: Arc<dyn SettlementBehavior>) {
        self.insert(key, Scope::Singleton, Arc::new(move || Ok(behavior.clone())));
    }

    fn register_alias(&mut self, from: BehaviorKey, to: BehaviorKey) {
        self.registry.register_alias(from, to);
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("registered", &self.registry.len())
            .field("allow_override", &self.allow_override)
            .finish()
    }
}

// ═══════════════════════════════════════════
// BehaviorRegistry
// ═══════════════════════════════════════════

/// Immutable, thread-safe map from behavior name to behavior.
///
/// Created by [`RegistryBuilder::build()`]. Lookups ignore case.
pub struct BehaviorRegistry {
    registry: Registry,
}

impl BehaviorRegistry {
    /// Create a new builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Resolve a behavior by name or alias.
    ///
    /// ```rust,ignore
    /// let card = registry.resolve("creditcardsettlement")?;
    /// ```
    ///
    /// # Errors
    /// [`TadbirError::BehaviorNotFound`] when nothing matches, or
    /// whatever the registered factory returned.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn SettlementBehavior>> {
        trace!(name, "Resolving behavior");

        let registration = self.registry.get(name).ok_or_else(|| {
            warn!(name, "Settlement behavior not found");
            self.not_found(name)
        })?;

        (registration.factory)()
    }

    /// Returns `true` if `name` resolves to a registration.
    pub fn contains(&self, name: &str) -> bool {
        self.registry.get(name).is_some()
    }

    /// Returns the scope `name` was registered with.
    pub fn scope_of(&self, name: &str) -> Option<Scope> {
        self.registry.get(name).map(|registration| registration.scope)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.registry.names()
    }

    /// Aliases and the names they point at, sorted by alias.
    pub fn aliases(&self) -> Vec<(&str, &str)> {
        let mut aliases: Vec<(&str, &str)> = self
            .registry
            .aliases()
            .map(|(from, to)| (from.name(), to.name()))
            .collect();
        aliases.sort_unstable();
        aliases
    }

    /// Returns the number of registered behaviors.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns true if no behaviors are registered.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    fn not_found(&self, name: &str) -> TadbirError {
        TadbirError::BehaviorNotFound(BehaviorNotFoundError {
            requested: name.to_string(),
            registered: self.names().into_iter().map(String::from).collect(),
            suggestions: suggest_similar(name, &self.registry.known_names(), MAX_SUGGESTIONS),
        })
    }
}

impl fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorRegistry")
            .field("registered", &self.registry.len())
            .field("names", &self.names())
            .finish()
    }
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{BehaviorRegistry, RegistryBuilder};
    pub use crate::account::{Account, AccountId};
    pub use crate::behavior::{BehaviorKind, SettlementBehavior, SettlementReceipt};
    pub use crate::error::{Result, TadbirError};
    pub use crate::key::BehaviorKey;
    pub use crate::provider::{BehaviorEntry, BehaviorProvider, ProviderRegistry};
    pub use crate::scope::Scope;
    pub use crate::service::SettlementService;
    pub use crate::transaction::{Transaction, TransactionId};
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::SettlementReceipt;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Card;

    impl BehaviorKind for Card {
        const KIND: &'static str = "CreditCardSettlement";
    }

    impl SettlementBehavior for Card {
        fn kind(&self) -> &str {
            Self::KIND
        }

        fn settle(&self, amount: Decimal) -> Result<SettlementReceipt> {
            Ok(SettlementReceipt::new(Self::KIND, amount, "Paid with credit card"))
        }
    }

    struct Wallet;

    impl SettlementBehavior for Wallet {
        fn kind(&self) -> &str {
            "WalletSettlement"
        }

        fn settle(&self, amount: Decimal) -> Result<SettlementReceipt> {
            Ok(SettlementReceipt::new(self.kind(), amount, "Paid with wallet"))
        }
    }

    fn card_and_wallet() -> BehaviorRegistry {
        BehaviorRegistry::builder()
            .register_behavior(Card)
            .register("WalletSettlement", Wallet)
            .build()
            .unwrap()
    }

    #[test]
    fn resolve_ignores_case() {
        let registry = card_and_wallet();
        let lower = registry.resolve("creditcardsettlement").unwrap();
        let exact = registry.resolve("CreditCardSettlement").unwrap();
        assert_eq!(lower.kind(), "CreditCardSettlement");
        assert!(Arc::ptr_eq(&lower, &exact));
    }

    #[test]
    fn distinct_names_resolve_distinct_behaviors() {
        let registry = card_and_wallet();
        assert_eq!(registry.resolve("CreditCardSettlement").unwrap().kind(), "CreditCardSettlement");
        assert_eq!(registry.resolve("WalletSettlement").unwrap().kind(), "WalletSettlement");
    }

    #[test]
    fn resolve_missing_reports_not_found() {
        let registry = BehaviorRegistry::builder().register_behavior(Card).build().unwrap();

        match registry.resolve("PaypalSettlement") {
            Err(TadbirError::BehaviorNotFound(e)) => {
                assert_eq!(e.requested, "PaypalSettlement");
                assert_eq!(e.registered, vec!["CreditCardSettlement".to_string()]);
            }
            other => panic!("Expected BehaviorNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn resolve_missing_suggests_close_names() {
        let registry = card_and_wallet();
        match registry.resolve("WaletSettlement") {
            Err(TadbirError::BehaviorNotFound(e)) => {
                assert_eq!(e.suggestions, vec!["WalletSettlement".to_string()]);
            }
            other => panic!("Expected BehaviorNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn empty_registry_builds() {
        let registry = BehaviorRegistry::builder().build().unwrap();
        assert!(registry.is_empty());
        assert!(registry.resolve("anything").is_err());
    }

    #[test]
    fn duplicate_overrides_by_default() {
        let registry = BehaviorRegistry::builder()
            .register("Primary", Card)
            .register("primary", Wallet)
            .build()
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("PRIMARY").unwrap().kind(), "WalletSettlement");
    }

    #[test]
    fn strict_builder_rejects_duplicates() {
        let result = BehaviorRegistry::builder()
            .allow_override(false)
            .register("Primary", Card)
            .register("primary", Wallet)
            .build();

        assert!(matches!(result, Err(TadbirError::AlreadyRegistered(_))));
    }

    #[test]
    fn alias_resolves_to_target() {
        let registry = BehaviorRegistry::builder()
            .register_behavior(Card)
            .alias("card", "CreditCardSettlement")
            .build()
            .unwrap();

        assert_eq!(registry.resolve("Card").unwrap().kind(), "CreditCardSettlement");
        assert!(registry.contains("CARD"));
        assert_eq!(registry.aliases(), vec![("card", "CreditCardSettlement")]);
    }

    #[test]
    fn alias_named_like_behavior_fails_build() {
        let result = BehaviorRegistry::builder()
            .register_behavior(Card)
            .register("WalletSettlement", Wallet)
            .alias("creditcardsettlement", "WalletSettlement")
            .build();

        match result {
            Err(TadbirError::AliasShadowsBehavior { alias, target }) => {
                assert_eq!(alias.name(), "creditcardsettlement");
                assert_eq!(target.name(), "WalletSettlement");
            }
            other => panic!("Expected AliasShadowsBehavior, got: {other:?}"),
        }
    }

    #[test]
    fn behavior_registered_after_same_named_alias_fails_build() {
        let result = BehaviorRegistry::builder()
            .register("WalletSettlement", Wallet)
            .alias("CreditCardSettlement", "WalletSettlement")
            .register_behavior(Card)
            .build();

        assert!(matches!(result, Err(TadbirError::AliasShadowsBehavior { .. })));
    }

    #[test]
    fn dangling_alias_fails_build() {
        let result = BehaviorRegistry::builder()
            .register_behavior(Card)
            .alias("wallet", "WalletSettlement")
            .build();

        match result {
            Err(TadbirError::BehaviorNotFound(e)) => assert_eq!(e.requested, "WalletSettlement"),
            other => panic!("Expected BehaviorNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn singleton_factory_called_once() {
        let counter = Arc::new(AtomicU32::new(0));

        let registry = BehaviorRegistry::builder()
            .singleton_with("CreditCardSettlement", {
                let counter = counter.clone();
                move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Arc::new(Card) as Arc<dyn SettlementBehavior>)
                }
            })
            .build()
            .unwrap();

        let a = registry.resolve("CreditCardSettlement").unwrap();
        let b = registry.resolve("creditcardsettlement").unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.scope_of("CreditCardSettlement"), Some(Scope::Singleton));
    }

    #[test]
    fn transient_factory_called_every_time() {
        let counter = Arc::new(AtomicU32::new(0));

        let registry = BehaviorRegistry::builder()
            .transient_with("WalletSettlement", {
                let counter = counter.clone();
                move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Arc::new(Wallet) as Arc<dyn SettlementBehavior>)
                }
            })
            .build()
            .unwrap();

        let a = registry.resolve("WalletSettlement").unwrap();
        let b = registry.resolve("WalletSettlement").unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(registry.scope_of("walletsettlement"), Some(Scope::Transient));
    }

    #[test]
    fn failing_factory_surfaces_error() {
        let registry = BehaviorRegistry::builder()
            .transient_with("Broken", || {
                Err(TadbirError::ConstructionFailed {
                    key: BehaviorKey::new("Broken"),
                    source: "gateway unreachable".into(),
                })
            })
            .build()
            .unwrap();

        assert!(matches!(
            registry.resolve("Broken"),
            Err(TadbirError::ConstructionFailed { .. })
        ));
    }

    #[test]
    fn provider_fills_builder() {
        struct Payments;

        impl BehaviorProvider for Payments {
            fn register(&self, registry: &mut dyn ProviderRegistry) {
                registry.register_instance(BehaviorKey::of::<Card>(), Arc::new(Card));
                registry.register_instance(BehaviorKey::new("WalletSettlement"), Arc::new(Wallet));
            }
        }

        let registry = BehaviorRegistry::builder().add_provider(&Payments).build().unwrap();
        assert_eq!(registry.names(), vec!["CreditCardSettlement", "WalletSettlement"]);
    }

    #[test]
    fn discovered_entries_are_registered() {
        let registry = BehaviorRegistry::builder().discovered().build().unwrap();
        // Submitted by the provider module's tests.
        assert!(registry.contains("VoucherSettlement"));
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        let registry = Arc::new(card_and_wallet());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || registry.resolve("walletsettlement").unwrap().kind().to_string())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "WalletSettlement");
        }
    }

    #[test]
    fn debug_display() {
        let debug = format!("{:?}", card_and_wallet());
        assert!(debug.contains("BehaviorRegistry"));
        assert!(debug.contains("2"));
    }
}
