//! Providers and discovered entries: the two ways a composition
//! root fills a registry.
//!
//! A [`BehaviorProvider`] groups related registrations in code:
//!
//! ```rust,ignore
//! struct CardProvider;
//!
//! impl BehaviorProvider for CardProvider {
//!     fn register(&self, registry: &mut dyn ProviderRegistry) {
//!         registry.register_instance(
//!             BehaviorKey::of::<CreditCardSettlement>(),
//!             Arc::new(CreditCardSettlement),
//!         );
//!         registry.register_alias("card".into(), BehaviorKey::of::<CreditCardSettlement>());
//!     }
//! }
//! ```
//!
//! A [`BehaviorEntry`] is submitted at compile time through
//! `inventory` and picked up by
//! [`RegistryBuilder::discovered`](crate::RegistryBuilder::discovered).

use std::any::type_name;
use std::sync::Arc;

use tadbir_support::rendering::short_type_name;

use crate::behavior::{BehaviorKind, SettlementBehavior};
use crate::key::BehaviorKey;
use crate::registry::FactoryFn;
use crate::scope::Scope;

/// A module that registers related behaviors into a builder.
pub trait BehaviorProvider: Send + Sync {
    /// Register behaviors into the builder.
    ///
    /// Called once, while the registry is being built.
    fn register(&self, registry: &mut dyn ProviderRegistry);

    /// Human-readable name for logs.
    fn name(&self) -> &str {
        short_type_name(type_name::<Self>())
    }
}

/// Interface that providers use to register behaviors.
///
/// A subset of the builder API, so providers can be tested against
/// a mock.
pub trait ProviderRegistry {
    /// Register a factory that runs once.
    fn register_singleton(&mut self, key: BehaviorKey, factory: FactoryFn);

    /// Register a factory that runs on every resolve.
    fn register_transient(&mut self, key: BehaviorKey, factory: FactoryFn);

    /// Register an already-built instance.
    fn register_instance(&mut self, key: BehaviorKey, behavior: Arc<dyn SettlementBehavior>);

    /// Register an alternative name for a registered behavior.
    fn register_alias(&mut self, from: BehaviorKey, to: BehaviorKey);
}

/// A `(name, constructor)` pair submitted at compile time.
///
/// ```rust,ignore
/// inventory::submit! { BehaviorEntry::of::<WalletSettlement>() }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BehaviorEntry {
    name: &'static str,
    scope: Scope,
    construct: fn() -> Arc<dyn SettlementBehavior>,
}

impl BehaviorEntry {
    pub const fn new(
        name: &'static str,
        scope: Scope,
        construct: fn() -> Arc<dyn SettlementBehavior>,
    ) -> Self {
        Self { name, scope, construct }
    }

    /// Entry for a default-constructible behavior, keyed by its kind.
    pub const fn of<B>() -> Self
    where
        B: BehaviorKind + SettlementBehavior + Default + 'static,
    {
        Self::new(B::KIND, Scope::Singleton, construct_default::<B>)
    }

    /// Same entry, but built fresh on every resolve.
    pub const fn transient(self) -> Self {
        Self {
            scope: Scope::Transient,
            ..self
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Builds a new instance.
    pub fn construct(&self) -> Arc<dyn SettlementBehavior> {
        (self.construct)()
    }
}

fn construct_default<B: SettlementBehavior + Default + 'static>() -> Arc<dyn SettlementBehavior> {
    Arc::new(B::default())
}

inventory::collect!(BehaviorEntry);

/// All entries submitted anywhere in the binary, sorted by name.
pub fn discovered_entries() -> Vec<&'static BehaviorEntry> {
    let mut entries: Vec<&'static BehaviorEntry> =
        inventory::iter::<BehaviorEntry>.into_iter().collect();
    entries.sort_by_key(|entry| entry.name);
    entries
}
