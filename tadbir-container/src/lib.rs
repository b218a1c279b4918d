//! Core registry and settlement context for Tadbir.

pub mod account;
pub mod behavior;
pub mod container;
pub mod error;
pub mod key;
pub mod provider;
pub mod registry;
pub mod scope;
pub mod service;
pub mod transaction;

pub use account::{Account, AccountId};
pub use behavior::{BehaviorKind, SettlementBehavior, SettlementReceipt};
pub use container::{prelude, BehaviorRegistry, RegistryBuilder};
pub use error::{Result, TadbirError};
pub use key::BehaviorKey;
pub use provider::{BehaviorEntry, BehaviorProvider, ProviderRegistry};
pub use scope::Scope;
pub use service::SettlementService;
pub use transaction::{Transaction, TransactionId};

#[doc(hidden)]
pub use inventory as __inventory;
