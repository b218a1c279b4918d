//! # Tadbir: runtime-selectable settlement strategies
//!
//! Pay an account's outstanding balance with a payment behavior
//! chosen three ways:
//!
//! - **direct**: call a concrete behavior yourself ([`Account::settle_with`])
//! - **context**: bind a behavior to a [`Transaction`] and let it settle
//! - **service**: name the behavior and let a [`SettlementService`]
//!   resolve it from a [`BehaviorRegistry`]
//!
//! ```rust
//! use std::sync::Arc;
//! use rust_decimal::Decimal;
//! use tadbir::{wiring, Account, AccountId, SettlementService, Transaction, TransactionId};
//!
//! let service = SettlementService::new(Arc::new(wiring::default_registry().unwrap()));
//!
//! let mut account = Account::new(AccountId(1), "Demo Customer");
//! let mut order = Transaction::open(TransactionId(1), Decimal::from(50), &mut account).unwrap();
//! service.settle(&mut order, "walletsettlement").unwrap();
//!
//! assert_eq!(account.balance(), Decimal::ZERO);
//! ```

// Lets `#[derive(BehaviorKind)]` expand to `::tadbir` paths in this crate too.
extern crate self as tadbir;

pub use tadbir_container::*;
pub use tadbir_derive::*;
pub use tadbir_support::*;
#[doc(hidden)]
pub use tadbir_container::__inventory;

pub mod app;
pub mod behaviors;
pub mod cli;
pub mod wiring;
