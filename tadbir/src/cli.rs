use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::behaviors::{CreditCardSettlement, WalletSettlement};
use crate::SettlementBehavior;

/// Settle an order with a payment behavior chosen at runtime.
#[derive(Parser, Debug, Clone)]
#[command(name = "tadbir", author, version, about, long_about = None)]
pub struct Cli {
    /// Display name of the customer account
    #[arg(long, default_value = "Demo Customer", global = true)]
    pub account_name: String,

    /// Identifier of the customer account
    #[arg(long, default_value_t = 1, global = true)]
    pub account_id: u64,

    /// Identifier of the order being paid
    #[arg(long, default_value_t = 1, global = true)]
    pub order_id: u64,

    /// Order value; accrued onto the balance, then settled
    #[arg(long, default_value = "50", global = true)]
    pub amount: Decimal,

    /// Settle without accruing the order first (balance ends negative)
    #[arg(long, global = true)]
    pub no_accrue: bool,

    /// Print the result as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// How the behavior gets picked.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Pay with a concrete behavior, no transaction in between
    Direct {
        #[arg(long, value_enum, default_value_t = Method::CreditCard)]
        method: Method,
    },
    /// Bind a concrete behavior to the order and let the order pay
    Context {
        #[arg(long, value_enum, default_value_t = Method::CreditCard)]
        method: Method,
    },
    /// Look the behavior up by name in the registry
    Service {
        /// Registered name or alias, any case
        #[arg(long, default_value = "WalletSettlement")]
        behavior: String,
    },
    /// Print the registered behaviors and aliases
    List,
}

/// A settling command, with the listing case taken out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
    Direct(Method),
    Context(Method),
    Service(&'a str),
}

impl Command {
    /// The behavior selection, or `None` for `list`.
    pub fn selection(&self) -> Option<Selection<'_>> {
        match self {
            Command::Direct { method } => Some(Selection::Direct(*method)),
            Command::Context { method } => Some(Selection::Context(*method)),
            Command::Service { behavior } => Some(Selection::Service(behavior)),
            Command::List => None,
        }
    }
}

/// Behaviors selectable without the registry.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    CreditCard,
    Wallet,
}

impl Method {
    /// Instantiates the concrete behavior.
    pub fn behavior(self) -> Arc<dyn SettlementBehavior> {
        match self {
            Method::CreditCard => Arc::new(CreditCardSettlement),
            Method::Wallet => Arc::new(WalletSettlement::default()),
        }
    }
}
