//! Built-in settlement behaviors.

mod credit_card;
mod wallet;

pub use credit_card::CreditCardSettlement;
pub use wallet::WalletSettlement;
