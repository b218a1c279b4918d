use rust_decimal::Decimal;
use tracing::info;

use crate::{BehaviorKind, Result, SettlementBehavior, SettlementReceipt};

/// Pays by charging the customer's credit card.
///
/// Discovered at compile time; no provider needs to mention it.
#[derive(Debug, Default, Clone, Copy, BehaviorKind)]
#[behavior(discover)]
pub struct CreditCardSettlement;

impl SettlementBehavior for CreditCardSettlement {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn settle(&self, amount: Decimal) -> Result<SettlementReceipt> {
        // Card processor calls would go here.
        info!(%amount, "Paid with credit card");
        Ok(SettlementReceipt::new(Self::KIND, amount, "Paid with credit card"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn kind_is_type_name() {
        assert_eq!(CreditCardSettlement::KIND, "CreditCardSettlement");
        assert_eq!(CreditCardSettlement.kind(), "CreditCardSettlement");
    }

    #[test]
    fn settle_reports_card_payment() {
        let receipt = CreditCardSettlement.settle(dec!(50)).unwrap();
        assert_eq!(receipt.note, "Paid with credit card");
        assert_eq!(receipt.amount, dec!(50));
    }
}
