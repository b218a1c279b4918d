//! One run of the demo: open an order, pay it, report the balances.

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::cli::{Cli, Selection};
use crate::{
    Account, AccountId, BehaviorRegistry, Result, Scope, SettlementReceipt, SettlementService,
    Transaction, TransactionId,
};

/// What a run produced.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Settled(Report),
    Listed { behaviors: Vec<ListedBehavior> },
}

/// Before/after view of a settled order.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub mode: &'static str,
    pub order: TransactionId,
    pub balance_before: Decimal,
    pub balance_after: Decimal,
    pub receipt: SettlementReceipt,
    pub account: Account,
}

/// A registered behavior as shown by `list`.
#[derive(Debug, Clone, Serialize)]
pub struct ListedBehavior {
    pub name: String,
    pub scope: Scope,
    pub aliases: Vec<String>,
}

/// Executes `cli` against `registry`.
pub fn run(cli: &Cli, registry: Arc<BehaviorRegistry>) -> Result<Outcome> {
    let Some(selection) = cli.command.selection() else {
        return Ok(Outcome::Listed {
            behaviors: list(&registry),
        });
    };

    let mut account = Account::new(AccountId(cli.account_id), cli.account_name.clone());
    let order = TransactionId(cli.order_id);

    let (mode, balance_before, receipt) = match selection {
        Selection::Direct(method) => {
            // No transaction: the account accrues and pays on its own.
            if !cli.no_accrue {
                account.accrue(cli.amount)?;
            }
            let balance_before = account.balance();
            let behavior = method.behavior();
            let receipt = account.settle_with(behavior.as_ref(), cli.amount)?;
            ("direct", balance_before, receipt)
        }
        Selection::Context(method) => {
            let mut transaction = place_order(cli, order, &mut account)?;
            let balance_before = transaction.account().balance();
            transaction.assign(method.behavior());
            ("context", balance_before, transaction.settle()?)
        }
        Selection::Service(name) => {
            let mut transaction = place_order(cli, order, &mut account)?;
            let balance_before = transaction.account().balance();
            let service = SettlementService::new(registry);
            ("service", balance_before, service.settle(&mut transaction, name)?)
        }
    };

    info!(mode, account = %account.id(), balance = %account.balance(), "Order settled");

    Ok(Outcome::Settled(Report {
        mode,
        order,
        balance_before,
        balance_after: account.balance(),
        receipt,
        account,
    }))
}

fn place_order<'a>(
    cli: &Cli,
    order: TransactionId,
    account: &'a mut Account,
) -> Result<Transaction<'a>> {
    if cli.no_accrue {
        Transaction::new(order, cli.amount, account)
    } else {
        Transaction::open(order, cli.amount, account)
    }
}

fn list(registry: &BehaviorRegistry) -> Vec<ListedBehavior> {
    let aliases = registry.aliases();
    registry
        .names()
        .into_iter()
        .map(|name| ListedBehavior {
            name: name.to_string(),
            scope: registry.scope_of(name).unwrap_or_default(),
            aliases: aliases
                .iter()
                .filter(|(_, target)| target.eq_ignore_ascii_case(name))
                .map(|(alias, _)| alias.to_string())
                .collect(),
        })
        .collect()
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Settled(report) => fmt::Display::fmt(report, f),
            Outcome::Listed { behaviors } => {
                for behavior in behaviors {
                    write!(f, "{} [{}]", behavior.name, behavior.scope)?;
                    if !behavior.aliases.is_empty() {
                        write!(f, " aliases: {}", behavior.aliases.join(", "))?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Account {} outstanding balance before payment: {}",
            self.account.name(),
            self.balance_before
        )?;
        writeln!(f, "{}", self.receipt.note)?;
        writeln!(
            f,
            "Account {} outstanding balance after payment: {}",
            self.account.name(),
            self.balance_after
        )
    }
}
