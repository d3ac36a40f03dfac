use std::fmt;

use log::error;
use serde::Serialize;

use crate::accounts::Account;
use crate::errors::Result;
use crate::fno::FnoTrade;
use crate::goals::Goal;
use crate::investments::{InvestmentTransaction, Lot};
use crate::ledger::LedgerEntry;
use crate::settings::Settings;
use crate::transfers::FamilyTransfer;

/// The collections kept in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Accounts,
    Ledger,
    Lots,
    Transactions,
    FnoTrades,
    Goals,
    Transfers,
    Settings,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Collection::Accounts,
        Collection::Ledger,
        Collection::Lots,
        Collection::Transactions,
        Collection::FnoTrades,
        Collection::Goals,
        Collection::Transfers,
        Collection::Settings,
    ];
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Accounts => "accounts",
            Collection::Ledger => "ledger",
            Collection::Lots => "lots",
            Collection::Transactions => "transactions",
            Collection::FnoTrades => "fno_trades",
            Collection::Goals => "goals",
            Collection::Transfers => "transfers",
            Collection::Settings => "settings",
        };
        f.write_str(name)
    }
}

/// In-memory copy of the record store.
#[derive(Debug, Clone, Default)]
pub struct FinanceData {
    pub accounts: Vec<Account>,
    /// Newest first.
    pub ledger: Vec<LedgerEntry>,
    /// All asset classes, in purchase order.
    pub lots: Vec<Lot>,
    /// Newest first.
    pub transactions: Vec<InvestmentTransaction>,
    pub fno_trades: Vec<FnoTrade>,
    pub goals: Vec<Goal>,
    pub transfers: Vec<FamilyTransfer>,
    pub settings: Settings,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadFailure {
    pub collection: Collection,
    pub message: String,
}

/// Outcome of a bulk load. Failed collections were left empty.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, collection: Collection) -> bool {
        self.failures.iter().any(|f| f.collection == collection)
    }

    /// Unwraps a read, recording and logging the failure and falling back
    /// to the empty value.
    pub(crate) fn take<T: Default>(&mut self, collection: Collection, result: Result<T>) -> T {
        match result {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to load {}: {}", collection, e);
                self.failures.push(LoadFailure {
                    collection,
                    message: e.to_string(),
                });
                T::default()
            }
        }
    }
}
