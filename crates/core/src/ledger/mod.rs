//! Ledger module - the audit trail of every balance-affecting event.

mod ledger_model;
mod ledger_service;
mod ledger_traits;

pub use ledger_model::*;
pub use ledger_service::{ensure_sufficient_funds, reconcile, LedgerService};
pub use ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};

#[cfg(test)]
mod ledger_service_tests;
