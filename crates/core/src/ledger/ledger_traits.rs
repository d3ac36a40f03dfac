//! Ledger repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::ledger_model::{LedgerEntry, LedgerWrite, NewLedgerEntry, Reconciliation};
use crate::errors::Result;

/// Persistence contract for ledger entries.
#[async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    /// Inserts the entry and, when it references an account, applies its
    /// signed amount to that account's balance in the same store
    /// transaction. The store re-checks the debit policy inside the
    /// transaction and fails with `Error::InsufficientFunds` if violated.
    async fn record(&self, write: LedgerWrite) -> Result<LedgerEntry>;

    /// Removes the entry. The balance it produced is left untouched.
    async fn delete(&self, entry_id: &str) -> Result<usize>;

    /// Lists entries, newest first, optionally for one account.
    fn list(&self, account_id: Option<i64>) -> Result<Vec<LedgerEntry>>;
}

/// Business operations over the ledger.
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    /// Applies `delta` to the account and logs exactly one entry for it.
    async fn record_balance_change(
        &self,
        account_id: i64,
        delta: Decimal,
        description: &str,
        category: &str,
        entry_date: NaiveDate,
    ) -> Result<LedgerEntry>;

    /// Records a user-entered income or expense.
    async fn record_entry(&self, entry: NewLedgerEntry) -> Result<LedgerEntry>;

    async fn delete_entry(&self, entry_id: &str) -> Result<()>;

    fn list_entries(&self, account_id: Option<i64>) -> Result<Vec<LedgerEntry>>;

    /// Compares an account's balance with its opening balance plus the sum
    /// of its ledger entries.
    fn reconcile_account(&self, account_id: i64) -> Result<Reconciliation>;
}
