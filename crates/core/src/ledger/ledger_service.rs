use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::ledger_model::{
    BalanceChange, DebitPolicy, LedgerEntry, LedgerWrite, NewLedgerEntry, Reconciliation,
};
use super::ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
use crate::accounts::{Account, AccountRepositoryTrait};
use crate::errors::{DatabaseError, Error, Result, ValidationError};

/// Refuses a debit of `required` from `account` when its balance is short.
pub fn ensure_sufficient_funds(account: &Account, required: Decimal) -> Result<()> {
    if account.balance < required {
        warn!(
            "Refusing debit of {} from account {}: balance is {}",
            required, account.id, account.balance
        );
        return Err(Error::InsufficientFunds {
            account_id: account.id,
            required,
            available: account.balance,
        });
    }
    Ok(())
}

/// Checks `account.balance == opening_balance + Σ signed(entries)`.
///
/// Entries for other accounts are ignored.
pub fn reconcile(account: &Account, entries: &[LedgerEntry]) -> Reconciliation {
    let own: Vec<&LedgerEntry> = entries
        .iter()
        .filter(|e| e.account_id == Some(account.id))
        .collect();
    let ledger_total: Decimal = own.iter().map(|e| e.signed_amount()).sum();
    let expected_balance = account.opening_balance + ledger_total;
    let difference = account.balance - expected_balance;

    Reconciliation {
        account_id: account.id,
        opening_balance: account.opening_balance,
        ledger_total,
        expected_balance,
        actual_balance: account.balance,
        difference,
        entry_count: own.len(),
        is_consistent: difference.is_zero(),
    }
}

pub struct LedgerService {
    repository: Arc<dyn LedgerRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
}

impl LedgerService {
    pub fn new(
        repository: Arc<dyn LedgerRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            account_repository,
        }
    }
}

#[async_trait]
impl LedgerServiceTrait for LedgerService {
    async fn record_balance_change(
        &self,
        account_id: i64,
        delta: Decimal,
        description: &str,
        category: &str,
        entry_date: NaiveDate,
    ) -> Result<LedgerEntry> {
        if delta.is_zero() {
            return Err(Error::Validation(ValidationError::invalid(
                "Balance change must be non-zero",
            )));
        }
        // Fails early with NotFound instead of inside the write transaction.
        self.account_repository.get_by_id(account_id)?;

        let entry = BalanceChange::new(account_id, delta, description, category, entry_date)
            .into_entry();
        entry.validate()?;
        debug!(
            "Recording balance change of {} on account {} ({})",
            delta, account_id, category
        );
        self.repository
            .record(LedgerWrite::new(entry, DebitPolicy::AllowOverdraft))
            .await
    }

    async fn record_entry(&self, entry: NewLedgerEntry) -> Result<LedgerEntry> {
        entry.validate()?;
        if let Some(account_id) = entry.account_id {
            self.account_repository.get_by_id(account_id)?;
        }
        self.repository
            .record(LedgerWrite::new(entry, DebitPolicy::AllowOverdraft))
            .await
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<()> {
        let deleted = self.repository.delete(entry_id).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Ledger entry {}",
                entry_id
            ))));
        }
        Ok(())
    }

    fn list_entries(&self, account_id: Option<i64>) -> Result<Vec<LedgerEntry>> {
        self.repository.list(account_id)
    }

    fn reconcile_account(&self, account_id: i64) -> Result<Reconciliation> {
        let account = self.account_repository.get_by_id(account_id)?;
        let entries = self.repository.list(Some(account_id))?;
        Ok(reconcile(&account, &entries))
    }
}
