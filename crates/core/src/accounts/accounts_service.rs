use chrono::Utc;
use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::constants::ledger_categories;
use crate::errors::{ensure_positive, DatabaseError, Error, Result};
use crate::ledger::LedgerEntry;
use crate::ledger::LedgerServiceTrait;

/// Service for managing accounts
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
    ledger_service: Arc<dyn LedgerServiceTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(
        repository: Arc<dyn AccountRepositoryTrait>,
        ledger_service: Arc<dyn LedgerServiceTrait>,
    ) -> Self {
        Self {
            repository,
            ledger_service,
        }
    }
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        debug!(
            "Creating account '{}' in {} with opening balance {}",
            new_account.name, new_account.currency, new_account.opening_balance
        );
        self.repository.create(new_account).await
    }

    async fn update_account(&self, account_update: AccountUpdate) -> Result<Account> {
        account_update.validate()?;
        self.repository.update(account_update).await
    }

    async fn delete_account(&self, account_id: i64) -> Result<()> {
        let deleted = self.repository.delete(account_id).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Account {}",
                account_id
            ))));
        }
        Ok(())
    }

    fn get_account(&self, account_id: i64) -> Result<Account> {
        self.repository.get_by_id(account_id)
    }

    fn list_accounts(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>> {
        self.repository.list(is_active_filter)
    }

    async fn add_funds(
        &self,
        account_id: i64,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<LedgerEntry> {
        ensure_positive("amount", amount)?;
        let description = description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| "Funds added".to_string());
        self.ledger_service
            .record_balance_change(
                account_id,
                amount,
                &description,
                ledger_categories::DEPOSIT,
                Utc::now().date_naive(),
            )
            .await
    }

    async fn set_balance(
        &self,
        account_id: i64,
        new_balance: Decimal,
    ) -> Result<Option<LedgerEntry>> {
        let account = self.repository.get_by_id(account_id)?;
        let delta = new_balance - account.balance;
        if delta.is_zero() {
            return Ok(None);
        }
        info!(
            "Adjusting balance of account {} from {} to {}",
            account_id, account.balance, new_balance
        );
        let entry = self
            .ledger_service
            .record_balance_change(
                account_id,
                delta,
                &format!("Balance adjustment for {}", account.name),
                ledger_categories::ADJUSTMENT,
                Utc::now().date_naive(),
            )
            .await?;
        Ok(Some(entry))
    }
}
