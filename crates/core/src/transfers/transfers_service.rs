use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::transfers_model::{FamilyTransfer, NewFamilyTransfer};
use super::transfers_traits::{TransferRepositoryTrait, TransferServiceTrait};
use crate::accounts::AccountRepositoryTrait;
use crate::constants::ledger_categories;
use crate::errors::{DatabaseError, Error, Result};
use crate::ledger::{ensure_sufficient_funds, BalanceChange, DebitPolicy, LedgerEntry, LedgerWrite};

pub struct TransferService {
    repository: Arc<dyn TransferRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
}

impl TransferService {
    pub fn new(
        repository: Arc<dyn TransferRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            account_repository,
        }
    }
}

#[async_trait]
impl TransferServiceTrait for TransferService {
    fn list_transfers(&self) -> Result<Vec<FamilyTransfer>> {
        self.repository.list_transfers()
    }

    async fn create_transfer(
        &self,
        new_transfer: NewFamilyTransfer,
    ) -> Result<(FamilyTransfer, LedgerEntry)> {
        new_transfer.validate()?;
        let account = self.account_repository.get_by_id(new_transfer.account_id)?;
        ensure_sufficient_funds(&account, new_transfer.amount)?;

        let entry = BalanceChange::new(
            account.id,
            -new_transfer.amount,
            new_transfer.description(),
            ledger_categories::FAMILY_TRANSFER,
            new_transfer.transfer_date,
        )
        .into_entry();
        debug!(
            "Transferring {} from account {} to {}",
            new_transfer.amount, account.id, new_transfer.recipient
        );
        self.repository
            .insert_transfer(new_transfer, LedgerWrite::new(entry, DebitPolicy::RequireFunds))
            .await
    }

    async fn delete_transfer(&self, transfer_id: &str) -> Result<()> {
        let deleted = self.repository.delete_transfer(transfer_id).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Transfer {}",
                transfer_id
            ))));
        }
        Ok(())
    }
}
