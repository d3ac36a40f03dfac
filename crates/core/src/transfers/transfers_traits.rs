use async_trait::async_trait;

use super::transfers_model::{FamilyTransfer, NewFamilyTransfer};
use crate::errors::Result;
use crate::ledger::{LedgerEntry, LedgerWrite};

#[async_trait]
pub trait TransferRepositoryTrait: Send + Sync {
    fn list_transfers(&self) -> Result<Vec<FamilyTransfer>>;

    /// Inserts the transfer and applies its debit in one store transaction.
    async fn insert_transfer(
        &self,
        new_transfer: NewFamilyTransfer,
        debit: LedgerWrite,
    ) -> Result<(FamilyTransfer, LedgerEntry)>;

    /// Removes the transfer row only; the debit stays on the ledger.
    async fn delete_transfer(&self, transfer_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait TransferServiceTrait: Send + Sync {
    fn list_transfers(&self) -> Result<Vec<FamilyTransfer>>;

    async fn create_transfer(
        &self,
        new_transfer: NewFamilyTransfer,
    ) -> Result<(FamilyTransfer, LedgerEntry)>;

    async fn delete_transfer(&self, transfer_id: &str) -> Result<()>;
}
