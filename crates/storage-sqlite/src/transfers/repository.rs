use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::FamilyTransferDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::ledger::record_in_tx;
use crate::schema::family_transfers;
use crate::utils::{new_id, now};
use finboard_core::errors::Result;
use finboard_core::ledger::{LedgerEntry, LedgerWrite};
use finboard_core::transfers::{FamilyTransfer, NewFamilyTransfer, TransferRepositoryTrait};

pub struct TransferRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransferRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl TransferRepositoryTrait for TransferRepository {
    fn list_transfers(&self) -> Result<Vec<FamilyTransfer>> {
        let mut conn = get_connection(&self.pool)?;
        family_transfers::table
            .select(FamilyTransferDB::as_select())
            .order((
                family_transfers::transfer_date.desc(),
                family_transfers::created_at.desc(),
            ))
            .load::<FamilyTransferDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(FamilyTransfer::try_from)
            .collect()
    }

    async fn insert_transfer(
        &self,
        new_transfer: NewFamilyTransfer,
        debit: LedgerWrite,
    ) -> Result<(FamilyTransfer, LedgerEntry)> {
        self.writer
            .exec(move |conn| {
                let entry = record_in_tx(conn, debit)?;
                let transfer = new_transfer.into_transfer(new_id(), now());
                diesel::insert_into(family_transfers::table)
                    .values(FamilyTransferDB::from(transfer.clone()))
                    .execute(conn)
                    .into_core()?;
                Ok((transfer, entry))
            })
            .await
    }

    async fn delete_transfer(&self, transfer_id: &str) -> Result<usize> {
        let transfer_id = transfer_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(family_transfers::table.find(transfer_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
