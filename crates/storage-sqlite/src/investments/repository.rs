use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::{InvestmentTransactionDB, LotDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::ledger::record_in_tx;
use crate::schema::{investment_transactions, lots};
use crate::utils::{new_id, now};
use finboard_core::errors::{DatabaseError, Error, Result};
use finboard_core::investments::{
    AssetClass, InvestmentRepositoryTrait, InvestmentTransaction, Lot, LotPriceUpdate,
    TradeOutcome, TradeWrite,
};

pub struct InvestmentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InvestmentRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_lot(conn: &mut SqliteConnection, lot_id: &str) -> Result<Lot> {
    lots::table
        .find(lot_id)
        .select(LotDB::as_select())
        .first::<LotDB>(conn)
        .into_core()?
        .try_into()
}

fn save_lot(conn: &mut SqliteConnection, lot: &Lot) -> Result<()> {
    let row = LotDB::from(lot.clone());
    let updated = diesel::update(lots::table.find(&row.id))
        .set(&row)
        .execute(conn)
        .into_core()?;
    if updated == 0 {
        return Err(Error::Database(DatabaseError::NotFound(format!(
            "Lot {}",
            row.id
        ))));
    }
    Ok(())
}

#[async_trait]
impl InvestmentRepositoryTrait for InvestmentRepository {
    fn list_lots(&self, asset_class: Option<AssetClass>) -> Result<Vec<Lot>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = lots::table.into_boxed();
        if let Some(asset_class) = asset_class {
            query = query.filter(lots::asset_class.eq(asset_class.as_str()));
        }

        query
            .select(LotDB::as_select())
            .order((lots::purchase_date.asc(), lots::created_at.asc()))
            .load::<LotDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Lot::try_from)
            .collect()
    }

    fn list_transactions(
        &self,
        asset_class: Option<AssetClass>,
    ) -> Result<Vec<InvestmentTransaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = investment_transactions::table.into_boxed();
        if let Some(asset_class) = asset_class {
            query = query.filter(investment_transactions::asset_class.eq(asset_class.as_str()));
        }

        query
            .select(InvestmentTransactionDB::as_select())
            .order((
                investment_transactions::transaction_date.desc(),
                investment_transactions::created_at.desc(),
            ))
            .load::<InvestmentTransactionDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(InvestmentTransaction::try_from)
            .collect()
    }

    async fn execute_trade(&self, trade: TradeWrite) -> Result<TradeOutcome> {
        self.writer
            .exec(move |conn| {
                let ledger_entry = trade.ledger.map(|w| record_in_tx(conn, w)).transpose()?;
                let timestamp = now();

                let mut touched = Vec::new();
                if let Some(new_lot) = trade.new_lot {
                    let lot = new_lot.into_lot(new_id(), timestamp);
                    diesel::insert_into(lots::table)
                        .values(LotDB::from(lot.clone()))
                        .execute(conn)
                        .into_core()?;
                    touched.push(lot);
                }
                for mut lot in trade.lot_updates {
                    lot.updated_at = timestamp;
                    save_lot(conn, &lot)?;
                    touched.push(lot);
                }

                let transaction = trade.transaction.into_transaction(new_id(), timestamp);
                diesel::insert_into(investment_transactions::table)
                    .values(InvestmentTransactionDB::from(transaction.clone()))
                    .execute(conn)
                    .into_core()?;

                debug!(
                    "Recorded {} {} ({} lots touched)",
                    transaction.transaction_type,
                    transaction.symbol,
                    touched.len()
                );
                Ok(TradeOutcome {
                    lots: touched,
                    transaction,
                    ledger_entry,
                })
            })
            .await
    }

    async fn update_lot_prices(&self, updates: Vec<LotPriceUpdate>) -> Result<Vec<Lot>> {
        self.writer
            .exec(move |conn| {
                let timestamp = now();
                updates
                    .into_iter()
                    .map(|update| -> Result<Lot> {
                        let mut lot = load_lot(conn, &update.lot_id)?;
                        lot.reprice(update.current_price, update.previous_price);
                        lot.updated_at = timestamp;
                        save_lot(conn, &lot)?;
                        Ok(lot)
                    })
                    .collect()
            })
            .await
    }

    async fn delete_lot(&self, lot_id: &str) -> Result<usize> {
        let lot_id = lot_id.to_string();
        self.writer
            .exec(move |conn| diesel::delete(lots::table.find(lot_id)).execute(conn).into_core())
            .await
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<usize> {
        let transaction_id = transaction_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(investment_transactions::table.find(transaction_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
