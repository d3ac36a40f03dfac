use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::FnoTradeDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::ledger::record_in_tx;
use crate::schema::fno_trades;
use crate::utils::{new_id, now};
use finboard_core::errors::{DatabaseError, Error, Result};
use finboard_core::fno::{FnoRepositoryTrait, FnoTrade, NewFnoTrade};
use finboard_core::ledger::{LedgerEntry, LedgerWrite};

pub struct FnoRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FnoRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn save_trade(conn: &mut SqliteConnection, mut trade: FnoTrade) -> Result<FnoTrade> {
    trade.updated_at = now();
    let row = FnoTradeDB::from(trade.clone());
    let updated = diesel::update(fno_trades::table.find(&row.id))
        .set(&row)
        .execute(conn)
        .into_core()?;
    if updated == 0 {
        return Err(Error::Database(DatabaseError::NotFound(format!(
            "F&O trade {}",
            trade.id
        ))));
    }
    Ok(trade)
}

#[async_trait]
impl FnoRepositoryTrait for FnoRepository {
    fn list_trades(&self) -> Result<Vec<FnoTrade>> {
        let mut conn = get_connection(&self.pool)?;
        fno_trades::table
            .select(FnoTradeDB::as_select())
            .order((fno_trades::entry_date.desc(), fno_trades::created_at.desc()))
            .load::<FnoTradeDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(FnoTrade::try_from)
            .collect()
    }

    fn get_trade(&self, trade_id: &str) -> Result<FnoTrade> {
        let mut conn = get_connection(&self.pool)?;
        fno_trades::table
            .find(trade_id)
            .select(FnoTradeDB::as_select())
            .first::<FnoTradeDB>(&mut conn)
            .into_core()?
            .try_into()
    }

    async fn insert_trade(&self, new_trade: NewFnoTrade) -> Result<FnoTrade> {
        self.writer
            .exec(move |conn| {
                let trade = new_trade.into_trade(new_id(), now());
                diesel::insert_into(fno_trades::table)
                    .values(FnoTradeDB::from(trade.clone()))
                    .execute(conn)
                    .into_core()?;
                Ok(trade)
            })
            .await
    }

    async fn update_trade(&self, trade: FnoTrade) -> Result<FnoTrade> {
        self.writer.exec(move |conn| save_trade(conn, trade)).await
    }

    async fn close_trade(
        &self,
        trade: FnoTrade,
        settlement: Option<LedgerWrite>,
    ) -> Result<(FnoTrade, Option<LedgerEntry>)> {
        self.writer
            .exec(move |conn| {
                let entry = settlement.map(|w| record_in_tx(conn, w)).transpose()?;
                let trade = save_trade(conn, trade)?;
                Ok((trade, entry))
            })
            .await
    }

    async fn delete_trade(&self, trade_id: &str) -> Result<usize> {
        let trade_id = trade_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(fno_trades::table.find(trade_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
