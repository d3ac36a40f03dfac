use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::LedgerEntryDB;
use crate::accounts::load_account;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{accounts, ledger_entries};
use crate::utils::{new_id, now};
use finboard_core::errors::Result;
use finboard_core::ledger::{
    ensure_sufficient_funds, DebitPolicy, LedgerEntry, LedgerRepositoryTrait, LedgerWrite,
};

/// Applies a ledger write on an open transaction: re-checks the debit
/// policy against the current balance, moves the balance and inserts the
/// entry. Every repository that moves money goes through here.
pub(crate) fn record_in_tx(conn: &mut SqliteConnection, write: LedgerWrite) -> Result<LedgerEntry> {
    let timestamp = now();
    if let Some(account_id) = write.entry.account_id {
        let account = load_account(conn, account_id)?;
        if write.policy == DebitPolicy::RequireFunds && write.entry.is_debit() {
            ensure_sufficient_funds(&account, write.entry.amount)?;
        }
        let new_balance = account.balance + write.entry.signed_amount();
        diesel::update(accounts::table.find(account_id))
            .set((
                accounts::balance.eq(new_balance.to_string()),
                accounts::updated_at.eq(timestamp),
            ))
            .execute(conn)
            .into_core()?;
        debug!(
            "Account {} balance {} -> {}",
            account_id, account.balance, new_balance
        );
    }

    let entry = write.entry.into_entry(new_id(), timestamp);
    diesel::insert_into(ledger_entries::table)
        .values(LedgerEntryDB::from(entry.clone()))
        .execute(conn)
        .into_core()?;
    Ok(entry)
}

pub struct LedgerRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LedgerRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl LedgerRepositoryTrait for LedgerRepository {
    async fn record(&self, write: LedgerWrite) -> Result<LedgerEntry> {
        self.writer.exec(move |conn| record_in_tx(conn, write)).await
    }

    async fn delete(&self, entry_id: &str) -> Result<usize> {
        let entry_id = entry_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(ledger_entries::table.find(entry_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn list(&self, account_id: Option<i64>) -> Result<Vec<LedgerEntry>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = ledger_entries::table.into_boxed();
        if let Some(account_id) = account_id {
            query = query.filter(ledger_entries::account_id.eq(account_id));
        }

        query
            .select(LedgerEntryDB::as_select())
            .order((
                ledger_entries::entry_date.desc(),
                ledger_entries::created_at.desc(),
            ))
            .load::<LedgerEntryDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(LedgerEntry::try_from)
            .collect()
    }
}
