use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::{AccountDB, NewAccountDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::accounts;
use crate::utils::now;
use finboard_core::accounts::{Account, AccountRepositoryTrait, AccountUpdate, NewAccount};
use finboard_core::errors::Result;

/// Repository for managing account data in the database
pub struct AccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccountRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

/// Loads one account row inside an open connection or transaction.
pub(crate) fn load_account(conn: &mut SqliteConnection, account_id: i64) -> Result<Account> {
    accounts::table
        .find(account_id)
        .select(AccountDB::as_select())
        .first::<AccountDB>(conn)
        .into_core()?
        .try_into()
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        self.writer
            .exec(move |conn| {
                let row = NewAccountDB::from_domain(new_account, now());
                let inserted = diesel::insert_into(accounts::table)
                    .values(&row)
                    .returning(AccountDB::as_returning())
                    .get_result::<AccountDB>(conn)
                    .into_core()?;
                debug!("Created account {}", inserted.id);
                inserted.try_into()
            })
            .await
    }

    async fn update(&self, account_update: AccountUpdate) -> Result<Account> {
        self.writer
            .exec(move |conn| {
                let existing = load_account(conn, account_update.id)?;
                let updated = account_update.apply_to(existing, now());
                let row = AccountDB::from(updated.clone());

                diesel::update(accounts::table.find(row.id))
                    .set(&row)
                    .execute(conn)
                    .into_core()?;

                Ok(updated)
            })
            .await
    }

    async fn delete(&self, account_id: i64) -> Result<usize> {
        self.writer
            .exec(move |conn| {
                diesel::delete(accounts::table.find(account_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, account_id: i64) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;
        load_account(&mut conn, account_id)
    }

    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = accounts::table.into_boxed();
        if let Some(active) = is_active_filter {
            query = query.filter(accounts::is_active.eq(active));
        }

        query
            .select(AccountDB::as_select())
            .order((accounts::is_active.desc(), accounts::name.asc()))
            .load::<AccountDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }
}
