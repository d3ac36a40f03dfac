//! Database model for accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{parse_decimal, parse_enum};
use finboard_core::accounts::{Account, NewAccount};
use finboard_core::errors::Error;

const TABLE: &str = "accounts";

/// Database model for accounts
#[derive(Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: i64,
    pub name: String,
    pub account_type: String,
    pub bank_name: Option<String>,
    pub currency: String,
    pub opening_balance: String,
    pub balance: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert model; the id is assigned by SQLite.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
pub struct NewAccountDB {
    pub name: String,
    pub account_type: String,
    pub bank_name: Option<String>,
    pub currency: String,
    pub opening_balance: String,
    pub balance: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<AccountDB> for Account {
    type Error = Error;

    fn try_from(db: AccountDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            name: db.name,
            account_type: db.account_type,
            bank_name: db.bank_name,
            currency: parse_enum(TABLE, "currency", &db.currency)?,
            opening_balance: parse_decimal(TABLE, "opening_balance", &db.opening_balance)?,
            balance: parse_decimal(TABLE, "balance", &db.balance)?,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Account> for AccountDB {
    fn from(domain: Account) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            account_type: domain.account_type,
            bank_name: domain.bank_name,
            currency: domain.currency.as_str().to_string(),
            opening_balance: domain.opening_balance.to_string(),
            balance: domain.balance.to_string(),
            is_active: domain.is_active,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

impl NewAccountDB {
    pub fn from_domain(domain: NewAccount, now: NaiveDateTime) -> Self {
        // The id is ignored on insert.
        let account = AccountDB::from(domain.into_account(0, now));
        Self {
            name: account.name,
            account_type: account.account_type,
            bank_name: account.bank_name,
            currency: account.currency,
            opening_balance: account.opening_balance,
            balance: account.balance,
            is_active: account.is_active,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
