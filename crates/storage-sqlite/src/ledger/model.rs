//! Database model for ledger entries.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::utils::{parse_decimal, parse_enum};
use finboard_core::errors::Error;
use finboard_core::ledger::LedgerEntry;

const TABLE: &str = "ledger_entries";

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::ledger_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LedgerEntryDB {
    pub id: String,
    pub account_id: Option<i64>,
    pub entry_date: NaiveDate,
    pub description: String,
    pub category: String,
    pub entry_type: String,
    pub amount: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<LedgerEntryDB> for LedgerEntry {
    type Error = Error;

    fn try_from(db: LedgerEntryDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            account_id: db.account_id,
            entry_date: db.entry_date,
            description: db.description,
            category: db.category,
            entry_type: parse_enum(TABLE, "entry_type", &db.entry_type)?,
            amount: parse_decimal(TABLE, "amount", &db.amount)?,
            created_at: db.created_at,
        })
    }
}

impl From<LedgerEntry> for LedgerEntryDB {
    fn from(domain: LedgerEntry) -> Self {
        Self {
            id: domain.id,
            account_id: domain.account_id,
            entry_date: domain.entry_date,
            description: domain.description,
            category: domain.category,
            entry_type: domain.entry_type.as_str().to_string(),
            amount: domain.amount.to_string(),
            created_at: domain.created_at,
        }
    }
}
