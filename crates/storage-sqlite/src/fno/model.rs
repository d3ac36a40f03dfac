//! Database model for F&O trades.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::utils::{parse_decimal, parse_enum, parse_optional_decimal};
use finboard_core::errors::Error;
use finboard_core::fno::FnoTrade;

const TABLE: &str = "fno_trades";

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::fno_trades)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct FnoTradeDB {
    pub id: String,
    pub symbol: String,
    pub instrument: String,
    pub strike_price: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub side: String,
    pub quantity: String,
    pub lot_size: String,
    pub entry_price: String,
    pub exit_price: Option<String>,
    pub current_price: Option<String>,
    pub status: String,
    pub pnl: String,
    pub brokerage: String,
    pub account_id: Option<i64>,
    pub entry_date: NaiveDate,
    pub exit_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<FnoTradeDB> for FnoTrade {
    type Error = Error;

    fn try_from(db: FnoTradeDB) -> Result<Self, Self::Error> {
        Ok(Self {
            instrument: parse_enum(TABLE, "instrument", &db.instrument)?,
            side: parse_enum(TABLE, "side", &db.side)?,
            status: parse_enum(TABLE, "status", &db.status)?,
            strike_price: parse_optional_decimal(TABLE, "strike_price", db.strike_price.as_deref())?,
            quantity: parse_decimal(TABLE, "quantity", &db.quantity)?,
            lot_size: parse_decimal(TABLE, "lot_size", &db.lot_size)?,
            entry_price: parse_decimal(TABLE, "entry_price", &db.entry_price)?,
            exit_price: parse_optional_decimal(TABLE, "exit_price", db.exit_price.as_deref())?,
            current_price: parse_optional_decimal(
                TABLE,
                "current_price",
                db.current_price.as_deref(),
            )?,
            pnl: parse_decimal(TABLE, "pnl", &db.pnl)?,
            brokerage: parse_decimal(TABLE, "brokerage", &db.brokerage)?,
            id: db.id,
            symbol: db.symbol,
            expiry_date: db.expiry_date,
            account_id: db.account_id,
            entry_date: db.entry_date,
            exit_date: db.exit_date,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<FnoTrade> for FnoTradeDB {
    fn from(domain: FnoTrade) -> Self {
        Self {
            id: domain.id,
            symbol: domain.symbol,
            instrument: domain.instrument.as_str().to_string(),
            strike_price: domain.strike_price.map(|p| p.to_string()),
            expiry_date: domain.expiry_date,
            side: domain.side.as_str().to_string(),
            quantity: domain.quantity.to_string(),
            lot_size: domain.lot_size.to_string(),
            entry_price: domain.entry_price.to_string(),
            exit_price: domain.exit_price.map(|p| p.to_string()),
            current_price: domain.current_price.map(|p| p.to_string()),
            status: domain.status.as_str().to_string(),
            pnl: domain.pnl.to_string(),
            brokerage: domain.brokerage.to_string(),
            account_id: domain.account_id,
            entry_date: domain.entry_date,
            exit_date: domain.exit_date,
            notes: domain.notes,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
