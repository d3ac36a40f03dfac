//! Database models for lots and investment transactions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::utils::{parse_decimal, parse_enum, parse_optional_decimal};
use finboard_core::errors::Error;
use finboard_core::investments::{InvestmentTransaction, Lot};

/// Database model for lots
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::lots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct LotDB {
    pub id: String,
    pub asset_class: String,
    pub symbol: String,
    pub name: Option<String>,
    pub venue: String,
    pub quantity: String,
    pub cost_basis: String,
    pub current_price: String,
    pub previous_price: Option<String>,
    pub current_value: String,
    pub unrealized_pnl: String,
    pub account_id: Option<i64>,
    pub purchase_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<LotDB> for Lot {
    type Error = Error;

    fn try_from(db: LotDB) -> Result<Self, Self::Error> {
        const TABLE: &str = "lots";
        Ok(Self {
            asset_class: parse_enum(TABLE, "asset_class", &db.asset_class)?,
            quantity: parse_decimal(TABLE, "quantity", &db.quantity)?,
            cost_basis: parse_decimal(TABLE, "cost_basis", &db.cost_basis)?,
            current_price: parse_decimal(TABLE, "current_price", &db.current_price)?,
            previous_price: parse_optional_decimal(
                TABLE,
                "previous_price",
                db.previous_price.as_deref(),
            )?,
            current_value: parse_decimal(TABLE, "current_value", &db.current_value)?,
            unrealized_pnl: parse_decimal(TABLE, "unrealized_pnl", &db.unrealized_pnl)?,
            id: db.id,
            symbol: db.symbol,
            name: db.name,
            venue: db.venue,
            account_id: db.account_id,
            purchase_date: db.purchase_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Lot> for LotDB {
    fn from(domain: Lot) -> Self {
        Self {
            id: domain.id,
            asset_class: domain.asset_class.as_str().to_string(),
            symbol: domain.symbol,
            name: domain.name,
            venue: domain.venue,
            quantity: domain.quantity.to_string(),
            cost_basis: domain.cost_basis.to_string(),
            current_price: domain.current_price.to_string(),
            previous_price: domain.previous_price.map(|p| p.to_string()),
            current_value: domain.current_value.to_string(),
            unrealized_pnl: domain.unrealized_pnl.to_string(),
            account_id: domain.account_id,
            purchase_date: domain.purchase_date,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

/// Database model for investment transactions
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::investment_transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestmentTransactionDB {
    pub id: String,
    pub asset_class: String,
    pub symbol: String,
    pub venue: String,
    pub transaction_type: String,
    pub quantity: String,
    pub price: String,
    pub amount: String,
    pub brokerage: String,
    pub taxes: String,
    pub realized_pnl: Option<String>,
    pub account_id: Option<i64>,
    pub transaction_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl TryFrom<InvestmentTransactionDB> for InvestmentTransaction {
    type Error = Error;

    fn try_from(db: InvestmentTransactionDB) -> Result<Self, Self::Error> {
        const TABLE: &str = "investment_transactions";
        Ok(Self {
            asset_class: parse_enum(TABLE, "asset_class", &db.asset_class)?,
            transaction_type: parse_enum(TABLE, "transaction_type", &db.transaction_type)?,
            quantity: parse_decimal(TABLE, "quantity", &db.quantity)?,
            price: parse_decimal(TABLE, "price", &db.price)?,
            amount: parse_decimal(TABLE, "amount", &db.amount)?,
            brokerage: parse_decimal(TABLE, "brokerage", &db.brokerage)?,
            taxes: parse_decimal(TABLE, "taxes", &db.taxes)?,
            realized_pnl: parse_optional_decimal(TABLE, "realized_pnl", db.realized_pnl.as_deref())?,
            id: db.id,
            symbol: db.symbol,
            venue: db.venue,
            account_id: db.account_id,
            transaction_date: db.transaction_date,
            created_at: db.created_at,
        })
    }
}

impl From<InvestmentTransaction> for InvestmentTransactionDB {
    fn from(domain: InvestmentTransaction) -> Self {
        Self {
            id: domain.id,
            asset_class: domain.asset_class.as_str().to_string(),
            symbol: domain.symbol,
            venue: domain.venue,
            transaction_type: domain.transaction_type.as_str().to_string(),
            quantity: domain.quantity.to_string(),
            price: domain.price.to_string(),
            amount: domain.amount.to_string(),
            brokerage: domain.brokerage.to_string(),
            taxes: domain.taxes.to_string(),
            realized_pnl: domain.realized_pnl.map(|p| p.to_string()),
            account_id: domain.account_id,
            transaction_date: domain.transaction_date,
            created_at: domain.created_at,
        }
    }
}
