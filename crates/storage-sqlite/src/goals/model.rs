//! Database models for goals.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::utils::parse_decimal;
use finboard_core::errors::Error;
use finboard_core::goals::Goal;

const TABLE: &str = "goals";

/// Database model for goals
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct GoalDB {
    pub id: String,
    pub name: String,
    pub category: String,
    pub target_amount: String,
    pub current_amount: String,
    pub target_date: Option<NaiveDate>,
    pub account_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<GoalDB> for Goal {
    type Error = Error;

    fn try_from(db: GoalDB) -> Result<Self, Self::Error> {
        Ok(Self {
            target_amount: parse_decimal(TABLE, "target_amount", &db.target_amount)?,
            current_amount: parse_decimal(TABLE, "current_amount", &db.current_amount)?,
            id: db.id,
            name: db.name,
            category: db.category,
            target_date: db.target_date,
            account_id: db.account_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Goal> for GoalDB {
    fn from(domain: Goal) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            category: domain.category,
            target_amount: domain.target_amount.to_string(),
            current_amount: domain.current_amount.to_string(),
            target_date: domain.target_date,
            account_id: domain.account_id,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
