use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::utils::parse_decimal;
use finboard_core::errors::Error;
use finboard_core::transfers::FamilyTransfer;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::family_transfers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FamilyTransferDB {
    pub id: String,
    pub recipient: String,
    pub relationship: Option<String>,
    pub amount: String,
    pub account_id: i64,
    pub transfer_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<FamilyTransferDB> for FamilyTransfer {
    type Error = Error;

    fn try_from(db: FamilyTransferDB) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: parse_decimal("family_transfers", "amount", &db.amount)?,
            id: db.id,
            recipient: db.recipient,
            relationship: db.relationship,
            account_id: db.account_id,
            transfer_date: db.transfer_date,
            notes: db.notes,
            created_at: db.created_at,
        })
    }
}

impl From<FamilyTransfer> for FamilyTransferDB {
    fn from(domain: FamilyTransfer) -> Self {
        Self {
            id: domain.id,
            recipient: domain.recipient,
            relationship: domain.relationship,
            amount: domain.amount.to_string(),
            account_id: domain.account_id,
            transfer_date: domain.transfer_date,
            notes: domain.notes,
            created_at: domain.created_at,
        }
    }
}
