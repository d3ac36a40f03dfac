//! Family transfer models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{ensure_not_blank, ensure_positive};
use crate::Result;

/// Money sent to a family member out of a tracked account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FamilyTransfer {
    pub id: String,
    pub recipient: String,
    pub relationship: Option<String>,
    pub amount: Decimal,
    pub account_id: i64,
    pub transfer_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFamilyTransfer {
    pub recipient: String,
    pub relationship: Option<String>,
    pub amount: Decimal,
    pub account_id: i64,
    pub transfer_date: NaiveDate,
    pub notes: Option<String>,
}

impl NewFamilyTransfer {
    pub fn into_transfer(self, id: String, now: NaiveDateTime) -> FamilyTransfer {
        FamilyTransfer {
            id,
            recipient: self.recipient.trim().to_string(),
            relationship: self.relationship,
            amount: self.amount,
            account_id: self.account_id,
            transfer_date: self.transfer_date,
            notes: self.notes,
            created_at: now,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("recipient", &self.recipient)?;
        ensure_positive("amount", self.amount)
    }

    pub fn description(&self) -> String {
        match &self.relationship {
            Some(relationship) if !relationship.trim().is_empty() => {
                format!("Transfer to {} ({})", self.recipient, relationship)
            }
            _ => format!("Transfer to {}", self.recipient),
        }
    }
}
