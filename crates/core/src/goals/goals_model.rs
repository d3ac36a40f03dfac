//! Goals domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{ensure_not_blank, ensure_positive, ValidationError};
use crate::{Error, Result};

/// Domain model representing a savings goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub category: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: Option<NaiveDate>,
    pub account_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Goal {
    /// Completion percentage, capped at 100. A zero target reads as 0%.
    pub fn progress(&self) -> Decimal {
        goal_progress(self.current_amount, self.target_amount)
    }

    pub fn is_achieved(&self) -> bool {
        self.target_amount > Decimal::ZERO && self.current_amount >= self.target_amount
    }
}

pub fn goal_progress(current: Decimal, target: Decimal) -> Decimal {
    if target <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (current / target * dec!(100)).min(dec!(100))
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    #[serde(default = "default_goal_category")]
    pub category: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    pub target_date: Option<NaiveDate>,
    pub account_id: Option<i64>,
}

fn default_goal_category() -> String {
    "General".to_string()
}

impl NewGoal {
    pub fn into_goal(self, id: String, now: NaiveDateTime) -> Goal {
        Goal {
            id,
            name: self.name.trim().to_string(),
            category: self.category,
            target_amount: self.target_amount,
            current_amount: self.current_amount,
            target_date: self.target_date,
            account_id: self.account_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("name", &self.name)?;
        ensure_positive("targetAmount", self.target_amount)?;
        if self.current_amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::invalid(
                "Current amount cannot be negative",
            )));
        }
        Ok(())
    }
}

/// Editable goal fields. The saved amount only moves through contributions.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub id: String,
    pub name: String,
    pub category: String,
    pub target_amount: Decimal,
    pub target_date: Option<NaiveDate>,
    pub account_id: Option<i64>,
}

impl GoalUpdate {
    /// Applies the editable fields onto `goal`, keeping its saved amount.
    pub fn apply_to(self, goal: Goal, now: NaiveDateTime) -> Goal {
        Goal {
            name: self.name.trim().to_string(),
            category: self.category,
            target_amount: self.target_amount,
            target_date: self.target_date,
            account_id: self.account_id,
            updated_at: now,
            ..goal
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("id", &self.id)?;
        ensure_not_blank("name", &self.name)?;
        ensure_positive("targetAmount", self.target_amount)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalContribution {
    pub amount: Decimal,
    /// Account to debit; falls back to the goal's linked account.
    pub account_id: Option<i64>,
    pub contribution_date: NaiveDate,
}
