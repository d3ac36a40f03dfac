//! Account domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{ensure_not_blank, ValidationError};
use crate::{Error, Result};

/// Currencies an account can be denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Usd,
}

impl Currency {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "INR" => Ok(Currency::Inr),
            "USD" => Ok(Currency::Usd),
            other => Err(Error::UnsupportedCurrency(other.to_string())),
        }
    }
}

/// Domain model representing a cash account.
///
/// `balance` is only ever changed through the ledger; `opening_balance` is the
/// balance the account was created with and anchors reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub account_type: String,
    pub bank_name: Option<String>,
    pub currency: Currency,
    pub opening_balance: Decimal,
    pub balance: Decimal,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    pub account_type: String,
    pub bank_name: Option<String>,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub opening_balance: Decimal,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl NewAccount {
    pub fn into_account(self, id: i64, now: NaiveDateTime) -> Account {
        Account {
            id,
            name: self.name.trim().to_string(),
            account_type: self.account_type,
            bank_name: self.bank_name,
            currency: self.currency,
            opening_balance: self.opening_balance,
            balance: self.opening_balance,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("name", &self.name)?;
        if self.account_type.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account type cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating an existing account.
///
/// The balance is deliberately absent: balance edits go through
/// `AccountServiceTrait::set_balance` so they leave a ledger trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub id: i64,
    pub name: String,
    pub account_type: String,
    pub bank_name: Option<String>,
    pub is_active: bool,
}

impl AccountUpdate {
    pub fn apply_to(self, account: Account, now: NaiveDateTime) -> Account {
        Account {
            name: self.name.trim().to_string(),
            account_type: self.account_type,
            bank_name: self.bank_name,
            is_active: self.is_active,
            updated_at: now,
            ..account
        }
    }

    /// Validates the account update data.
    pub fn validate(&self) -> Result<()> {
        if self.id <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account ID is required for updates".to_string(),
            )));
        }
        ensure_not_blank("name", &self.name)
    }
}

/// Request to deposit money into an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFunds {
    pub amount: Decimal,
    pub description: Option<String>,
}

/// Request to overwrite an account balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBalance {
    pub balance: Decimal,
}
