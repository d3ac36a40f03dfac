//! Ledger domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{ensure_not_blank, ensure_positive, ValidationError};
use crate::{Error, Result};

/// Direction of a ledger entry. Income increases the account balance,
/// Expense decreases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerEntryType {
    Income,
    Expense,
}

impl LedgerEntryType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LedgerEntryType::Income => "Income",
            LedgerEntryType::Expense => "Expense",
        }
    }
}

impl fmt::Display for LedgerEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerEntryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Income" => Ok(LedgerEntryType::Income),
            "Expense" => Ok(LedgerEntryType::Expense),
            other => Err(Error::Validation(ValidationError::invalid(format!(
                "Unknown ledger entry type '{}'",
                other
            )))),
        }
    }
}

/// One balance-affecting event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    pub account_id: Option<i64>,
    pub entry_date: NaiveDate,
    pub description: String,
    pub category: String,
    pub entry_type: LedgerEntryType,
    pub amount: Decimal,
    pub created_at: NaiveDateTime,
}

impl LedgerEntry {
    /// The signed effect of this entry on its account balance.
    pub fn signed_amount(&self) -> Decimal {
        signed(self.entry_type, self.amount)
    }
}

fn signed(entry_type: LedgerEntryType, amount: Decimal) -> Decimal {
    match entry_type {
        LedgerEntryType::Income => amount,
        LedgerEntryType::Expense => -amount,
    }
}

/// Input model for a new ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewLedgerEntry {
    pub account_id: Option<i64>,
    pub entry_date: NaiveDate,
    pub description: String,
    pub category: String,
    pub entry_type: LedgerEntryType,
    pub amount: Decimal,
}

impl NewLedgerEntry {
    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("description", &self.description)?;
        ensure_not_blank("category", &self.category)?;
        ensure_positive("amount", self.amount)
    }

    pub fn signed_amount(&self) -> Decimal {
        signed(self.entry_type, self.amount)
    }

    pub fn is_debit(&self) -> bool {
        self.entry_type == LedgerEntryType::Expense
    }

    pub fn into_entry(self, id: String, now: NaiveDateTime) -> LedgerEntry {
        LedgerEntry {
            id,
            account_id: self.account_id,
            entry_date: self.entry_date,
            description: self.description,
            category: self.category,
            entry_type: self.entry_type,
            amount: self.amount,
            created_at: now,
        }
    }
}

/// Whether a debit may take the account below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitPolicy {
    /// Refuse the write when `balance < amount`.
    RequireFunds,
    /// Let the balance go negative (settlements, manual edits).
    AllowOverdraft,
}

/// A signed change to one account balance, the input of
/// `record_balance_change`.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceChange {
    pub account_id: i64,
    pub delta: Decimal,
    pub description: String,
    pub category: String,
    pub entry_date: NaiveDate,
}

impl BalanceChange {
    pub fn new(
        account_id: i64,
        delta: Decimal,
        description: impl Into<String>,
        category: impl Into<String>,
        entry_date: NaiveDate,
    ) -> Self {
        Self {
            account_id,
            delta,
            description: description.into(),
            category: category.into(),
            entry_date,
        }
    }

    /// Synthesizes the ledger entry: Income for a positive delta, Expense
    /// otherwise, with the absolute value as amount.
    pub fn into_entry(self) -> NewLedgerEntry {
        let entry_type = if self.delta > Decimal::ZERO {
            LedgerEntryType::Income
        } else {
            LedgerEntryType::Expense
        };
        NewLedgerEntry {
            account_id: Some(self.account_id),
            entry_date: self.entry_date,
            description: self.description,
            category: self.category,
            entry_type,
            amount: self.delta.abs(),
        }
    }
}

/// A ledger entry bundled with the debit policy the store must enforce.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerWrite {
    pub entry: NewLedgerEntry,
    pub policy: DebitPolicy,
}

impl LedgerWrite {
    pub fn new(entry: NewLedgerEntry, policy: DebitPolicy) -> Self {
        Self { entry, policy }
    }
}

/// Result of checking an account balance against its ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub account_id: i64,
    pub opening_balance: Decimal,
    pub ledger_total: Decimal,
    pub expected_balance: Decimal,
    pub actual_balance: Decimal,
    pub difference: Decimal,
    pub entry_count: usize,
    pub is_consistent: bool,
}
