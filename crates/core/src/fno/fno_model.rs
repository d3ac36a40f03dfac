//! F&O (futures and options) trade models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{ensure_not_blank, ensure_positive, ValidationError};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FnoInstrument {
    Future,
    Call,
    Put,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSide {
    Long,
    Short,
}

impl TradeSide {
    fn direction(&self) -> Decimal {
        match self {
            TradeSide::Long => Decimal::ONE,
            TradeSide::Short => Decimal::NEGATIVE_ONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FnoStatus {
    Open,
    Closed,
}

macro_rules! string_enum {
    ($ty:ty { $($variant:path => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($variant => $text),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s.trim().to_uppercase().as_str() {
                    $($text => Ok($variant),)+
                    other => Err(Error::Validation(ValidationError::invalid(format!(
                        "Unknown {} '{}'",
                        stringify!($ty),
                        other
                    )))),
                }
            }
        }
    };
}

string_enum!(FnoInstrument {
    FnoInstrument::Future => "FUTURE",
    FnoInstrument::Call => "CALL",
    FnoInstrument::Put => "PUT",
});

string_enum!(TradeSide {
    TradeSide::Long => "LONG",
    TradeSide::Short => "SHORT",
});

string_enum!(FnoStatus {
    FnoStatus::Open => "OPEN",
    FnoStatus::Closed => "CLOSED",
});

/// Gross P&L of moving from `entry` to `exit` on `quantity` units.
pub fn gross_pnl(side: TradeSide, entry: Decimal, exit: Decimal, quantity: Decimal) -> Decimal {
    (exit - entry) * quantity * side.direction()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FnoTrade {
    pub id: String,
    pub symbol: String,
    pub instrument: FnoInstrument,
    pub strike_price: Option<Decimal>,
    pub expiry_date: Option<NaiveDate>,
    pub side: TradeSide,
    /// Number of lots traded.
    pub quantity: Decimal,
    /// Units per lot.
    pub lot_size: Decimal,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub status: FnoStatus,
    /// Realized once closed; provisional mark-to-market while open.
    pub pnl: Decimal,
    pub brokerage: Decimal,
    pub account_id: Option<i64>,
    pub entry_date: NaiveDate,
    pub exit_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl FnoTrade {
    pub fn is_closed(&self) -> bool {
        self.status == FnoStatus::Closed
    }

    pub fn units(&self) -> Decimal {
        self.quantity * self.lot_size
    }

    /// Marks an open trade to `price`, updating its provisional P&L.
    pub fn mark_to_market(&mut self, price: Decimal) {
        self.current_price = Some(price);
        self.pnl = gross_pnl(self.side, self.entry_price, price, self.units());
    }

    /// Closes the trade at `exit_price`; the final P&L is net of all
    /// brokerage.
    pub fn close(&mut self, exit_price: Decimal, exit_date: NaiveDate, exit_brokerage: Decimal) {
        self.brokerage += exit_brokerage;
        self.exit_price = Some(exit_price);
        self.current_price = Some(exit_price);
        self.exit_date = Some(exit_date);
        self.status = FnoStatus::Closed;
        self.pnl = gross_pnl(self.side, self.entry_price, exit_price, self.units()) - self.brokerage;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFnoTrade {
    pub symbol: String,
    pub instrument: FnoInstrument,
    pub strike_price: Option<Decimal>,
    pub expiry_date: Option<NaiveDate>,
    pub side: TradeSide,
    pub quantity: Decimal,
    #[serde(default = "default_lot_size")]
    pub lot_size: Decimal,
    pub entry_price: Decimal,
    #[serde(default)]
    pub brokerage: Decimal,
    pub account_id: Option<i64>,
    pub entry_date: NaiveDate,
    pub notes: Option<String>,
}

impl NewFnoTrade {
    pub fn into_trade(self, id: String, now: NaiveDateTime) -> FnoTrade {
        FnoTrade {
            id,
            symbol: self.symbol.trim().to_uppercase(),
            instrument: self.instrument,
            strike_price: self.strike_price,
            expiry_date: self.expiry_date,
            side: self.side,
            quantity: self.quantity,
            lot_size: self.lot_size,
            entry_price: self.entry_price,
            exit_price: None,
            current_price: None,
            status: FnoStatus::Open,
            pnl: Decimal::ZERO,
            brokerage: self.brokerage,
            account_id: self.account_id,
            entry_date: self.entry_date,
            exit_date: None,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

fn default_lot_size() -> Decimal {
    Decimal::ONE
}

impl NewFnoTrade {
    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("symbol", &self.symbol)?;
        ensure_positive("quantity", self.quantity)?;
        ensure_positive("lotSize", self.lot_size)?;
        ensure_positive("entryPrice", self.entry_price)?;
        if self.brokerage < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::invalid(
                "Brokerage cannot be negative",
            )));
        }
        if self.instrument != FnoInstrument::Future && self.strike_price.is_none() {
            return Err(Error::Validation(ValidationError::MissingField(
                "strikePrice".to_string(),
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseFnoTrade {
    pub exit_price: Decimal,
    pub exit_date: NaiveDate,
    #[serde(default)]
    pub brokerage: Decimal,
}

impl CloseFnoTrade {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("exitPrice", self.exit_price)?;
        if self.brokerage < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::invalid(
                "Brokerage cannot be negative",
            )));
        }
        Ok(())
    }
}
