//! Investment domain models: asset classes, lots and their transactions.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EXCHANGE_VENUE, DEFAULT_FUND_VENUE};
use crate::errors::{ensure_not_blank, ensure_positive, ValidationError};
use crate::ledger::LedgerWrite;
use crate::{Error, Result};

/// The asset classes tracked by the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetClass {
    Stock,
    MutualFund,
    Bond,
    Fno,
}

impl AssetClass {
    pub const ALL: [AssetClass; 4] = [
        AssetClass::Stock,
        AssetClass::MutualFund,
        AssetClass::Bond,
        AssetClass::Fno,
    ];

    /// Classes held as lots (F&O is tracked as trades instead).
    pub const HELD: [AssetClass; 3] = [AssetClass::Stock, AssetClass::MutualFund, AssetClass::Bond];

    pub const fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Stock => "STOCK",
            AssetClass::MutualFund => "MUTUAL_FUND",
            AssetClass::Bond => "BOND",
            AssetClass::Fno => "FNO",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            AssetClass::Stock => "Stocks",
            AssetClass::MutualFund => "Mutual Funds",
            AssetClass::Bond => "Bonds",
            AssetClass::Fno => "F&O",
        }
    }

    /// Venue used when a lot carries none.
    pub const fn default_venue(&self) -> &'static str {
        match self {
            AssetClass::MutualFund => DEFAULT_FUND_VENUE,
            _ => DEFAULT_EXCHANGE_VENUE,
        }
    }

    /// Mutual funds have no venue: every lot lands on the fund venue.
    pub const fn has_venue(&self) -> bool {
        !matches!(self, AssetClass::MutualFund)
    }

    /// Whether brokerage and taxes are read from each transaction.
    pub const fn tracks_transaction_charges(&self) -> bool {
        matches!(self, AssetClass::Stock | AssetClass::Bond)
    }

    /// Whether lots carry a maintained unrealized P&L.
    pub const fn stores_lot_pnl(&self) -> bool {
        !matches!(self, AssetClass::MutualFund)
    }

    /// Normalizes a user-supplied venue into the aggregation key form.
    pub fn normalize_venue(&self, venue: Option<&str>) -> String {
        if !self.has_venue() {
            return DEFAULT_FUND_VENUE.to_string();
        }
        match venue.map(str::trim) {
            Some(v) if !v.is_empty() => v.to_uppercase(),
            _ => self.default_venue().to_string(),
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "STOCK" | "STOCKS" => Ok(AssetClass::Stock),
            "MUTUAL_FUND" | "MUTUAL_FUNDS" | "MF" => Ok(AssetClass::MutualFund),
            "BOND" | "BONDS" => Ok(AssetClass::Bond),
            "FNO" | "F&O" => Ok(AssetClass::Fno),
            other => Err(Error::Validation(ValidationError::invalid(format!(
                "Unknown asset class '{}'",
                other
            )))),
        }
    }
}

/// Transaction types recorded per asset class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Buy,
    Sell,
    Sip,
    Maturity,
    Interest,
}

impl TransactionType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "BUY",
            TransactionType::Sell => "SELL",
            TransactionType::Sip => "SIP",
            TransactionType::Maturity => "MATURITY",
            TransactionType::Interest => "INTEREST",
        }
    }

    /// Money leaving the owner into the asset.
    pub const fn is_outflow(&self) -> bool {
        matches!(self, TransactionType::Buy | TransactionType::Sip)
    }

    /// Money returning to the owner from the asset. Maturity and interest
    /// only exist for bonds.
    pub fn is_inflow(&self, asset_class: AssetClass) -> bool {
        match self {
            TransactionType::Sell => true,
            TransactionType::Maturity | TransactionType::Interest => {
                asset_class == AssetClass::Bond
            }
            _ => false,
        }
    }

    /// Whether this type may be recorded for `asset_class`.
    pub fn is_valid_for(&self, asset_class: AssetClass) -> bool {
        match self {
            TransactionType::Buy | TransactionType::Sell => asset_class != AssetClass::Fno,
            TransactionType::Sip => asset_class == AssetClass::MutualFund,
            TransactionType::Maturity | TransactionType::Interest => {
                asset_class == AssetClass::Bond
            }
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(TransactionType::Buy),
            "SELL" => Ok(TransactionType::Sell),
            "SIP" => Ok(TransactionType::Sip),
            "MATURITY" => Ok(TransactionType::Maturity),
            "INTEREST" => Ok(TransactionType::Interest),
            other => Err(Error::Validation(ValidationError::invalid(format!(
                "Unknown transaction type '{}'",
                other
            )))),
        }
    }
}

/// One stored ownership lot of an instrument, prior to aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    pub id: String,
    pub asset_class: AssetClass,
    pub symbol: String,
    pub name: Option<String>,
    pub venue: String,
    pub quantity: Decimal,
    pub cost_basis: Decimal,
    pub current_price: Decimal,
    pub previous_price: Option<Decimal>,
    pub current_value: Decimal,
    pub unrealized_pnl: Decimal,
    pub account_id: Option<i64>,
    pub purchase_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Lot {
    /// Whether the lot still holds units.
    pub fn is_open(&self) -> bool {
        self.quantity > Decimal::ZERO
    }

    /// Recomputes value and P&L from quantity, cost and current price.
    pub fn recompute(&mut self) {
        self.current_value = self.quantity * self.current_price;
        self.unrealized_pnl = self.current_value - self.cost_basis;
    }

    /// Marks the lot to a new price; the old price becomes the previous one
    /// unless an explicit previous price is supplied.
    pub fn reprice(&mut self, current_price: Decimal, previous_price: Option<Decimal>) {
        self.previous_price = previous_price.or(Some(self.current_price));
        self.current_price = current_price;
        self.recompute();
    }

    /// Case-insensitive match on the aggregation key.
    pub fn matches(&self, asset_class: AssetClass, symbol: &str, venue: &str) -> bool {
        self.asset_class == asset_class
            && self.symbol.eq_ignore_ascii_case(symbol)
            && self.venue.eq_ignore_ascii_case(venue)
    }
}

/// Input model for a lot to be inserted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewLot {
    pub asset_class: AssetClass,
    pub symbol: String,
    pub name: Option<String>,
    pub venue: String,
    pub quantity: Decimal,
    pub cost_basis: Decimal,
    pub current_price: Decimal,
    pub previous_price: Option<Decimal>,
    pub account_id: Option<i64>,
    pub purchase_date: NaiveDate,
}

impl NewLot {
    pub fn current_value(&self) -> Decimal {
        self.quantity * self.current_price
    }

    pub fn unrealized_pnl(&self) -> Decimal {
        self.current_value() - self.cost_basis
    }

    pub fn into_lot(self, id: String, now: NaiveDateTime) -> Lot {
        Lot {
            id,
            current_value: self.current_value(),
            unrealized_pnl: self.unrealized_pnl(),
            asset_class: self.asset_class,
            symbol: self.symbol,
            name: self.name,
            venue: self.venue,
            quantity: self.quantity,
            cost_basis: self.cost_basis,
            current_price: self.current_price,
            previous_price: self.previous_price,
            account_id: self.account_id,
            purchase_date: self.purchase_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Immutable record of a buy, sell or income event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentTransaction {
    pub id: String,
    pub asset_class: AssetClass,
    pub symbol: String,
    pub venue: String,
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    pub price: Decimal,
    pub amount: Decimal,
    pub brokerage: Decimal,
    pub taxes: Decimal,
    pub realized_pnl: Option<Decimal>,
    pub account_id: Option<i64>,
    pub transaction_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl InvestmentTransaction {
    /// Brokerage plus taxes.
    pub fn charges(&self) -> Decimal {
        self.brokerage + self.taxes
    }
}

/// Input model for a transaction to be inserted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestmentTransaction {
    pub asset_class: AssetClass,
    pub symbol: String,
    pub venue: String,
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    pub price: Decimal,
    pub amount: Decimal,
    pub brokerage: Decimal,
    pub taxes: Decimal,
    pub realized_pnl: Option<Decimal>,
    pub account_id: Option<i64>,
    pub transaction_date: NaiveDate,
}

impl NewInvestmentTransaction {
    pub fn into_transaction(self, id: String, now: NaiveDateTime) -> InvestmentTransaction {
        InvestmentTransaction {
            id,
            asset_class: self.asset_class,
            symbol: self.symbol,
            venue: self.venue,
            transaction_type: self.transaction_type,
            quantity: self.quantity,
            price: self.price,
            amount: self.amount,
            brokerage: self.brokerage,
            taxes: self.taxes,
            realized_pnl: self.realized_pnl,
            account_id: self.account_id,
            transaction_date: self.transaction_date,
            created_at: now,
        }
    }
}

/// Request to buy units of an instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyRequest {
    pub asset_class: AssetClass,
    pub symbol: String,
    pub name: Option<String>,
    pub venue: Option<String>,
    pub quantity: Decimal,
    pub price: Decimal,
    /// Latest market price when it differs from the purchase price.
    pub current_price: Option<Decimal>,
    pub previous_price: Option<Decimal>,
    #[serde(default)]
    pub brokerage: Decimal,
    #[serde(default)]
    pub taxes: Decimal,
    /// `Buy` unless this is a mutual fund `Sip` installment.
    pub transaction_type: Option<TransactionType>,
    pub account_id: Option<i64>,
    pub transaction_date: NaiveDate,
}

impl BuyRequest {
    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("symbol", &self.symbol)?;
        ensure_positive("quantity", self.quantity)?;
        ensure_positive("price", self.price)?;
        if self.brokerage < Decimal::ZERO || self.taxes < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::invalid(
                "Brokerage and taxes cannot be negative",
            )));
        }
        let transaction_type = self.transaction_type();
        if !transaction_type.is_outflow() || !transaction_type.is_valid_for(self.asset_class) {
            return Err(Error::Validation(ValidationError::invalid(format!(
                "{} is not a purchase type for {}",
                transaction_type, self.asset_class
            ))));
        }
        Ok(())
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type.unwrap_or(TransactionType::Buy)
    }

    /// Units × price, excluding charges.
    pub fn gross_amount(&self) -> Decimal {
        self.quantity * self.price
    }

    /// Charges counted for this class; mutual funds carry none per
    /// transaction.
    pub fn charges(&self) -> (Decimal, Decimal) {
        if self.asset_class.tracks_transaction_charges() {
            (self.brokerage, self.taxes)
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        }
    }

    /// Amount debited from the funding account.
    pub fn total_cost(&self) -> Decimal {
        let (brokerage, taxes) = self.charges();
        self.gross_amount() + brokerage + taxes
    }
}

/// Request to sell units of a held position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellRequest {
    pub asset_class: AssetClass,
    pub symbol: String,
    pub venue: Option<String>,
    pub quantity: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub brokerage: Decimal,
    #[serde(default)]
    pub taxes: Decimal,
    pub account_id: Option<i64>,
    pub transaction_date: NaiveDate,
}

impl SellRequest {
    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("symbol", &self.symbol)?;
        ensure_positive("quantity", self.quantity)?;
        ensure_positive("price", self.price)?;
        if self.brokerage < Decimal::ZERO || self.taxes < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::invalid(
                "Brokerage and taxes cannot be negative",
            )));
        }
        if self.asset_class == AssetClass::Fno {
            return Err(Error::Validation(ValidationError::invalid(
                "F&O positions are closed through their trade",
            )));
        }
        Ok(())
    }

    pub fn gross_amount(&self) -> Decimal {
        self.quantity * self.price
    }

    pub fn charges(&self) -> (Decimal, Decimal) {
        if self.asset_class.tracks_transaction_charges() {
            (self.brokerage, self.taxes)
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        }
    }

    /// Amount credited to the receiving account.
    pub fn net_proceeds(&self) -> Decimal {
        let (brokerage, taxes) = self.charges();
        self.gross_amount() - brokerage - taxes
    }
}

/// Kind of bond income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncomeKind {
    Interest,
    Maturity,
}

impl From<IncomeKind> for TransactionType {
    fn from(kind: IncomeKind) -> Self {
        match kind {
            IncomeKind::Interest => TransactionType::Interest,
            IncomeKind::Maturity => TransactionType::Maturity,
        }
    }
}

/// Request to record a coupon payment or a bond redemption.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRequest {
    pub symbol: String,
    pub venue: Option<String>,
    pub kind: IncomeKind,
    pub amount: Decimal,
    pub account_id: Option<i64>,
    pub transaction_date: NaiveDate,
}

impl IncomeRequest {
    pub fn validate(&self) -> Result<()> {
        ensure_not_blank("symbol", &self.symbol)?;
        ensure_positive("amount", self.amount)
    }
}

/// A new lot price, as produced by a quote refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LotPriceUpdate {
    pub lot_id: String,
    pub current_price: Decimal,
    pub previous_price: Option<Decimal>,
}

/// Everything one trade writes, applied by the store as a single unit.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeWrite {
    pub new_lot: Option<NewLot>,
    pub lot_updates: Vec<Lot>,
    pub transaction: NewInvestmentTransaction,
    pub ledger: Option<LedgerWrite>,
}

/// What a trade wrote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradeOutcome {
    /// Inserted or updated lots.
    pub lots: Vec<Lot>,
    pub transaction: InvestmentTransaction,
    pub ledger_entry: Option<crate::ledger::LedgerEntry>,
}
