//! Aggregated position model.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::investments::{AssetClass, Lot};

/// Identity of a position: asset class plus uppercased symbol and venue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pub asset_class: AssetClass,
    pub symbol: String,
    pub venue: String,
}

impl PositionKey {
    pub fn for_lot(lot: &Lot) -> Self {
        Self {
            asset_class: lot.asset_class,
            symbol: lot.symbol.trim().to_uppercase(),
            venue: lot.asset_class.normalize_venue(Some(&lot.venue)),
        }
    }
}

/// The net holding of one instrument at one venue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub asset_class: AssetClass,
    pub symbol: String,
    pub name: Option<String>,
    pub venue: String,
    pub quantity: Decimal,
    /// Total cost of the units held.
    pub cost_basis: Decimal,
    pub avg_cost: Decimal,
    /// Price of the most recently folded lot.
    pub current_price: Decimal,
    /// Quantity-weighted previous price.
    pub previous_price: Option<Decimal>,
    pub current_value: Decimal,
    pub unrealized_pnl: Decimal,
    pub pnl_percentage: Decimal,
    pub lot_count: usize,
}

impl Position {
    pub fn from_lot(lot: &Lot) -> Self {
        Self {
            asset_class: lot.asset_class,
            symbol: lot.symbol.clone(),
            name: lot.name.clone(),
            venue: lot.asset_class.normalize_venue(Some(&lot.venue)),
            quantity: lot.quantity,
            cost_basis: lot.cost_basis,
            avg_cost: average_cost(lot.cost_basis, lot.quantity),
            current_price: lot.current_price,
            previous_price: lot.previous_price,
            current_value: lot.current_value,
            unrealized_pnl: lot.unrealized_pnl,
            pnl_percentage: pnl_percentage(lot.unrealized_pnl, lot.cost_basis),
            lot_count: 1,
        }
    }

    /// Folds `lot` into this position. The incoming lot's current price
    /// replaces ours; the previous price becomes the quantity-weighted mean
    /// of both sides, each defaulting to its own current price.
    pub(crate) fn merge(&mut self, lot: &Lot) {
        let quantity_before = self.quantity;
        let total_quantity = self.quantity + lot.quantity;
        let total_cost = self.cost_basis + lot.cost_basis;

        let existing_prev = self.previous_price.unwrap_or(self.current_price);
        let incoming_prev = lot.previous_price.unwrap_or(lot.current_price);
        let total_prev_value = existing_prev * quantity_before + incoming_prev * lot.quantity;

        self.quantity = total_quantity;
        self.cost_basis = total_cost;
        self.avg_cost = average_cost(total_cost, total_quantity);
        self.current_price = lot.current_price;
        self.previous_price = Some(if total_quantity > Decimal::ZERO {
            total_prev_value / total_quantity
        } else {
            self.current_price
        });
        self.current_value += lot.current_value;
        self.unrealized_pnl += lot.unrealized_pnl;
        self.pnl_percentage = pnl_percentage(self.unrealized_pnl, self.cost_basis);
        self.lot_count += 1;
        if self.name.is_none() {
            self.name = lot.name.clone();
        }
    }

    pub fn is_active(&self) -> bool {
        self.quantity > Decimal::ZERO
    }
}

pub fn average_cost(cost_basis: Decimal, quantity: Decimal) -> Decimal {
    if quantity > Decimal::ZERO {
        cost_basis / quantity
    } else {
        Decimal::ZERO
    }
}

pub fn pnl_percentage(pnl: Decimal, cost_basis: Decimal) -> Decimal {
    if cost_basis > Decimal::ZERO {
        pnl / cost_basis * dec!(100)
    } else {
        Decimal::ZERO
    }
}
