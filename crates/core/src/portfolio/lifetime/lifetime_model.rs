use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::investments::AssetClass;

/// Cash-flow reconstruction of the value one asset class has created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LifetimeBreakdown {
    pub asset_class: AssetClass,
    pub buys: Decimal,
    pub sells: Decimal,
    pub charges: Decimal,
    pub current_value: Decimal,
    /// `sells + current_value - (buys + charges)`; for F&O the settled P&L.
    pub lifetime: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LifetimeEarnings {
    pub by_class: Vec<LifetimeBreakdown>,
    pub total: Decimal,
}

impl LifetimeEarnings {
    pub fn from_breakdowns(by_class: Vec<LifetimeBreakdown>) -> Self {
        let total = by_class.iter().map(|b| b.lifetime).sum();
        Self { by_class, total }
    }

    pub fn of(&self, asset_class: AssetClass) -> Decimal {
        self.by_class
            .iter()
            .find(|b| b.asset_class == asset_class)
            .map(|b| b.lifetime)
            .unwrap_or(Decimal::ZERO)
    }
}
