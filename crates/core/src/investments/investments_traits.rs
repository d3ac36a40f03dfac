//! Investment repository and service traits.

use async_trait::async_trait;

use super::investments_model::{
    AssetClass, BuyRequest, IncomeRequest, InvestmentTransaction, Lot, LotPriceUpdate,
    SellRequest, TradeOutcome, TradeWrite,
};
use crate::errors::Result;

/// Persistence contract for lots and investment transactions.
#[async_trait]
pub trait InvestmentRepositoryTrait: Send + Sync {
    /// Lists lots (including closed ones) in purchase order.
    fn list_lots(&self, asset_class: Option<AssetClass>) -> Result<Vec<Lot>>;

    /// Lists transactions, newest first.
    fn list_transactions(&self, asset_class: Option<AssetClass>)
        -> Result<Vec<InvestmentTransaction>>;

    /// Applies a trade atomically: ledger entry and balance, lot changes
    /// and the transaction record all succeed or none do.
    async fn execute_trade(&self, trade: TradeWrite) -> Result<TradeOutcome>;

    /// Reprices lots, recomputing their value and unrealized P&L.
    async fn update_lot_prices(&self, updates: Vec<LotPriceUpdate>) -> Result<Vec<Lot>>;

    async fn delete_lot(&self, lot_id: &str) -> Result<usize>;

    async fn delete_transaction(&self, transaction_id: &str) -> Result<usize>;
}

/// Trading operations over held asset classes.
#[async_trait]
pub trait InvestmentServiceTrait: Send + Sync {
    async fn buy(&self, request: BuyRequest) -> Result<TradeOutcome>;

    async fn sell(&self, request: SellRequest) -> Result<TradeOutcome>;

    /// Records bond interest or maturity proceeds.
    async fn record_income(&self, request: IncomeRequest) -> Result<TradeOutcome>;

    async fn update_prices(&self, updates: Vec<LotPriceUpdate>) -> Result<Vec<Lot>>;

    async fn delete_lot(&self, lot_id: &str) -> Result<()>;

    async fn delete_transaction(&self, transaction_id: &str) -> Result<()>;

    fn list_lots(&self, asset_class: Option<AssetClass>) -> Result<Vec<Lot>>;

    fn list_transactions(&self, asset_class: Option<AssetClass>)
        -> Result<Vec<InvestmentTransaction>>;
}
