use async_trait::async_trait;
use rust_decimal::Decimal;

use super::fno_model::{CloseFnoTrade, FnoTrade, NewFnoTrade};
use crate::errors::Result;
use crate::ledger::{LedgerEntry, LedgerWrite};

/// Persistence contract for F&O trades.
#[async_trait]
pub trait FnoRepositoryTrait: Send + Sync {
    fn list_trades(&self) -> Result<Vec<FnoTrade>>;

    fn get_trade(&self, trade_id: &str) -> Result<FnoTrade>;

    async fn insert_trade(&self, new_trade: NewFnoTrade) -> Result<FnoTrade>;

    /// Persists price/P&L changes of an open trade.
    async fn update_trade(&self, trade: FnoTrade) -> Result<FnoTrade>;

    /// Persists the closed trade and its settlement entry atomically.
    async fn close_trade(
        &self,
        trade: FnoTrade,
        settlement: Option<LedgerWrite>,
    ) -> Result<(FnoTrade, Option<LedgerEntry>)>;

    async fn delete_trade(&self, trade_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait FnoServiceTrait: Send + Sync {
    fn list_trades(&self) -> Result<Vec<FnoTrade>>;

    async fn open_trade(&self, new_trade: NewFnoTrade) -> Result<FnoTrade>;

    async fn mark_to_market(&self, trade_id: &str, price: Decimal) -> Result<FnoTrade>;

    /// Closes the trade and settles its P&L into the linked account.
    async fn close_trade(
        &self,
        trade_id: &str,
        request: CloseFnoTrade,
    ) -> Result<(FnoTrade, Option<LedgerEntry>)>;

    async fn delete_trade(&self, trade_id: &str) -> Result<()>;
}
