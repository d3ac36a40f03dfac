use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::fno_model::{CloseFnoTrade, FnoTrade, NewFnoTrade};
use super::fno_traits::{FnoRepositoryTrait, FnoServiceTrait};
use crate::accounts::AccountRepositoryTrait;
use crate::constants::ledger_categories;
use crate::errors::{ensure_positive, DatabaseError, Error, Result, ValidationError};
use crate::ledger::{BalanceChange, DebitPolicy, LedgerEntry, LedgerWrite};

pub struct FnoService {
    repository: Arc<dyn FnoRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
}

impl FnoService {
    pub fn new(
        repository: Arc<dyn FnoRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            account_repository,
        }
    }

    fn open_trade_by_id(&self, trade_id: &str) -> Result<FnoTrade> {
        let trade = self.repository.get_trade(trade_id)?;
        if trade.is_closed() {
            return Err(Error::Validation(ValidationError::invalid(format!(
                "Trade {} is already closed",
                trade_id
            ))));
        }
        Ok(trade)
    }
}

#[async_trait]
impl FnoServiceTrait for FnoService {
    fn list_trades(&self) -> Result<Vec<FnoTrade>> {
        self.repository.list_trades()
    }

    async fn open_trade(&self, new_trade: NewFnoTrade) -> Result<FnoTrade> {
        new_trade.validate()?;
        if let Some(account_id) = new_trade.account_id {
            self.account_repository.get_by_id(account_id)?;
        }
        debug!(
            "Opening {} {} {} x {}",
            new_trade.side, new_trade.instrument, new_trade.symbol, new_trade.quantity
        );
        self.repository.insert_trade(new_trade).await
    }

    async fn mark_to_market(&self, trade_id: &str, price: Decimal) -> Result<FnoTrade> {
        ensure_positive("price", price)?;
        let mut trade = self.open_trade_by_id(trade_id)?;
        trade.mark_to_market(price);
        self.repository.update_trade(trade).await
    }

    async fn close_trade(
        &self,
        trade_id: &str,
        request: CloseFnoTrade,
    ) -> Result<(FnoTrade, Option<LedgerEntry>)> {
        request.validate()?;
        let mut trade = self.open_trade_by_id(trade_id)?;
        trade.close(request.exit_price, request.exit_date, request.brokerage);

        let settlement = match trade.account_id {
            Some(account_id) if !trade.pnl.is_zero() => {
                self.account_repository.get_by_id(account_id)?;
                let entry = BalanceChange::new(
                    account_id,
                    trade.pnl,
                    format!("{} {} {} settled", trade.side, trade.instrument, trade.symbol),
                    ledger_categories::TRADING,
                    request.exit_date,
                )
                .into_entry();
                // Losses settle even when the account cannot cover them.
                Some(LedgerWrite::new(entry, DebitPolicy::AllowOverdraft))
            }
            _ => None,
        };

        info!("Closing F&O trade {} with P&L {}", trade.id, trade.pnl);
        self.repository.close_trade(trade, settlement).await
    }

    async fn delete_trade(&self, trade_id: &str) -> Result<()> {
        let deleted = self.repository.delete_trade(trade_id).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "F&O trade {}",
                trade_id
            ))));
        }
        Ok(())
    }
}
