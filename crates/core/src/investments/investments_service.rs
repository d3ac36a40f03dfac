use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::investments_model::{
    AssetClass, BuyRequest, IncomeKind, IncomeRequest, InvestmentTransaction, Lot,
    LotPriceUpdate, NewInvestmentTransaction, NewLot, SellRequest, TradeOutcome, TradeWrite,
    TransactionType,
};
use super::investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};
use crate::accounts::AccountRepositoryTrait;
use crate::constants::{ledger_categories, DECIMAL_PRECISION};
use crate::errors::{
    ensure_positive, CalculatorError, DatabaseError, Error, Result, ValidationError,
};
use crate::ledger::{ensure_sufficient_funds, BalanceChange, DebitPolicy, LedgerWrite};

/// Removes `quantity` units from `lots` pro rata, so the average cost of
/// what remains is unchanged.
///
/// Returns the updated lots and the cost basis that left the position.
/// Callers must ensure `quantity` does not exceed the held total.
pub fn allocate_sale(mut lots: Vec<Lot>, quantity: Decimal) -> (Vec<Lot>, Decimal) {
    let held: Decimal = lots.iter().map(|l| l.quantity).sum();
    if held <= Decimal::ZERO {
        return (lots, Decimal::ZERO);
    }

    let mut cost_removed = Decimal::ZERO;
    if quantity >= held {
        for lot in lots.iter_mut() {
            cost_removed += lot.cost_basis;
            lot.quantity = Decimal::ZERO;
            lot.cost_basis = Decimal::ZERO;
            lot.recompute();
        }
        return (lots, cost_removed);
    }

    let ratio = quantity / held;
    let mut remaining = quantity;
    let last_index = lots.len() - 1;
    for (index, lot) in lots.iter_mut().enumerate() {
        let share = if index == last_index {
            remaining
        } else {
            (lot.quantity * ratio).round_dp(DECIMAL_PRECISION)
        };
        let sold = share.min(lot.quantity).min(remaining);
        cost_removed += remove_units(lot, sold);
        remaining -= sold;
    }

    // Rounded shares can fall short of the request; take the rest in purchase order.
    for lot in lots.iter_mut() {
        if remaining <= Decimal::ZERO {
            break;
        }
        let sold = lot.quantity.min(remaining);
        cost_removed += remove_units(lot, sold);
        remaining -= sold;
    }
    (lots, cost_removed)
}

/// Takes `sold` units out of `lot` and returns the cost basis they carried.
fn remove_units(lot: &mut Lot, sold: Decimal) -> Decimal {
    if lot.quantity <= Decimal::ZERO || sold <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let lot_cost = if sold == lot.quantity {
        lot.cost_basis
    } else {
        (lot.cost_basis * sold / lot.quantity).round_dp(DECIMAL_PRECISION)
    };
    lot.quantity -= sold;
    lot.cost_basis -= lot_cost;
    lot.recompute();
    lot_cost
}

pub struct InvestmentService {
    repository: Arc<dyn InvestmentRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
}

impl InvestmentService {
    pub fn new(
        repository: Arc<dyn InvestmentRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            account_repository,
        }
    }

    fn open_lots(&self, asset_class: AssetClass, symbol: &str, venue: &str) -> Result<Vec<Lot>> {
        let lots: Vec<Lot> = self
            .repository
            .list_lots(Some(asset_class))?
            .into_iter()
            .filter(|lot| lot.matches(asset_class, symbol, venue) && lot.is_open())
            .collect();
        if lots.is_empty() {
            return Err(Error::Calculation(CalculatorError::PositionNotFound {
                symbol: symbol.to_string(),
                venue: venue.to_string(),
            }));
        }
        Ok(lots)
    }

    fn credit(
        &self,
        account_id: Option<i64>,
        amount: Decimal,
        description: String,
        category: &str,
        date: chrono::NaiveDate,
    ) -> Result<Option<LedgerWrite>> {
        let Some(account_id) = account_id else {
            return Ok(None);
        };
        self.account_repository.get_by_id(account_id)?;
        if amount.is_zero() {
            return Ok(None);
        }
        let entry = BalanceChange::new(account_id, amount, description, category, date).into_entry();
        Ok(Some(LedgerWrite::new(entry, DebitPolicy::AllowOverdraft)))
    }
}

#[async_trait]
impl InvestmentServiceTrait for InvestmentService {
    async fn buy(&self, request: BuyRequest) -> Result<TradeOutcome> {
        request.validate()?;
        let asset_class = request.asset_class;
        let symbol = request.symbol.trim().to_string();
        let venue = asset_class.normalize_venue(request.venue.as_deref());
        let transaction_type = request.transaction_type();
        let total_cost = request.total_cost();

        let ledger = match request.account_id {
            Some(account_id) => {
                let account = self.account_repository.get_by_id(account_id)?;
                ensure_sufficient_funds(&account, total_cost)?;
                let entry = BalanceChange::new(
                    account_id,
                    -total_cost,
                    format!(
                        "{} {} x {} @ {}",
                        transaction_type, request.quantity, symbol, request.price
                    ),
                    ledger_categories::INVESTMENT,
                    request.transaction_date,
                )
                .into_entry();
                Some(LedgerWrite::new(entry, DebitPolicy::RequireFunds))
            }
            None => None,
        };

        let (brokerage, taxes) = request.charges();
        let gross_amount = request.gross_amount();
        let new_lot = NewLot {
            asset_class,
            symbol: symbol.clone(),
            name: request.name.clone(),
            venue: venue.clone(),
            quantity: request.quantity,
            cost_basis: gross_amount,
            current_price: request.current_price.unwrap_or(request.price),
            previous_price: request.previous_price,
            account_id: request.account_id,
            purchase_date: request.transaction_date,
        };
        let transaction = NewInvestmentTransaction {
            asset_class,
            symbol,
            venue,
            transaction_type,
            quantity: request.quantity,
            price: request.price,
            amount: gross_amount,
            brokerage,
            taxes,
            realized_pnl: None,
            account_id: request.account_id,
            transaction_date: request.transaction_date,
        };

        debug!(
            "Buying {} {} of {} for {}",
            request.quantity, asset_class, transaction.symbol, total_cost
        );
        self.repository
            .execute_trade(TradeWrite {
                new_lot: Some(new_lot),
                lot_updates: Vec::new(),
                transaction,
                ledger,
            })
            .await
    }

    async fn sell(&self, request: SellRequest) -> Result<TradeOutcome> {
        request.validate()?;
        let asset_class = request.asset_class;
        let symbol = request.symbol.trim().to_string();
        let venue = asset_class.normalize_venue(request.venue.as_deref());

        let lots = self.open_lots(asset_class, &symbol, &venue)?;
        let held: Decimal = lots.iter().map(|l| l.quantity).sum();
        if request.quantity > held {
            return Err(Error::Calculation(CalculatorError::InsufficientQuantity {
                symbol,
                venue,
                requested: request.quantity,
                held,
            }));
        }

        let (lot_updates, cost_removed) = allocate_sale(lots, request.quantity);
        let net_proceeds = request.net_proceeds();
        let realized_pnl = net_proceeds - cost_removed;
        let ledger = self.credit(
            request.account_id,
            net_proceeds,
            format!(
                "SELL {} x {} @ {}",
                request.quantity, symbol, request.price
            ),
            ledger_categories::INVESTMENT,
            request.transaction_date,
        )?;

        let (brokerage, taxes) = request.charges();
        let transaction = NewInvestmentTransaction {
            asset_class,
            symbol,
            venue,
            transaction_type: TransactionType::Sell,
            quantity: request.quantity,
            price: request.price,
            amount: request.gross_amount(),
            brokerage,
            taxes,
            realized_pnl: Some(realized_pnl),
            account_id: request.account_id,
            transaction_date: request.transaction_date,
        };

        info!(
            "Selling {} of {} ({}): realized {}",
            request.quantity, transaction.symbol, asset_class, realized_pnl
        );
        self.repository
            .execute_trade(TradeWrite {
                new_lot: None,
                lot_updates,
                transaction,
                ledger,
            })
            .await
    }

    async fn record_income(&self, request: IncomeRequest) -> Result<TradeOutcome> {
        request.validate()?;
        let asset_class = AssetClass::Bond;
        let symbol = request.symbol.trim().to_string();
        let venue = asset_class.normalize_venue(request.venue.as_deref());
        let lots = self.open_lots(asset_class, &symbol, &venue)?;

        let (lot_updates, quantity, realized_pnl) = match request.kind {
            IncomeKind::Interest => (Vec::new(), Decimal::ZERO, None),
            IncomeKind::Maturity => {
                let held: Decimal = lots.iter().map(|l| l.quantity).sum();
                let (closed, cost_removed) = allocate_sale(lots, held);
                (closed, held, Some(request.amount - cost_removed))
            }
        };
        let price = if quantity > Decimal::ZERO {
            (request.amount / quantity).round_dp(DECIMAL_PRECISION)
        } else {
            Decimal::ZERO
        };

        let transaction_type = TransactionType::from(request.kind);
        let ledger = self.credit(
            request.account_id,
            request.amount,
            format!("{} {}", transaction_type, symbol),
            ledger_categories::INVESTMENT_INCOME,
            request.transaction_date,
        )?;
        let transaction = NewInvestmentTransaction {
            asset_class,
            symbol,
            venue,
            transaction_type,
            quantity,
            price,
            amount: request.amount,
            brokerage: Decimal::ZERO,
            taxes: Decimal::ZERO,
            realized_pnl,
            account_id: request.account_id,
            transaction_date: request.transaction_date,
        };

        self.repository
            .execute_trade(TradeWrite {
                new_lot: None,
                lot_updates,
                transaction,
                ledger,
            })
            .await
    }

    async fn update_prices(&self, updates: Vec<LotPriceUpdate>) -> Result<Vec<Lot>> {
        for update in &updates {
            ensure_positive("currentPrice", update.current_price)?;
            if matches!(update.previous_price, Some(p) if p < Decimal::ZERO) {
                return Err(Error::Validation(ValidationError::invalid(
                    "Previous price cannot be negative",
                )));
            }
        }
        if updates.is_empty() {
            return Ok(Vec::new());
        }
        self.repository.update_lot_prices(updates).await
    }

    async fn delete_lot(&self, lot_id: &str) -> Result<()> {
        let deleted = self.repository.delete_lot(lot_id).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Lot {}",
                lot_id
            ))));
        }
        Ok(())
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
        let deleted = self.repository.delete_transaction(transaction_id).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Transaction {}",
                transaction_id
            ))));
        }
        Ok(())
    }

    fn list_lots(&self, asset_class: Option<AssetClass>) -> Result<Vec<Lot>> {
        self.repository.list_lots(asset_class)
    }

    fn list_transactions(
        &self,
        asset_class: Option<AssetClass>,
    ) -> Result<Vec<InvestmentTransaction>> {
        self.repository.list_transactions(asset_class)
    }
}
