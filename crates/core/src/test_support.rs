//! In-memory repositories and fixtures for unit tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::accounts::{Account, AccountRepositoryTrait, AccountUpdate, Currency, NewAccount};
use crate::errors::{DatabaseError, Error, Result};
use crate::fno::{
    FnoInstrument, FnoRepositoryTrait, FnoStatus, FnoTrade, NewFnoTrade, TradeSide,
};
use crate::goals::{Goal, GoalRepositoryTrait, GoalUpdate, NewGoal};
use crate::investments::{
    AssetClass, InvestmentRepositoryTrait, InvestmentTransaction, Lot, LotPriceUpdate,
    TradeOutcome, TradeWrite, TransactionType,
};
use crate::ledger::{
    ensure_sufficient_funds, DebitPolicy, LedgerEntry, LedgerRepositoryTrait, LedgerWrite,
};
use crate::settings::{Settings, SettingsRepositoryTrait};
use crate::transfers::{FamilyTransfer, NewFamilyTransfer, TransferRepositoryTrait};

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

pub fn sample_account(id: i64, balance: Decimal) -> Account {
    Account {
        id,
        name: format!("Account {}", id),
        account_type: "SAVINGS".to_string(),
        bank_name: Some("Test Bank".to_string()),
        currency: Currency::Inr,
        opening_balance: balance,
        balance,
        is_active: true,
        created_at: now(),
        updated_at: now(),
    }
}

pub fn lot(
    asset_class: AssetClass,
    symbol: &str,
    venue: &str,
    quantity: Decimal,
    cost_basis: Decimal,
    current_price: Decimal,
    previous_price: Option<Decimal>,
) -> Lot {
    let current_value = quantity * current_price;
    Lot {
        id: new_id(),
        asset_class,
        symbol: symbol.to_string(),
        name: None,
        venue: venue.to_string(),
        quantity,
        cost_basis,
        current_price,
        previous_price,
        current_value,
        unrealized_pnl: current_value - cost_basis,
        account_id: None,
        purchase_date: test_date(),
        created_at: now(),
        updated_at: now(),
    }
}

pub fn transaction(
    asset_class: AssetClass,
    transaction_type: TransactionType,
    amount: Decimal,
    brokerage: Decimal,
    taxes: Decimal,
) -> InvestmentTransaction {
    InvestmentTransaction {
        id: new_id(),
        asset_class,
        symbol: "TEST".to_string(),
        venue: asset_class.default_venue().to_string(),
        transaction_type,
        quantity: Decimal::ONE,
        price: amount,
        amount,
        brokerage,
        taxes,
        realized_pnl: None,
        account_id: None,
        transaction_date: test_date(),
        created_at: now(),
    }
}

pub fn fno_trade(status: FnoStatus, pnl: Decimal) -> FnoTrade {
    FnoTrade {
        id: new_id(),
        symbol: "BANKNIFTY".to_string(),
        instrument: FnoInstrument::Future,
        strike_price: None,
        expiry_date: None,
        side: TradeSide::Long,
        quantity: Decimal::ONE,
        lot_size: Decimal::ONE,
        entry_price: Decimal::ONE_HUNDRED,
        exit_price: None,
        current_price: None,
        status,
        pnl,
        brokerage: Decimal::ZERO,
        account_id: None,
        entry_date: test_date(),
        exit_date: None,
        notes: None,
        created_at: now(),
        updated_at: now(),
    }
}

pub fn goal(name: &str, target: Decimal, current: Decimal) -> Goal {
    Goal {
        id: new_id(),
        name: name.to_string(),
        category: "General".to_string(),
        target_amount: target,
        current_amount: current,
        target_date: None,
        account_id: None,
        created_at: now(),
        updated_at: now(),
    }
}

#[derive(Clone, Default)]
struct Tables {
    accounts: Vec<Account>,
    next_account_id: i64,
    ledger: Vec<LedgerEntry>,
    lots: Vec<Lot>,
    transactions: Vec<InvestmentTransaction>,
    fno: Vec<FnoTrade>,
    goals: Vec<Goal>,
    transfers: Vec<FamilyTransfer>,
    settings: BTreeMap<String, String>,
}

fn not_found(what: impl Into<String>) -> Error {
    Error::Database(DatabaseError::NotFound(what.into()))
}

impl Tables {
    fn account_mut(&mut self, account_id: i64) -> Result<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| not_found(format!("Account {}", account_id)))
    }

    /// Same contract as the SQLite store: policy re-check, balance update
    /// and entry insert in one unit.
    fn record(&mut self, write: LedgerWrite) -> Result<LedgerEntry> {
        if let Some(account_id) = write.entry.account_id {
            let account = self.account_mut(account_id)?;
            if write.policy == DebitPolicy::RequireFunds && write.entry.is_debit() {
                ensure_sufficient_funds(account, write.entry.amount)?;
            }
            account.balance += write.entry.signed_amount();
            account.updated_at = now();
        }
        let entry = write.entry.into_entry(new_id(), now());
        self.ledger.insert(0, entry.clone());
        Ok(entry)
    }
}

/// A transactional in-memory store: every write runs against a copy of the
/// tables that is committed only if the whole write succeeds.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_accounts(accounts: Vec<Account>) -> Arc<Self> {
        let store = Self::default();
        {
            let mut tables = store.tables.lock().unwrap();
            tables.next_account_id = accounts.iter().map(|a| a.id).max().unwrap_or(0);
            tables.accounts = accounts;
        }
        Arc::new(store)
    }

    /// Makes every subsequent write fail with a query error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn account(&self, account_id: i64) -> Account {
        self.read(|t| t.accounts.iter().find(|a| a.id == account_id).cloned())
            .expect("account exists")
    }

    pub fn ledger_entries(&self) -> Vec<LedgerEntry> {
        self.read(|t| t.ledger.clone())
    }

    pub fn all_lots(&self) -> Vec<Lot> {
        self.read(|t| t.lots.clone())
    }

    pub fn insert_lot(&self, lot: Lot) {
        self.tables.lock().unwrap().lots.push(lot);
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        f(&self.tables.lock().unwrap())
    }

    fn write<T>(&self, f: impl FnOnce(&mut Tables) -> Result<T>) -> Result<T> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "injected write failure".to_string(),
            )));
        }
        let mut tables = self.tables.lock().unwrap();
        let mut draft = tables.clone();
        let out = f(&mut draft)?;
        *tables = draft;
        Ok(out)
    }
}

#[async_trait]
impl AccountRepositoryTrait for InMemoryStore {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        self.write(|t| {
            t.next_account_id += 1;
            let account = new_account.into_account(t.next_account_id, now());
            t.accounts.push(account.clone());
            Ok(account)
        })
    }

    async fn update(&self, account_update: AccountUpdate) -> Result<Account> {
        self.write(|t| {
            let account = t.account_mut(account_update.id)?;
            *account = account_update.apply_to(account.clone(), now());
            Ok(account.clone())
        })
    }

    async fn delete(&self, account_id: i64) -> Result<usize> {
        self.write(|t| {
            let before = t.accounts.len();
            t.accounts.retain(|a| a.id != account_id);
            Ok(before - t.accounts.len())
        })
    }

    fn get_by_id(&self, account_id: i64) -> Result<Account> {
        self.read(|t| t.accounts.iter().find(|a| a.id == account_id).cloned())
            .ok_or_else(|| not_found(format!("Account {}", account_id)))
    }

    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>> {
        Ok(self.read(|t| {
            t.accounts
                .iter()
                .filter(|a| is_active_filter.map_or(true, |active| a.is_active == active))
                .cloned()
                .collect()
        }))
    }
}

#[async_trait]
impl LedgerRepositoryTrait for InMemoryStore {
    async fn record(&self, write: LedgerWrite) -> Result<LedgerEntry> {
        self.write(|t| t.record(write))
    }

    async fn delete(&self, entry_id: &str) -> Result<usize> {
        self.write(|t| {
            let before = t.ledger.len();
            t.ledger.retain(|e| e.id != entry_id);
            Ok(before - t.ledger.len())
        })
    }

    fn list(&self, account_id: Option<i64>) -> Result<Vec<LedgerEntry>> {
        Ok(self.read(|t| {
            t.ledger
                .iter()
                .filter(|e| account_id.is_none() || e.account_id == account_id)
                .cloned()
                .collect()
        }))
    }
}

#[async_trait]
impl InvestmentRepositoryTrait for InMemoryStore {
    fn list_lots(&self, asset_class: Option<AssetClass>) -> Result<Vec<Lot>> {
        let mut lots: Vec<Lot> = self.read(|t| {
            t.lots
                .iter()
                .filter(|l| asset_class.map_or(true, |c| l.asset_class == c))
                .cloned()
                .collect()
        });
        lots.sort_by(|a, b| {
            (a.purchase_date, a.created_at).cmp(&(b.purchase_date, b.created_at))
        });
        Ok(lots)
    }

    fn list_transactions(
        &self,
        asset_class: Option<AssetClass>,
    ) -> Result<Vec<InvestmentTransaction>> {
        Ok(self.read(|t| {
            t.transactions
                .iter()
                .filter(|tx| asset_class.map_or(true, |c| tx.asset_class == c))
                .cloned()
                .collect()
        }))
    }

    async fn execute_trade(&self, trade: TradeWrite) -> Result<TradeOutcome> {
        self.write(|t| {
            let ledger_entry = trade.ledger.map(|w| t.record(w)).transpose()?;

            let mut lots = Vec::new();
            if let Some(new_lot) = trade.new_lot {
                let lot = new_lot.into_lot(new_id(), now());
                t.lots.push(lot.clone());
                lots.push(lot);
            }
            for update in trade.lot_updates {
                let stored = t
                    .lots
                    .iter_mut()
                    .find(|l| l.id == update.id)
                    .ok_or_else(|| not_found(format!("Lot {}", update.id)))?;
                *stored = update.clone();
                lots.push(update);
            }

            let transaction = trade.transaction.into_transaction(new_id(), now());
            t.transactions.insert(0, transaction.clone());
            Ok(TradeOutcome {
                lots,
                transaction,
                ledger_entry,
            })
        })
    }

    async fn update_lot_prices(&self, updates: Vec<LotPriceUpdate>) -> Result<Vec<Lot>> {
        self.write(|t| {
            updates
                .into_iter()
                .map(|u| {
                    let lot = t
                        .lots
                        .iter_mut()
                        .find(|l| l.id == u.lot_id)
                        .ok_or_else(|| not_found(format!("Lot {}", u.lot_id)))?;
                    lot.reprice(u.current_price, u.previous_price);
                    Ok(lot.clone())
                })
                .collect()
        })
    }

    async fn delete_lot(&self, lot_id: &str) -> Result<usize> {
        self.write(|t| {
            let before = t.lots.len();
            t.lots.retain(|l| l.id != lot_id);
            Ok(before - t.lots.len())
        })
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<usize> {
        self.write(|t| {
            let before = t.transactions.len();
            t.transactions.retain(|tx| tx.id != transaction_id);
            Ok(before - t.transactions.len())
        })
    }
}

#[async_trait]
impl FnoRepositoryTrait for InMemoryStore {
    fn list_trades(&self) -> Result<Vec<FnoTrade>> {
        Ok(self.read(|t| t.fno.clone()))
    }

    fn get_trade(&self, trade_id: &str) -> Result<FnoTrade> {
        self.read(|t| t.fno.iter().find(|f| f.id == trade_id).cloned())
            .ok_or_else(|| not_found(format!("F&O trade {}", trade_id)))
    }

    async fn insert_trade(&self, new_trade: NewFnoTrade) -> Result<FnoTrade> {
        self.write(|t| {
            let trade = new_trade.into_trade(new_id(), now());
            t.fno.push(trade.clone());
            Ok(trade)
        })
    }

    async fn update_trade(&self, trade: FnoTrade) -> Result<FnoTrade> {
        self.write(|t| {
            let stored = t
                .fno
                .iter_mut()
                .find(|f| f.id == trade.id)
                .ok_or_else(|| not_found(format!("F&O trade {}", trade.id)))?;
            *stored = trade.clone();
            Ok(trade)
        })
    }

    async fn close_trade(
        &self,
        trade: FnoTrade,
        settlement: Option<LedgerWrite>,
    ) -> Result<(FnoTrade, Option<LedgerEntry>)> {
        self.write(|t| {
            let entry = settlement.map(|w| t.record(w)).transpose()?;
            let stored = t
                .fno
                .iter_mut()
                .find(|f| f.id == trade.id)
                .ok_or_else(|| not_found(format!("F&O trade {}", trade.id)))?;
            *stored = trade.clone();
            Ok((trade, entry))
        })
    }

    async fn delete_trade(&self, trade_id: &str) -> Result<usize> {
        self.write(|t| {
            let before = t.fno.len();
            t.fno.retain(|f| f.id != trade_id);
            Ok(before - t.fno.len())
        })
    }
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryStore {
    fn load_goals(&self) -> Result<Vec<Goal>> {
        Ok(self.read(|t| t.goals.clone()))
    }

    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        self.read(|t| t.goals.iter().find(|g| g.id == goal_id).cloned())
            .ok_or_else(|| not_found(format!("Goal {}", goal_id)))
    }

    async fn insert_new_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        self.write(|t| {
            let goal = new_goal.into_goal(new_id(), now());
            t.goals.push(goal.clone());
            Ok(goal)
        })
    }

    async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal> {
        self.write(|t| {
            let stored = t
                .goals
                .iter_mut()
                .find(|g| g.id == goal_update.id)
                .ok_or_else(|| not_found(format!("Goal {}", goal_update.id)))?;
            *stored = goal_update.apply_to(stored.clone(), now());
            Ok(stored.clone())
        })
    }

    async fn contribute(
        &self,
        goal_id: &str,
        amount: Decimal,
        debit: Option<LedgerWrite>,
    ) -> Result<(Goal, Option<LedgerEntry>)> {
        self.write(|t| {
            let entry = debit.map(|w| t.record(w)).transpose()?;
            let stored = t
                .goals
                .iter_mut()
                .find(|g| g.id == goal_id)
                .ok_or_else(|| not_found(format!("Goal {}", goal_id)))?;
            stored.current_amount += amount;
            stored.updated_at = now();
            Ok((stored.clone(), entry))
        })
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        self.write(|t| {
            let before = t.goals.len();
            t.goals.retain(|g| g.id != goal_id);
            Ok(before - t.goals.len())
        })
    }
}

#[async_trait]
impl TransferRepositoryTrait for InMemoryStore {
    fn list_transfers(&self) -> Result<Vec<FamilyTransfer>> {
        Ok(self.read(|t| t.transfers.clone()))
    }

    async fn insert_transfer(
        &self,
        new_transfer: NewFamilyTransfer,
        debit: LedgerWrite,
    ) -> Result<(FamilyTransfer, LedgerEntry)> {
        self.write(|t| {
            let entry = t.record(debit)?;
            let transfer = new_transfer.into_transfer(new_id(), now());
            t.transfers.insert(0, transfer.clone());
            Ok((transfer, entry))
        })
    }

    async fn delete_transfer(&self, transfer_id: &str) -> Result<usize> {
        self.write(|t| {
            let before = t.transfers.len();
            t.transfers.retain(|tr| tr.id != transfer_id);
            Ok(before - t.transfers.len())
        })
    }
}

#[async_trait]
impl SettingsRepositoryTrait for InMemoryStore {
    fn get_settings(&self) -> Result<Settings> {
        let pairs = self.read(|t| t.settings.clone());
        Settings::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    async fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.write(|t| {
            for (key, value) in settings.to_pairs() {
                t.settings.insert(key.to_string(), value);
            }
            Ok(())
        })
    }

    fn get_setting(&self, setting_key: &str) -> Result<String> {
        self.read(|t| t.settings.get(setting_key).cloned())
            .ok_or_else(|| not_found(format!("Setting {}", setting_key)))
    }

    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()> {
        self.write(|t| {
            t.settings
                .insert(setting_key.to_string(), setting_value.to_string());
            Ok(())
        })
    }
}
