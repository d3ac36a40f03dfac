use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::join_all;
use log::{debug, error, info, warn};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::state_model::{Collection, FinanceData, LoadReport};
use crate::accounts::{
    Account, AccountRepositoryTrait, AccountService, AccountServiceTrait, AccountUpdate, AddFunds,
    NewAccount, SetBalance,
};
use crate::errors::{DatabaseError, Error, Result};
use crate::fno::{
    CloseFnoTrade, FnoRepositoryTrait, FnoService, FnoServiceTrait, FnoTrade, NewFnoTrade,
};
use crate::goals::{
    Goal, GoalContribution, GoalRepositoryTrait, GoalService, GoalServiceTrait, GoalUpdate,
    NewGoal,
};
use crate::investments::{
    AssetClass, BuyRequest, IncomeRequest, InvestmentRepositoryTrait, InvestmentService,
    InvestmentServiceTrait, InvestmentTransaction, Lot, LotPriceUpdate, SellRequest,
    TradeOutcome,
};
use crate::ledger::{
    reconcile, LedgerEntry, LedgerRepositoryTrait, LedgerService, LedgerServiceTrait,
    NewLedgerEntry, Reconciliation,
};
use crate::market_data::{FundQuote, MutualFundProvider, RefreshHandler};
use crate::portfolio::{aggregate_lots, build_dashboard, DashboardInputs, DashboardMetrics, Position};
use crate::settings::{
    Settings, SettingsRepositoryTrait, SettingsService, SettingsServiceTrait, SettingsUpdate,
};
use crate::transfers::{
    FamilyTransfer, NewFamilyTransfer, TransferRepositoryTrait, TransferService,
    TransferServiceTrait,
};

/// Store implementations the services are built on.
pub struct FinanceRepositories {
    pub accounts: Arc<dyn AccountRepositoryTrait>,
    pub ledger: Arc<dyn LedgerRepositoryTrait>,
    pub investments: Arc<dyn InvestmentRepositoryTrait>,
    pub fno: Arc<dyn FnoRepositoryTrait>,
    pub goals: Arc<dyn GoalRepositoryTrait>,
    pub transfers: Arc<dyn TransferRepositoryTrait>,
    pub settings: Arc<dyn SettingsRepositoryTrait>,
}

#[derive(Clone)]
pub struct FinanceServices {
    pub accounts: Arc<dyn AccountServiceTrait>,
    pub ledger: Arc<dyn LedgerServiceTrait>,
    pub investments: Arc<dyn InvestmentServiceTrait>,
    pub fno: Arc<dyn FnoServiceTrait>,
    pub goals: Arc<dyn GoalServiceTrait>,
    pub transfers: Arc<dyn TransferServiceTrait>,
    pub settings: Arc<dyn SettingsServiceTrait>,
}

impl FinanceServices {
    pub fn new(repositories: FinanceRepositories) -> Self {
        let FinanceRepositories {
            accounts,
            ledger,
            investments,
            fno,
            goals,
            transfers,
            settings,
        } = repositories;

        let ledger_service: Arc<dyn LedgerServiceTrait> =
            Arc::new(LedgerService::new(ledger, accounts.clone()));
        Self {
            accounts: Arc::new(AccountService::new(accounts.clone(), ledger_service.clone())),
            ledger: ledger_service,
            investments: Arc::new(InvestmentService::new(investments, accounts.clone())),
            fno: Arc::new(FnoService::new(fno, accounts.clone())),
            goals: Arc::new(GoalService::new(goals, accounts.clone())),
            transfers: Arc::new(TransferService::new(transfers, accounts)),
            settings: Arc::new(SettingsService::new(settings)),
        }
    }
}

/// Runs one synchronous store read on tokio's blocking pool.
async fn read_blocking<S, T, F>(service: Arc<S>, read: F) -> Result<T>
where
    S: ?Sized + Send + Sync + 'static,
    T: Send + 'static,
    F: FnOnce(&S) -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || read(service.as_ref()))
        .await
        .map_err(|e| Error::Unexpected(format!("Blocking read did not complete: {}", e)))?
}

/// Application state: the services plus an in-memory copy of every
/// collection, refreshed after each successful write.
pub struct FinanceState {
    services: FinanceServices,
    data: RwLock<FinanceData>,
    fund_provider: Option<Arc<dyn MutualFundProvider>>,
}

impl FinanceState {
    pub fn new(
        services: FinanceServices,
        fund_provider: Option<Arc<dyn MutualFundProvider>>,
    ) -> Self {
        Self {
            services,
            data: RwLock::new(FinanceData::default()),
            fund_provider,
        }
    }

    pub fn services(&self) -> &FinanceServices {
        &self.services
    }

    pub fn fund_provider(&self) -> Option<Arc<dyn MutualFundProvider>> {
        self.fund_provider.clone()
    }

    /// Reads every collection concurrently on the blocking pool. A failed
    /// read is logged and leaves its collection empty; the others still load.
    pub async fn load_all(&self) -> LoadReport {
        let s = &self.services;
        let (accounts, ledger, lots, transactions, fno_trades, goals, transfers, settings) = futures::join!(
            read_blocking(s.accounts.clone(), |svc| svc.list_accounts(None)),
            read_blocking(s.ledger.clone(), |svc| svc.list_entries(None)),
            read_blocking(s.investments.clone(), |svc| svc.list_lots(None)),
            read_blocking(s.investments.clone(), |svc| svc.list_transactions(None)),
            read_blocking(s.fno.clone(), |svc| svc.list_trades()),
            read_blocking(s.goals.clone(), |svc| svc.get_goals()),
            read_blocking(s.transfers.clone(), |svc| svc.list_transfers()),
            read_blocking(s.settings.clone(), |svc| svc.get_settings()),
        );

        let mut report = LoadReport::default();
        let data = FinanceData {
            accounts: report.take(Collection::Accounts, accounts),
            ledger: report.take(Collection::Ledger, ledger),
            lots: report.take(Collection::Lots, lots),
            transactions: report.take(Collection::Transactions, transactions),
            fno_trades: report.take(Collection::FnoTrades, fno_trades),
            goals: report.take(Collection::Goals, goals),
            transfers: report.take(Collection::Transfers, transfers),
            settings: report.take(Collection::Settings, settings),
        };
        *self.data.write().await = data;

        info!(
            "Loaded state ({} of {} collections)",
            Collection::ALL.len() - report.failures.len(),
            Collection::ALL.len()
        );
        report
    }

    async fn reload(&self, collections: &[Collection]) {
        let mut data = self.data.write().await;
        for &collection in collections {
            if let Err(e) = self.read_into(&mut data, collection) {
                error!("Failed to refresh {} after write: {}", collection, e);
            }
        }
    }

    fn read_into(&self, data: &mut FinanceData, collection: Collection) -> Result<()> {
        let s = &self.services;
        match collection {
            Collection::Accounts => data.accounts = s.accounts.list_accounts(None)?,
            Collection::Ledger => data.ledger = s.ledger.list_entries(None)?,
            Collection::Lots => data.lots = s.investments.list_lots(None)?,
            Collection::Transactions => data.transactions = s.investments.list_transactions(None)?,
            Collection::FnoTrades => data.fno_trades = s.fno.list_trades()?,
            Collection::Goals => data.goals = s.goals.get_goals()?,
            Collection::Transfers => data.transfers = s.transfers.list_transfers()?,
            Collection::Settings => data.settings = s.settings.get_settings()?,
        }
        Ok(())
    }

    async fn ensure_enabled(&self, asset_class: AssetClass) -> Result<()> {
        if self.data.read().await.settings.is_enabled(asset_class) {
            Ok(())
        } else {
            Err(Error::AssetClassDisabled(asset_class.label().to_string()))
        }
    }

    // Queries

    pub async fn snapshot(&self) -> FinanceData {
        self.data.read().await.clone()
    }

    pub async fn settings(&self) -> Settings {
        self.data.read().await.settings.clone()
    }

    pub async fn accounts(&self) -> Vec<Account> {
        self.data.read().await.accounts.clone()
    }

    pub async fn ledger(&self, account_id: Option<i64>) -> Vec<LedgerEntry> {
        self.data
            .read()
            .await
            .ledger
            .iter()
            .filter(|e| account_id.is_none() || e.account_id == account_id)
            .cloned()
            .collect()
    }

    /// Lots of one class; closed (zero quantity) lots only when asked for.
    pub async fn lots(&self, asset_class: AssetClass, include_closed: bool) -> Vec<Lot> {
        self.data
            .read()
            .await
            .lots
            .iter()
            .filter(|l| l.asset_class == asset_class && (include_closed || l.is_open()))
            .cloned()
            .collect()
    }

    pub async fn positions(&self, asset_class: AssetClass) -> Vec<Position> {
        let data = self.data.read().await;
        let lots: Vec<Lot> = data
            .lots
            .iter()
            .filter(|l| l.asset_class == asset_class)
            .cloned()
            .collect();
        aggregate_lots(&lots)
    }

    pub async fn transactions(&self, asset_class: Option<AssetClass>) -> Vec<InvestmentTransaction> {
        self.data
            .read()
            .await
            .transactions
            .iter()
            .filter(|t| asset_class.map_or(true, |c| t.asset_class == c))
            .cloned()
            .collect()
    }

    pub async fn fno_trades(&self) -> Vec<FnoTrade> {
        self.data.read().await.fno_trades.clone()
    }

    pub async fn goals(&self) -> Vec<Goal> {
        self.data.read().await.goals.clone()
    }

    pub async fn transfers(&self) -> Vec<FamilyTransfer> {
        self.data.read().await.transfers.clone()
    }

    pub async fn dashboard(&self, as_of: NaiveDate) -> DashboardMetrics {
        let data = self.data.read().await;
        build_dashboard(
            DashboardInputs {
                accounts: &data.accounts,
                lots: &data.lots,
                transactions: &data.transactions,
                fno_trades: &data.fno_trades,
                goals: &data.goals,
                settings: &data.settings,
            },
            as_of,
        )
    }

    pub async fn reconcile(&self, account_id: i64) -> Result<Reconciliation> {
        let data = self.data.read().await;
        let account = data
            .accounts
            .iter()
            .find(|a| a.id == account_id)
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!("Account {}", account_id)))
            })?;
        Ok(reconcile(account, &data.ledger))
    }

    // Accounts and ledger

    pub async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        let account = self.services.accounts.create_account(new_account).await?;
        self.reload(&[Collection::Accounts]).await;
        Ok(account)
    }

    pub async fn update_account(&self, account_update: AccountUpdate) -> Result<Account> {
        let account = self.services.accounts.update_account(account_update).await?;
        self.reload(&[Collection::Accounts]).await;
        Ok(account)
    }

    pub async fn delete_account(&self, account_id: i64) -> Result<()> {
        self.services.accounts.delete_account(account_id).await?;
        // Transfers cascade with the account; the other rows lose their link.
        self.reload(&Self::ACCOUNT_LINKED_COLLECTIONS).await;
        Ok(())
    }

    pub async fn add_funds(&self, account_id: i64, request: AddFunds) -> Result<LedgerEntry> {
        let entry = self
            .services
            .accounts
            .add_funds(account_id, request.amount, request.description)
            .await?;
        self.reload(&[Collection::Accounts, Collection::Ledger]).await;
        Ok(entry)
    }

    pub async fn set_balance(
        &self,
        account_id: i64,
        request: SetBalance,
    ) -> Result<Option<LedgerEntry>> {
        let entry = self
            .services
            .accounts
            .set_balance(account_id, request.balance)
            .await?;
        if entry.is_some() {
            self.reload(&[Collection::Accounts, Collection::Ledger]).await;
        }
        Ok(entry)
    }

    pub async fn record_ledger_entry(&self, entry: NewLedgerEntry) -> Result<LedgerEntry> {
        let entry = self.services.ledger.record_entry(entry).await?;
        self.reload(&[Collection::Accounts, Collection::Ledger]).await;
        Ok(entry)
    }

    pub async fn delete_ledger_entry(&self, entry_id: &str) -> Result<()> {
        self.services.ledger.delete_entry(entry_id).await?;
        self.data.write().await.ledger.retain(|e| e.id != entry_id);
        Ok(())
    }

    const ACCOUNT_LINKED_COLLECTIONS: [Collection; 7] = [
        Collection::Accounts,
        Collection::Ledger,
        Collection::Lots,
        Collection::Transactions,
        Collection::FnoTrades,
        Collection::Goals,
        Collection::Transfers,
    ];

    // Investments

    const TRADE_COLLECTIONS: [Collection; 4] = [
        Collection::Accounts,
        Collection::Ledger,
        Collection::Lots,
        Collection::Transactions,
    ];

    pub async fn buy(&self, request: BuyRequest) -> Result<TradeOutcome> {
        self.ensure_enabled(request.asset_class).await?;
        let outcome = self.services.investments.buy(request).await?;
        self.reload(&Self::TRADE_COLLECTIONS).await;
        Ok(outcome)
    }

    pub async fn sell(&self, request: SellRequest) -> Result<TradeOutcome> {
        self.ensure_enabled(request.asset_class).await?;
        let outcome = self.services.investments.sell(request).await?;
        self.reload(&Self::TRADE_COLLECTIONS).await;
        Ok(outcome)
    }

    pub async fn record_income(&self, request: IncomeRequest) -> Result<TradeOutcome> {
        self.ensure_enabled(AssetClass::Bond).await?;
        let outcome = self.services.investments.record_income(request).await?;
        self.reload(&Self::TRADE_COLLECTIONS).await;
        Ok(outcome)
    }

    pub async fn update_lot_prices(&self, updates: Vec<LotPriceUpdate>) -> Result<Vec<Lot>> {
        let lots = self.services.investments.update_prices(updates).await?;
        self.reload(&[Collection::Lots]).await;
        Ok(lots)
    }

    pub async fn delete_lot(&self, lot_id: &str) -> Result<()> {
        self.services.investments.delete_lot(lot_id).await?;
        self.data.write().await.lots.retain(|l| l.id != lot_id);
        Ok(())
    }

    pub async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
        self.services
            .investments
            .delete_transaction(transaction_id)
            .await?;
        self.data
            .write()
            .await
            .transactions
            .retain(|t| t.id != transaction_id);
        Ok(())
    }

    // F&O

    pub async fn open_fno_trade(&self, new_trade: NewFnoTrade) -> Result<FnoTrade> {
        self.ensure_enabled(AssetClass::Fno).await?;
        let trade = self.services.fno.open_trade(new_trade).await?;
        self.reload(&[Collection::FnoTrades]).await;
        Ok(trade)
    }

    pub async fn mark_fno_trade(&self, trade_id: &str, price: Decimal) -> Result<FnoTrade> {
        let trade = self.services.fno.mark_to_market(trade_id, price).await?;
        self.reload(&[Collection::FnoTrades]).await;
        Ok(trade)
    }

    pub async fn close_fno_trade(
        &self,
        trade_id: &str,
        request: CloseFnoTrade,
    ) -> Result<(FnoTrade, Option<LedgerEntry>)> {
        let closed = self.services.fno.close_trade(trade_id, request).await?;
        self.reload(&[
            Collection::FnoTrades,
            Collection::Accounts,
            Collection::Ledger,
        ])
        .await;
        Ok(closed)
    }

    pub async fn delete_fno_trade(&self, trade_id: &str) -> Result<()> {
        self.services.fno.delete_trade(trade_id).await?;
        self.data
            .write()
            .await
            .fno_trades
            .retain(|t| t.id != trade_id);
        Ok(())
    }

    // Goals and transfers

    pub async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        let goal = self.services.goals.create_goal(new_goal).await?;
        self.reload(&[Collection::Goals]).await;
        Ok(goal)
    }

    pub async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal> {
        let goal = self.services.goals.update_goal(goal_update).await?;
        self.reload(&[Collection::Goals]).await;
        Ok(goal)
    }

    pub async fn contribute_to_goal(
        &self,
        goal_id: &str,
        contribution: GoalContribution,
    ) -> Result<(Goal, Option<LedgerEntry>)> {
        let result = self.services.goals.contribute(goal_id, contribution).await?;
        self.reload(&[Collection::Goals, Collection::Accounts, Collection::Ledger])
            .await;
        Ok(result)
    }

    pub async fn delete_goal(&self, goal_id: &str) -> Result<()> {
        self.services.goals.delete_goal(goal_id).await?;
        self.data.write().await.goals.retain(|g| g.id != goal_id);
        Ok(())
    }

    pub async fn create_transfer(
        &self,
        new_transfer: NewFamilyTransfer,
    ) -> Result<(FamilyTransfer, LedgerEntry)> {
        let result = self.services.transfers.create_transfer(new_transfer).await?;
        self.reload(&[
            Collection::Transfers,
            Collection::Accounts,
            Collection::Ledger,
        ])
        .await;
        Ok(result)
    }

    pub async fn delete_transfer(&self, transfer_id: &str) -> Result<()> {
        self.services.transfers.delete_transfer(transfer_id).await?;
        self.data
            .write()
            .await
            .transfers
            .retain(|t| t.id != transfer_id);
        Ok(())
    }

    // Settings

    pub async fn update_settings(&self, update: SettingsUpdate) -> Result<Settings> {
        let settings = self.services.settings.update_settings(&update).await?;
        self.data.write().await.settings = settings.clone();
        Ok(settings)
    }

    // Prices

    /// Fetches the latest NAV of every held mutual fund and reprices its
    /// lots. Schemes whose quote fails keep their old price.
    pub async fn refresh_fund_prices(&self) -> Result<usize> {
        let Some(provider) = self.fund_provider.clone() else {
            return Ok(0);
        };
        let lots: Vec<Lot> = {
            let data = self.data.read().await;
            if !data.settings.mutual_funds_enabled {
                return Ok(0);
            }
            data.lots
                .iter()
                .filter(|l| l.asset_class == AssetClass::MutualFund && l.is_open())
                .cloned()
                .collect()
        };
        if lots.is_empty() {
            return Ok(0);
        }

        let codes: BTreeSet<String> = lots.iter().map(|l| l.symbol.trim().to_string()).collect();
        let results = join_all(codes.into_iter().map(|code| {
            let provider = provider.clone();
            async move {
                let quote = provider.latest_quote(&code).await;
                (code, quote)
            }
        }))
        .await;

        let mut quotes: HashMap<String, FundQuote> = HashMap::new();
        for (code, result) in results {
            match result {
                Ok(quote) => {
                    quotes.insert(code, quote);
                }
                Err(e) => warn!("Skipping NAV refresh for scheme {}: {}", code, e),
            }
        }

        let updates: Vec<LotPriceUpdate> = lots
            .iter()
            .filter_map(|lot| {
                quotes.get(lot.symbol.trim()).map(|quote| LotPriceUpdate {
                    lot_id: lot.id.clone(),
                    current_price: quote.nav,
                    previous_price: quote.previous_nav,
                })
            })
            .collect();
        if updates.is_empty() {
            debug!("No fund quotes available; nothing repriced");
            return Ok(0);
        }

        let repriced = self.update_lot_prices(updates).await?;
        info!("Repriced {} mutual fund lots", repriced.len());
        Ok(repriced.len())
    }
}

#[async_trait]
impl RefreshHandler for FinanceState {
    async fn refresh(&self) -> Result<()> {
        self.refresh_fund_prices().await.map(|_| ())
    }
}
