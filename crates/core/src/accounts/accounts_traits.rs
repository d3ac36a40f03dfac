//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use crate::errors::Result;
use crate::ledger::LedgerEntry;

/// Trait defining the contract for Account repository operations.
///
/// Balance changes are not part of this trait: they are applied together
/// with their ledger entry by `LedgerRepositoryTrait`.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Creates a new account. `balance` starts at `opening_balance`.
    async fn create(&self, new_account: NewAccount) -> Result<Account>;

    /// Updates the descriptive fields of an existing account.
    async fn update(&self, account_update: AccountUpdate) -> Result<Account>;

    /// Deletes an account by its ID.
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, account_id: i64) -> Result<usize>;

    /// Retrieves an account by its ID.
    fn get_by_id(&self, account_id: i64) -> Result<Account>;

    /// Lists accounts, optionally filtered by active status.
    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>>;
}

/// Trait defining the contract for Account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account>;

    async fn update_account(&self, account_update: AccountUpdate) -> Result<Account>;

    async fn delete_account(&self, account_id: i64) -> Result<()>;

    fn get_account(&self, account_id: i64) -> Result<Account>;

    fn list_accounts(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>>;

    /// Deposits `amount` into the account, logging an income entry.
    async fn add_funds(
        &self,
        account_id: i64,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<LedgerEntry>;

    /// Overwrites the balance. The difference is logged as an adjustment
    /// entry; `None` is returned when the balance is unchanged.
    async fn set_balance(&self, account_id: i64, new_balance: Decimal)
        -> Result<Option<LedgerEntry>>;
}
