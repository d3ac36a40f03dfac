use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalContribution, GoalUpdate, NewGoal};
use crate::ledger::{LedgerEntry, LedgerWrite};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn load_goals(&self) -> Result<Vec<Goal>>;
    fn get_goal(&self, goal_id: &str) -> Result<Goal>;
    async fn insert_new_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal>;
    /// Adds `amount` to the goal and applies the optional debit atomically.
    async fn contribute(
        &self,
        goal_id: &str,
        amount: Decimal,
        debit: Option<LedgerWrite>,
    ) -> Result<(Goal, Option<LedgerEntry>)>;
    async fn delete_goal(&self, goal_id: &str) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self) -> Result<Vec<Goal>>;
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal>;
    async fn contribute(
        &self,
        goal_id: &str,
        contribution: GoalContribution,
    ) -> Result<(Goal, Option<LedgerEntry>)>;
    async fn delete_goal(&self, goal_id: &str) -> Result<()>;
}
