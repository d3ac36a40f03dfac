use crate::accounts::AccountRepositoryTrait;
use crate::constants::ledger_categories;
use crate::errors::{ensure_positive, DatabaseError, Error, Result};
use crate::goals::goals_model::{Goal, GoalContribution, GoalUpdate, NewGoal};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::ledger::{ensure_sufficient_funds, BalanceChange, DebitPolicy, LedgerEntry, LedgerWrite};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
    account_repo: Arc<dyn AccountRepositoryTrait>,
}

impl GoalService {
    pub fn new(
        goal_repo: Arc<dyn GoalRepositoryTrait>,
        account_repo: Arc<dyn AccountRepositoryTrait>,
    ) -> Self {
        GoalService {
            goal_repo,
            account_repo,
        }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self) -> Result<Vec<Goal>> {
        self.goal_repo.load_goals()
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        if let Some(account_id) = new_goal.account_id {
            self.account_repo.get_by_id(account_id)?;
        }
        self.goal_repo.insert_new_goal(new_goal).await
    }

    async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal> {
        goal_update.validate()?;
        if let Some(account_id) = goal_update.account_id {
            self.account_repo.get_by_id(account_id)?;
        }
        self.goal_repo.update_goal(goal_update).await
    }

    async fn contribute(
        &self,
        goal_id: &str,
        contribution: GoalContribution,
    ) -> Result<(Goal, Option<LedgerEntry>)> {
        ensure_positive("amount", contribution.amount)?;
        let goal = self.goal_repo.get_goal(goal_id)?;

        let debit = match contribution.account_id.or(goal.account_id) {
            Some(account_id) => {
                let account = self.account_repo.get_by_id(account_id)?;
                ensure_sufficient_funds(&account, contribution.amount)?;
                let entry = BalanceChange::new(
                    account_id,
                    -contribution.amount,
                    format!("Contribution to {}", goal.name),
                    ledger_categories::GOAL,
                    contribution.contribution_date,
                )
                .into_entry();
                Some(LedgerWrite::new(entry, DebitPolicy::RequireFunds))
            }
            None => None,
        };

        debug!("Contributing {} to goal {}", contribution.amount, goal.id);
        self.goal_repo
            .contribute(&goal.id, contribution.amount, debit)
            .await
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<()> {
        let deleted = self.goal_repo.delete_goal(goal_id).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Goal {}",
                goal_id
            ))));
        }
        Ok(())
    }
}
