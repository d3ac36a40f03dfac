use async_trait::async_trait;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::model::GoalDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::ledger::record_in_tx;
use crate::schema::goals;
use crate::utils::{new_id, now};
use finboard_core::errors::Result;
use finboard_core::goals::{Goal, GoalRepositoryTrait, GoalUpdate, NewGoal};
use finboard_core::ledger::{LedgerEntry, LedgerWrite};

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

fn load_goal(conn: &mut SqliteConnection, goal_id: &str) -> Result<Goal> {
    goals::table
        .find(goal_id)
        .select(GoalDB::as_select())
        .first::<GoalDB>(conn)
        .into_core()?
        .try_into()
}

fn save_goal(conn: &mut SqliteConnection, goal: &Goal) -> Result<()> {
    let row = GoalDB::from(goal.clone());
    diesel::update(goals::table.find(&row.id))
        .set(&row)
        .execute(conn)
        .into_core()?;
    Ok(())
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn load_goals(&self) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        goals::table
            .select(GoalDB::as_select())
            .order(goals::created_at.asc())
            .load::<GoalDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Goal::try_from)
            .collect()
    }

    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        load_goal(&mut conn, goal_id)
    }

    async fn insert_new_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        self.writer
            .exec(move |conn| {
                let goal = new_goal.into_goal(new_id(), now());
                diesel::insert_into(goals::table)
                    .values(GoalDB::from(goal.clone()))
                    .execute(conn)
                    .into_core()?;
                Ok(goal)
            })
            .await
    }

    async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal> {
        self.writer
            .exec(move |conn| {
                let existing = load_goal(conn, &goal_update.id)?;
                let goal = goal_update.apply_to(existing, now());
                save_goal(conn, &goal)?;
                Ok(goal)
            })
            .await
    }

    async fn contribute(
        &self,
        goal_id: &str,
        amount: Decimal,
        debit: Option<LedgerWrite>,
    ) -> Result<(Goal, Option<LedgerEntry>)> {
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn| {
                let entry = debit.map(|w| record_in_tx(conn, w)).transpose()?;
                let mut goal = load_goal(conn, &goal_id)?;
                goal.current_amount += amount;
                goal.updated_at = now();
                save_goal(conn, &goal)?;
                Ok((goal, entry))
            })
            .await
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn| diesel::delete(goals::table.find(goal_id)).execute(conn).into_core())
            .await
    }
}
