use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use saver_core::goals::{Goal, GoalRepositoryTrait, NewGoal};
use saver_core::Result;

use super::model::{GoalChangesetDB, GoalDB, NewGoalDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::goals;

/// Goals are soft deleted: a deleted row stays in place (its ledger still
/// references it) but is invisible to every query here.
pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }

    fn to_goals(rows: Vec<GoalDB>) -> Result<Vec<Goal>> {
        rows.into_iter().map(Goal::try_from).collect()
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn get_goals(&self) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::is_deleted.eq(false))
            .order(goals::id.asc())
            .select(GoalDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Self::to_goals(rows)
    }

    fn get_goals_for_user(&self, user_id: i32) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::user_id.eq(user_id))
            .filter(goals::is_deleted.eq(false))
            .order(goals::id.asc())
            .select(GoalDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Self::to_goals(rows)
    }

    fn get_goal(&self, goal_id: i32) -> Result<Option<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        goals::table
            .find(goal_id)
            .filter(goals::is_deleted.eq(false))
            .select(GoalDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Goal::try_from)
            .transpose()
    }

    fn get_goal_for_user(&self, goal_id: i32, user_id: i32) -> Result<Option<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        goals::table
            .find(goal_id)
            .filter(goals::user_id.eq(user_id))
            .filter(goals::is_deleted.eq(false))
            .select(GoalDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Goal::try_from)
            .transpose()
    }

    async fn create_goal_for_user(&self, user_id: i32, new_goal: NewGoal) -> Result<Option<Goal>> {
        debug!("Inserting goal for user {}", user_id);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Goal>> {
                let row = diesel::insert_into(goals::table)
                    .values(NewGoalDB::for_user(user_id, new_goal))
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Goal::try_from(row).map(Some)
            })
            .await
    }

    async fn update_goal(&self, goal: Goal) -> Result<Option<Goal>> {
        let goal_id = goal.id;
        let changes = GoalChangesetDB::from(goal);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Goal>> {
                diesel::update(
                    goals::table
                        .find(goal_id)
                        .filter(goals::is_deleted.eq(false)),
                )
                .set(&changes)
                .returning(GoalDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?
                .map(Goal::try_from)
                .transpose()
            })
            .await
    }

    async fn delete_goal(&self, goal_id: i32) -> Result<Option<Goal>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Goal>> {
                diesel::update(
                    goals::table
                        .find(goal_id)
                        .filter(goals::is_deleted.eq(false)),
                )
                .set(goals::is_deleted.eq(true))
                .returning(GoalDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?
                .map(Goal::try_from)
                .transpose()
            })
            .await
    }
}
