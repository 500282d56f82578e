use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use saver_core::milestones::{Milestone, MilestoneRepositoryTrait, NewMilestone};
use saver_core::Result;

use super::model::{MilestoneChangesetDB, MilestoneDB, NewMilestoneDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::milestones;

pub struct MilestoneRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl MilestoneRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        MilestoneRepository { pool, writer }
    }
}

#[async_trait]
impl MilestoneRepositoryTrait for MilestoneRepository {
    fn get_all(&self) -> Result<Vec<Milestone>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = milestones::table
            .order(milestones::id.asc())
            .select(MilestoneDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Milestone::from).collect())
    }

    fn get_for_goal(&self, goal_id: i32) -> Result<Vec<Milestone>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = milestones::table
            .filter(milestones::goal_id.eq(goal_id))
            .order(milestones::id.asc())
            .select(MilestoneDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Milestone::from).collect())
    }

    fn get(&self, milestone_id: i32) -> Result<Option<Milestone>> {
        let mut conn = get_connection(&self.pool)?;
        let row = milestones::table
            .find(milestone_id)
            .select(MilestoneDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Milestone::from))
    }

    async fn create_for_goal(
        &self,
        new_milestone: NewMilestone,
        goal_id: i32,
    ) -> Result<Option<Milestone>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Milestone>> {
                let row = diesel::insert_into(milestones::table)
                    .values(NewMilestoneDB::for_goal(goal_id, new_milestone))
                    .returning(MilestoneDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Some(Milestone::from(row)))
            })
            .await
    }

    async fn create_multiple_for_goal(
        &self,
        new_milestones: Vec<NewMilestone>,
        goal_id: i32,
    ) -> Result<Vec<Milestone>> {
        // One writer job, so the batch shares a single immediate transaction
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vec<Milestone>> {
                let mut created = Vec::with_capacity(new_milestones.len());
                for new_milestone in new_milestones {
                    let row = diesel::insert_into(milestones::table)
                        .values(NewMilestoneDB::for_goal(goal_id, new_milestone))
                        .returning(MilestoneDB::as_returning())
                        .get_result(conn)
                        .into_core()?;
                    created.push(Milestone::from(row));
                }
                Ok(created)
            })
            .await
    }

    async fn update(&self, milestone_id: i32, milestone: Milestone) -> Result<Option<Milestone>> {
        let changes = MilestoneChangesetDB::from(milestone);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Milestone>> {
                let row = diesel::update(milestones::table.find(milestone_id))
                    .set(&changes)
                    .returning(MilestoneDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?;
                Ok(row.map(Milestone::from))
            })
            .await
    }

    async fn delete(&self, milestone_id: i32) -> Result<Option<Milestone>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Milestone>> {
                let row = diesel::delete(milestones::table.find(milestone_id))
                    .returning(MilestoneDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?;
                Ok(row.map(Milestone::from))
            })
            .await
    }
}
