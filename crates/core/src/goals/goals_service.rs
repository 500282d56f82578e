use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::goals_errors::GoalError;
use super::goals_model::{Goal, GoalStatus, GoalUpdate, NewGoal};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::constants::MIN_USER_ID;
use crate::errors::{Error, Result};

pub struct GoalService {
    goal_repository: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(goal_repository: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService { goal_repository }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self) -> Result<Vec<Goal>> {
        let mut goals = self.goal_repository.get_goals()?;
        goals.sort_by_key(|g| g.id);
        Ok(goals)
    }

    fn get_goals_for_user(&self, user_id: i32) -> Result<Vec<Goal>> {
        let mut goals = self.goal_repository.get_goals_for_user(user_id)?;
        goals.sort_by_key(|g| g.id);
        Ok(goals)
    }

    fn get_goal(&self, goal_id: i32) -> Result<Goal> {
        self.goal_repository
            .get_goal(goal_id)?
            .ok_or_else(|| GoalError::GoalNotFound(goal_id).into())
    }

    fn get_goal_for_user(&self, user_id: i32, goal_id: i32) -> Result<Goal> {
        self.goal_repository
            .get_goal_for_user(goal_id, user_id)?
            .ok_or_else(|| GoalError::GoalNotFoundForUser { goal_id, user_id }.into())
    }

    async fn create_goal(&self, user_id: Option<i32>, new_goal: NewGoal) -> Result<Goal> {
        let user_id = user_id
            .filter(|id| *id >= MIN_USER_ID)
            .ok_or_else(|| GoalError::InvalidArgument("a valid user id is required".to_string()))?;
        if new_goal.has_assigned_id() {
            return Err(GoalError::InvalidArgument(
                "a new goal cannot carry an id".to_string(),
            )
            .into());
        }
        new_goal.validate()?;

        debug!("Creating goal '{}' for user {}", new_goal.name, user_id);
        let new_goal = NewGoal {
            id: None,
            status: GoalStatus::Open,
            ..new_goal
        };
        self.goal_repository
            .create_goal_for_user(user_id, new_goal)
            .await?
            .ok_or_else(|| {
                Error::PersistenceFailure(format!("goal for user {} was not created", user_id))
            })
    }

    async fn update_goal(
        &self,
        user_id: i32,
        goal_id: i32,
        goal_update: GoalUpdate,
    ) -> Result<Goal> {
        let existing = self.get_goal_for_user(user_id, goal_id)?;
        let goal = goal_update.apply_to(&existing);

        debug!("Updating goal {} for user {}", goal_id, user_id);
        self.goal_repository
            .update_goal(goal)
            .await?
            .ok_or_else(|| Error::PersistenceFailure(format!("goal {} was not updated", goal_id)))
    }

    async fn delete_goal(&self, user_id: i32, goal_id: i32) -> Result<bool> {
        self.get_goal_for_user(user_id, goal_id)?;

        debug!("Deleting goal {} for user {}", goal_id, user_id);
        match self.goal_repository.delete_goal(goal_id).await? {
            Some(_) => Ok(true),
            None => Err(GoalError::GoalNotFoundForUser { goal_id, user_id }.into()),
        }
    }
}
