//! Goal repository and service traits.
//!
//! These traits define the contract for goal operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::goals_model::{Goal, GoalUpdate, NewGoal};
use crate::errors::Result;

/// Trait defining the contract for Goal repository operations.
///
/// Absence is reported as `Ok(None)`; errors are reserved for I/O failures.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// Returns every goal on the system.
    fn get_goals(&self) -> Result<Vec<Goal>>;

    /// Returns the goals owned by the user.
    fn get_goals_for_user(&self, user_id: i32) -> Result<Vec<Goal>>;

    fn get_goal(&self, goal_id: i32) -> Result<Option<Goal>>;

    /// Combined owner + id lookup.
    fn get_goal_for_user(&self, goal_id: i32, user_id: i32) -> Result<Option<Goal>>;

    /// Persists a new goal owned by the user. Storage assigns the id.
    async fn create_goal_for_user(&self, user_id: i32, new_goal: NewGoal) -> Result<Option<Goal>>;

    async fn update_goal(&self, goal: Goal) -> Result<Option<Goal>>;

    /// Removes the goal and returns the removed record.
    async fn delete_goal(&self, goal_id: i32) -> Result<Option<Goal>>;
}

/// Trait defining the contract for Goal service operations.
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self) -> Result<Vec<Goal>>;
    fn get_goals_for_user(&self, user_id: i32) -> Result<Vec<Goal>>;
    fn get_goal(&self, goal_id: i32) -> Result<Goal>;
    /// Fails with `GoalNotFoundForUser` when the goal is missing or owned by someone else.
    fn get_goal_for_user(&self, user_id: i32, goal_id: i32) -> Result<Goal>;
    async fn create_goal(&self, user_id: Option<i32>, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, user_id: i32, goal_id: i32, goal_update: GoalUpdate)
        -> Result<Goal>;
    async fn delete_goal(&self, user_id: i32, goal_id: i32) -> Result<bool>;
}
