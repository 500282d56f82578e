//! Milestone repository and service traits.

use async_trait::async_trait;

use super::milestones_model::{Milestone, MilestoneUpdate, NewMilestone};
use crate::errors::Result;
use crate::goals::Goal;

/// Trait defining the contract for Milestone repository operations.
///
/// Absence is reported as `Ok(None)`; errors are reserved for I/O failures.
#[async_trait]
pub trait MilestoneRepositoryTrait: Send + Sync {
    fn get_all(&self) -> Result<Vec<Milestone>>;

    fn get_for_goal(&self, goal_id: i32) -> Result<Vec<Milestone>>;

    fn get(&self, milestone_id: i32) -> Result<Option<Milestone>>;

    async fn create_for_goal(
        &self,
        new_milestone: NewMilestone,
        goal_id: i32,
    ) -> Result<Option<Milestone>>;

    /// Inserts the whole batch in one write; either every milestone is stored or none is.
    async fn create_multiple_for_goal(
        &self,
        new_milestones: Vec<NewMilestone>,
        goal_id: i32,
    ) -> Result<Vec<Milestone>>;

    async fn update(&self, milestone_id: i32, milestone: Milestone) -> Result<Option<Milestone>>;

    /// Removes the milestone and returns the removed record.
    async fn delete(&self, milestone_id: i32) -> Result<Option<Milestone>>;
}

/// Trait defining the contract for Milestone service operations.
#[async_trait]
pub trait MilestoneServiceTrait: Send + Sync {
    fn get_all_milestones(&self) -> Result<Vec<Milestone>>;
    fn get_milestones_for_goal(&self, goal_id: i32) -> Result<Vec<Milestone>>;
    fn get_milestone(&self, milestone_id: i32) -> Result<Milestone>;
    async fn generate_milestones(&self, goal: &Goal) -> Result<Vec<Milestone>>;
    async fn create_milestone_for_goal(
        &self,
        new_milestone: NewMilestone,
        goal: &Goal,
    ) -> Result<Milestone>;
    /// The milestone must be a pending milestone of `goal`; the new target follows
    /// the same rules as on create.
    async fn update_milestone(
        &self,
        milestone_id: i32,
        milestone_update: MilestoneUpdate,
        goal: &Goal,
    ) -> Result<Milestone>;
    async fn delete_milestone(&self, milestone_id: i32) -> Result<Milestone>;
}
