use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::milestones_errors::MilestoneError;
use super::milestones_model::{Milestone, MilestoneUpdate, NewMilestone};
use super::milestones_traits::{MilestoneRepositoryTrait, MilestoneServiceTrait};
use crate::constants::GENERATED_MILESTONE_COUNT;
use crate::errors::{Error, Result};
use crate::goals::Goal;

/// Service for managing milestones.
pub struct MilestoneService {
    milestone_repository: Arc<dyn MilestoneRepositoryTrait>,
}

impl MilestoneService {
    pub fn new(milestone_repository: Arc<dyn MilestoneRepositoryTrait>) -> Self {
        MilestoneService {
            milestone_repository,
        }
    }

    /// Loads a milestone that may still be changed, i.e. one that exists and has not been met.
    fn require_pending(&self, milestone_id: i32) -> Result<Milestone> {
        let milestone = self
            .milestone_repository
            .get(milestone_id)?
            .ok_or(MilestoneError::MilestoneNotFound(milestone_id))?;
        if milestone.is_met() {
            return Err(MilestoneError::MilestoneAlreadyCompleted(milestone_id).into());
        }
        Ok(milestone)
    }
}

/// Rejects targets that are not a finite amount in `(0, goal.target]`, or that
/// another milestone of the goal already uses. `own_id` is skipped so an update
/// can keep its current target.
fn check_target(
    goal: &Goal,
    target: f64,
    siblings: &[Milestone],
    own_id: Option<i32>,
) -> Result<()> {
    if !(target.is_finite() && target > 0.0) || target > goal.target {
        return Err(MilestoneError::InvalidMilestoneTarget(target).into());
    }
    if siblings
        .iter()
        .any(|m| Some(m.id) != own_id && m.target == target)
    {
        return Err(MilestoneError::DuplicateMilestoneTarget {
            goal_id: goal.id,
            target,
        }
        .into());
    }
    Ok(())
}

/// Equally spaced milestones up to and including the goal target.
fn evenly_spaced_milestones(goal: &Goal) -> Vec<NewMilestone> {
    let step = goal.target / f64::from(GENERATED_MILESTONE_COUNT);
    (1..=GENERATED_MILESTONE_COUNT)
        .map(|i| NewMilestone {
            target: step * f64::from(i),
            description: Some(format!(
                "{} - {}/{} completed!",
                goal.name, i, GENERATED_MILESTONE_COUNT
            )),
        })
        .collect()
}

#[async_trait]
impl MilestoneServiceTrait for MilestoneService {
    fn get_all_milestones(&self) -> Result<Vec<Milestone>> {
        let mut milestones = self.milestone_repository.get_all()?;
        milestones.sort_by_key(|m| m.id);
        Ok(milestones)
    }

    fn get_milestones_for_goal(&self, goal_id: i32) -> Result<Vec<Milestone>> {
        let mut milestones = self.milestone_repository.get_for_goal(goal_id)?;
        milestones.sort_by_key(|m| m.id);
        Ok(milestones)
    }

    fn get_milestone(&self, milestone_id: i32) -> Result<Milestone> {
        self.milestone_repository
            .get(milestone_id)?
            .ok_or_else(|| MilestoneError::MilestoneNotFound(milestone_id).into())
    }

    async fn generate_milestones(&self, goal: &Goal) -> Result<Vec<Milestone>> {
        if !self.milestone_repository.get_for_goal(goal.id)?.is_empty() {
            return Err(MilestoneError::MilestonesAlreadyExist(goal.id).into());
        }

        debug!("Generating milestones for goal {}", goal.id);
        let mut milestones = self
            .milestone_repository
            .create_multiple_for_goal(evenly_spaced_milestones(goal), goal.id)
            .await?;
        milestones.sort_by_key(|m| m.id);
        Ok(milestones)
    }

    async fn create_milestone_for_goal(
        &self,
        new_milestone: NewMilestone,
        goal: &Goal,
    ) -> Result<Milestone> {
        let target = new_milestone.target;
        let existing = self.milestone_repository.get_for_goal(goal.id)?;
        check_target(goal, target, &existing, None)?;

        debug!("Creating milestone at {} for goal {}", target, goal.id);
        self.milestone_repository
            .create_for_goal(new_milestone, goal.id)
            .await?
            .ok_or_else(|| {
                Error::PersistenceFailure(format!("milestone for goal {} was not created", goal.id))
            })
    }

    async fn update_milestone(
        &self,
        milestone_id: i32,
        milestone_update: MilestoneUpdate,
        goal: &Goal,
    ) -> Result<Milestone> {
        let siblings = self.milestone_repository.get_for_goal(goal.id)?;
        let existing = siblings
            .iter()
            .find(|m| m.id == milestone_id)
            .ok_or(MilestoneError::MilestoneNotFound(milestone_id))?;
        if existing.is_met() {
            return Err(MilestoneError::MilestoneAlreadyCompleted(milestone_id).into());
        }
        check_target(goal, milestone_update.target, &siblings, Some(milestone_id))?;

        debug!("Updating milestone {} of goal {}", milestone_id, goal.id);
        let milestone = milestone_update.apply_to(existing);
        self.milestone_repository
            .update(milestone_id, milestone)
            .await?
            .ok_or_else(|| {
                Error::PersistenceFailure(format!("milestone {} was not updated", milestone_id))
            })
    }

    async fn delete_milestone(&self, milestone_id: i32) -> Result<Milestone> {
        self.require_pending(milestone_id)?;

        debug!("Deleting milestone {}", milestone_id);
        self.milestone_repository
            .delete(milestone_id)
            .await?
            .ok_or_else(|| MilestoneError::MilestoneNotFound(milestone_id).into())
    }
}
