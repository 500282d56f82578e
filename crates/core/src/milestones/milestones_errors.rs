use thiserror::Error;

/// Precondition failures raised by the milestone lifecycle rules and settlement.
#[derive(Debug, Error)]
pub enum MilestoneError {
    #[error("Milestone {0} does not exist")]
    MilestoneNotFound(i32),

    #[error("Milestone {0} has already been completed")]
    MilestoneAlreadyCompleted(i32),

    #[error("Goal {0} already has milestones")]
    MilestonesAlreadyExist(i32),

    #[error("Milestone target {0} must be above zero and within the goal target")]
    InvalidMilestoneTarget(f64),

    #[error("Goal {goal_id} already has a milestone with target {target}")]
    DuplicateMilestoneTarget { goal_id: i32, target: f64 },

    #[error("Settlement for goal {goal_id} stopped short: {settled} settled, {failed} failed")]
    SettlementIncomplete {
        goal_id: i32,
        settled: usize,
        failed: usize,
    },
}
