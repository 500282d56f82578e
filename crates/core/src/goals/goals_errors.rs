use thiserror::Error;

/// Precondition failures raised by the goal lifecycle rules.
#[derive(Debug, Error)]
pub enum GoalError {
    #[error("Goal {0} does not exist")]
    GoalNotFound(i32),

    #[error("Goal {goal_id} does not exist for user {user_id}")]
    GoalNotFoundForUser { goal_id: i32, user_id: i32 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Goal target must be greater than zero, got {0}")]
    InvalidTarget(f64),
}
