use thiserror::Error;

/// Errors raised while validating and posting a transaction.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("A transaction must be provided")]
    NullTransaction,

    #[error("Transaction amount must be greater than zero, got {0}")]
    InvalidAmount(f64),

    #[error("A source goal, a target goal or both must be provided")]
    MissingEndpoint,

    #[error("Source and target goal must differ (both were {0})")]
    SameEndpoint(i32),

    #[error("User id must be greater than zero, got {0}")]
    InvalidUser(i32),

    #[error("One or more goals do not belong to user {0}")]
    ForeignGoal(i32),

    #[error("Goal {goal_id} holds {available} which does not cover {requested}")]
    InsufficientFunds {
        goal_id: i32,
        available: f64,
        requested: f64,
    },
}
