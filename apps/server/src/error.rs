use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use saver_core::errors::{DatabaseError, Error as CoreError};
use saver_core::goals::GoalError;
use saver_core::milestones::MilestoneError;
use saver_core::transactions::TransactionError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Transaction(e) => match e {
            TransactionError::NullTransaction
            | TransactionError::InvalidAmount(_)
            | TransactionError::MissingEndpoint
            | TransactionError::SameEndpoint(_)
            | TransactionError::InvalidUser(_) => StatusCode::BAD_REQUEST,
            TransactionError::ForeignGoal(_) => StatusCode::FORBIDDEN,
            TransactionError::InsufficientFunds { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        },
        CoreError::Milestone(e) => match e {
            MilestoneError::MilestoneNotFound(_) => StatusCode::NOT_FOUND,
            MilestoneError::MilestoneAlreadyCompleted(_)
            | MilestoneError::MilestonesAlreadyExist(_)
            | MilestoneError::DuplicateMilestoneTarget { .. } => StatusCode::CONFLICT,
            MilestoneError::InvalidMilestoneTarget(_) => StatusCode::BAD_REQUEST,
            MilestoneError::SettlementIncomplete { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        },
        CoreError::Goal(e) => match e {
            GoalError::GoalNotFound(_) | GoalError::GoalNotFoundForUser { .. } => {
                StatusCode::NOT_FOUND
            }
            GoalError::InvalidArgument(_) | GoalError::InvalidTarget(_) => StatusCode::BAD_REQUEST,
        },
        CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
        CoreError::PersistenceFailure(_) | CoreError::Database(_) | CoreError::Unexpected(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(e) => core_status(e),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        if status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
