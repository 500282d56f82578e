//! Goals domain models.

use serde::{Deserialize, Serialize};

use super::goals_errors::GoalError;
use crate::errors::{Result, ValidationError};

/// Lifecycle status of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    #[default]
    Open,
    Complete,
    Cancelled,
}

impl GoalStatus {
    /// Numeric id used when the status is persisted.
    pub fn as_id(&self) -> i32 {
        match self {
            GoalStatus::Open => 1,
            GoalStatus::Complete => 2,
            GoalStatus::Cancelled => 3,
        }
    }

    pub fn from_id(status_id: i32) -> Result<Self> {
        match status_id {
            1 => Ok(GoalStatus::Open),
            2 => Ok(GoalStatus::Complete),
            3 => Ok(GoalStatus::Cancelled),
            other => Err(ValidationError::UnknownGoalStatus(other).into()),
        }
    }
}

/// Domain model representing a savings goal.
///
/// Ownership is not carried on the goal itself; it is resolved through the
/// repository (`get_goals_for_user`, `get_goal_for_user`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub target: f64,
    pub status: GoalStatus,
    pub is_default: bool,
}

impl Goal {
    /// Builds a goal, rejecting any target that is not strictly positive.
    pub fn new(
        id: i32,
        name: impl Into<String>,
        description: Option<String>,
        target: f64,
        status: GoalStatus,
        is_default: bool,
    ) -> Result<Self> {
        ensure_positive_target(target)?;
        Ok(Goal {
            id,
            name: name.into(),
            description,
            target,
            status,
            is_default,
        })
    }
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    /// Must be absent (or zero): ids are assigned by storage.
    #[serde(default)]
    pub id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub target: f64,
    /// Ignored on create; new goals always start `Open`.
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub is_default: bool,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        ensure_positive_target(self.target)
    }

    /// True when the caller supplied a storage id, which create does not allow.
    pub fn has_assigned_id(&self) -> bool {
        self.id.is_some_and(|id| id != 0)
    }
}

/// Input model for updating an existing goal.
///
/// The target is not part of an update: a goal's target is fixed at creation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub name: String,
    pub description: Option<String>,
    pub status: GoalStatus,
    pub is_default: bool,
}

impl GoalUpdate {
    /// Applies the update on top of the stored goal, keeping its id and target.
    pub fn apply_to(self, existing: &Goal) -> Goal {
        Goal {
            id: existing.id,
            name: self.name,
            description: self.description,
            target: existing.target,
            status: self.status,
            is_default: self.is_default,
        }
    }
}

fn ensure_positive_target(target: f64) -> Result<()> {
    if !(target.is_finite() && target > 0.0) {
        return Err(GoalError::InvalidTarget(target).into());
    }
    Ok(())
}
