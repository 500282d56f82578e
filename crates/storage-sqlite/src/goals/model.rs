//! Database models for goals.

use diesel::prelude::*;
use saver_core::goals::{Goal, GoalStatus, NewGoal};

/// Database model for goals
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub target: f64,
    pub status_id: i32,
    pub is_default: bool,
    pub is_deleted: bool,
}

/// Database model for creating a new goal
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
pub struct NewGoalDB {
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub target: f64,
    pub status_id: i32,
    pub is_default: bool,
    pub is_deleted: bool,
}

/// Columns a goal update may touch. The target and owner never change.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(treat_none_as_null = true)]
pub struct GoalChangesetDB {
    pub name: String,
    pub description: Option<String>,
    pub status_id: i32,
    pub is_default: bool,
}

impl TryFrom<GoalDB> for Goal {
    type Error = saver_core::Error;

    fn try_from(db: GoalDB) -> saver_core::Result<Self> {
        Goal::new(
            db.id,
            db.name,
            db.description,
            db.target,
            GoalStatus::from_id(db.status_id)?,
            db.is_default,
        )
    }
}

impl NewGoalDB {
    pub fn for_user(user_id: i32, domain: NewGoal) -> Self {
        Self {
            user_id,
            name: domain.name,
            description: domain.description,
            target: domain.target,
            status_id: domain.status.as_id(),
            is_default: domain.is_default,
            is_deleted: false,
        }
    }
}

impl From<Goal> for GoalChangesetDB {
    fn from(domain: Goal) -> Self {
        Self {
            name: domain.name,
            description: domain.description,
            status_id: domain.status.as_id(),
            is_default: domain.is_default,
        }
    }
}
