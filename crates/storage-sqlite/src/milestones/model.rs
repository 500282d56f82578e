//! Database models for milestones.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use saver_core::milestones::{Milestone, NewMilestone};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::milestones)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MilestoneDB {
    pub id: i32,
    pub goal_id: i32,
    pub target: f64,
    pub description: Option<String>,
    pub date_met: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::milestones)]
pub struct NewMilestoneDB {
    pub goal_id: i32,
    pub target: f64,
    pub description: Option<String>,
}

/// Full replacement of the mutable columns; a `None` clears the column.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::milestones)]
#[diesel(treat_none_as_null = true)]
pub struct MilestoneChangesetDB {
    pub target: f64,
    pub description: Option<String>,
    pub date_met: Option<NaiveDateTime>,
}

impl From<MilestoneDB> for Milestone {
    fn from(db: MilestoneDB) -> Self {
        Self {
            id: db.id,
            target: db.target,
            description: db.description,
            date_met: db.date_met.map(|d| d.and_utc()),
        }
    }
}

impl NewMilestoneDB {
    pub fn for_goal(goal_id: i32, domain: NewMilestone) -> Self {
        Self {
            goal_id,
            target: domain.target,
            description: domain.description,
        }
    }
}

impl From<Milestone> for MilestoneChangesetDB {
    fn from(domain: Milestone) -> Self {
        Self {
            target: domain.target,
            description: domain.description,
            date_met: domain.date_met.map(|d| d.naive_utc()),
        }
    }
}
