//! Milestone domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A one-time achievement marker on a goal.
///
/// `date_met` is only ever stamped by the settlement engine; once present the
/// milestone can no longer be updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: i32,
    pub target: f64,
    pub description: Option<String>,
    pub date_met: Option<DateTime<Utc>>,
}

impl Milestone {
    pub fn is_met(&self) -> bool {
        self.date_met.is_some()
    }
}

/// Input model for creating a milestone.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMilestone {
    pub target: f64,
    pub description: Option<String>,
}

/// Input model for updating a pending milestone.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneUpdate {
    pub target: f64,
    pub description: Option<String>,
}

impl MilestoneUpdate {
    /// Applies the update on top of the stored milestone. `date_met` is left untouched.
    pub fn apply_to(self, existing: &Milestone) -> Milestone {
        Milestone {
            id: existing.id,
            target: self.target,
            description: self.description,
            date_met: existing.date_met,
        }
    }
}
