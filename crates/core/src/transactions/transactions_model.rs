//! Ledger entry models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable ledger entry moving a positive amount.
///
/// Direction is encoded by which endpoints are set: no source means new
/// external funds, no target means money leaving the system, both means a
/// transfer between two goals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i32,
    pub amount: f64,
    pub source_goal_id: Option<i32>,
    pub target_goal_id: Option<i32>,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// True when `goal_id` is the source. Any other row of the goal's history posts to it.
    pub fn is_withdrawn_from(&self, goal_id: i32) -> bool {
        self.source_goal_id == Some(goal_id)
    }
}

/// Input model for posting a transaction.
///
/// The target goal travels next to this model as a separate argument.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub amount: f64,
    #[serde(default)]
    pub source_goal_id: Option<i32>,
    /// Filled with the current time when absent.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewTransaction {
    pub fn new(amount: f64, source_goal_id: Option<i32>, timestamp: DateTime<Utc>) -> Self {
        NewTransaction {
            amount,
            source_goal_id,
            timestamp: Some(timestamp),
        }
    }
}
