//! Milestone settlement.
//!
//! Marks pending milestones as met once a goal's balance reaches their target.
//! Settlement only ever touches milestones whose `date_met` is absent, so running
//! it again at the same balance is a no-op.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::milestones_errors::MilestoneError;
use super::milestones_model::Milestone;
use super::milestones_traits::MilestoneRepositoryTrait;
use crate::errors::Result;
use crate::transactions::to_decimal;

pub struct MilestoneSettlement {
    milestone_repository: Arc<dyn MilestoneRepositoryTrait>,
}

impl MilestoneSettlement {
    pub fn new(milestone_repository: Arc<dyn MilestoneRepositoryTrait>) -> Self {
        MilestoneSettlement {
            milestone_repository,
        }
    }

    /// Pending milestones whose target is covered by `balance`.
    pub fn newly_surpassed(milestones: &[Milestone], balance: Decimal) -> Vec<Milestone> {
        milestones
            .iter()
            .filter(|m| !m.is_met() && to_decimal(m.target).is_some_and(|t| t <= balance))
            .cloned()
            .collect()
    }

    /// Stamps every newly surpassed milestone of the goal with `settled_at`.
    ///
    /// Each update is attempted independently. Updates that succeed are kept even
    /// when another one fails; in that case the call reports
    /// [`MilestoneError::SettlementIncomplete`].
    pub async fn settle(
        &self,
        goal_id: i32,
        current_balance: Decimal,
        settled_at: DateTime<Utc>,
    ) -> Result<Vec<Milestone>> {
        let milestones = self.milestone_repository.get_for_goal(goal_id)?;
        let surpassed = Self::newly_surpassed(&milestones, current_balance);
        if surpassed.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            "Settling {} milestone(s) for goal {} at balance {}",
            surpassed.len(),
            goal_id,
            current_balance
        );

        let mut settled = Vec::with_capacity(surpassed.len());
        let mut failed = 0usize;
        for milestone in surpassed {
            let milestone_id = milestone.id;
            let stamped = Milestone {
                date_met: Some(settled_at),
                ..milestone
            };
            match self.milestone_repository.update(milestone_id, stamped).await {
                Ok(Some(updated)) => settled.push(updated),
                Ok(None) => {
                    warn!("Milestone {} vanished during settlement", milestone_id);
                    failed += 1;
                }
                Err(e) => {
                    warn!("Failed to settle milestone {}: {}", milestone_id, e);
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            return Err(MilestoneError::SettlementIncomplete {
                goal_id,
                settled: settled.len(),
                failed,
            }
            .into());
        }
        Ok(settled)
    }
}
