use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;

use super::goal_locks::GoalLocks;
use super::ledger::{goal_balance, to_decimal};
use super::transactions_errors::TransactionError;
use super::transactions_model::{NewTransaction, Transaction};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use super::validation::validate_transaction;
use crate::constants::MIN_USER_ID;
use crate::errors::{Error, Result};
use crate::goals::GoalRepositoryTrait;
use crate::milestones::{Milestone, MilestoneRepositoryTrait, MilestoneSettlement};

/// Posts ledger entries and settles the milestones they unlock.
pub struct TransactionService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    settlement: MilestoneSettlement,
    goal_locks: GoalLocks,
}

impl TransactionService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        milestone_repository: Arc<dyn MilestoneRepositoryTrait>,
    ) -> Self {
        TransactionService {
            transaction_repository,
            goal_repository,
            settlement: MilestoneSettlement::new(milestone_repository),
            goal_locks: GoalLocks::new(),
        }
    }

    /// Balance from the persisted history only.
    fn replay_balance(&self, goal_id: i32) -> Result<Decimal> {
        let history = self
            .transaction_repository
            .get_transactions_for_goal(goal_id)?;
        goal_balance(goal_id, &history)
    }

    /// Every referenced goal must be in the user's goal collection.
    fn ensure_goals_owned_by(&self, user_id: i32, goal_ids: &[i32]) -> Result<()> {
        if user_id < MIN_USER_ID {
            return Err(TransactionError::InvalidUser(user_id).into());
        }
        let owned: HashSet<i32> = self
            .goal_repository
            .get_goals_for_user(user_id)?
            .iter()
            .map(|g| g.id)
            .collect();
        if goal_ids.iter().all(|id| owned.contains(id)) {
            Ok(())
        } else {
            Err(TransactionError::ForeignGoal(user_id).into())
        }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transactions_for_goal(&self, goal_id: i32) -> Result<Vec<Transaction>> {
        let mut transactions = self
            .transaction_repository
            .get_transactions_for_goal(goal_id)?;
        transactions.sort_by_key(|t| t.id);
        Ok(transactions)
    }

    fn get_all_transactions_for_user(&self, user_id: i32) -> Result<Vec<Transaction>> {
        let mut transactions = self
            .transaction_repository
            .get_transactions_for_user(user_id)?;
        transactions.sort_by_key(|t| t.id);
        Ok(transactions)
    }

    async fn create_transaction(
        &self,
        user_id: i32,
        new_transaction: Option<NewTransaction>,
        target_goal_id: Option<i32>,
    ) -> Result<Transaction> {
        validate_transaction(new_transaction.as_ref(), target_goal_id)?;
        let Some(new_transaction) = new_transaction else {
            return Err(TransactionError::NullTransaction.into());
        };

        let source_goal_id = new_transaction.source_goal_id;
        let referenced: Vec<i32> = source_goal_id.into_iter().chain(target_goal_id).collect();
        self.ensure_goals_owned_by(user_id, &referenced)?;

        // Held until settlement has finished
        let _guard = self.goal_locks.acquire(referenced.iter().copied()).await;

        let amount = to_decimal(new_transaction.amount)
            .ok_or(TransactionError::InvalidAmount(new_transaction.amount))?;
        let settle_target = match (source_goal_id, target_goal_id) {
            (Some(source), None) => {
                let available = self.replay_balance(source)?;
                if available < amount {
                    return Err(TransactionError::InsufficientFunds {
                        goal_id: source,
                        available: available.to_f64().unwrap_or_default(),
                        requested: new_transaction.amount,
                    }
                    .into());
                }
                None
            }
            (_, Some(target)) => Some((target, self.replay_balance(target)?)),
            (None, None) => return Err(TransactionError::MissingEndpoint.into()),
        };

        let new_transaction = NewTransaction {
            timestamp: Some(new_transaction.timestamp.unwrap_or_else(Utc::now)),
            ..new_transaction
        };
        debug!(
            "Posting {} from {:?} to {:?} for user {}",
            amount, source_goal_id, target_goal_id, user_id
        );
        let created = self
            .transaction_repository
            .create(new_transaction, target_goal_id)
            .await?
            .ok_or_else(|| {
                Error::PersistenceFailure(format!("transaction for user {} was not created", user_id))
            })?;

        if let Some((target, previous_balance)) = settle_target {
            let balance = previous_balance + amount;
            match self.settlement.settle(target, balance, created.timestamp).await {
                Ok(settled) if !settled.is_empty() => {
                    debug!("Transaction {} settled {} milestone(s)", created.id, settled.len())
                }
                Ok(_) => {}
                Err(e) => warn!(
                    "Transaction {} was posted but milestones of goal {} are stale: {}",
                    created.id, target, e
                ),
            }
        }

        Ok(created)
    }

    async fn withdraw(&self, user_id: i32, amount: f64, goal_id: i32) -> Result<Transaction> {
        let transaction = NewTransaction::new(amount, Some(goal_id), Utc::now());
        self.create_transaction(user_id, Some(transaction), None)
            .await
    }

    async fn deposit(&self, user_id: i32, amount: f64, goal_id: i32) -> Result<Transaction> {
        let transaction = NewTransaction::new(amount, None, Utc::now());
        self.create_transaction(user_id, Some(transaction), Some(goal_id))
            .await
    }

    async fn reverse_transaction(&self, transaction_id: i32) -> Result<Transaction> {
        Err(Error::NotImplemented(format!(
            "reversal of transaction {}",
            transaction_id
        )))
    }

    fn get_goal_balance(&self, goal_id: i32) -> Result<Decimal> {
        self.replay_balance(goal_id)
    }

    async fn settle_goal(&self, goal_id: i32) -> Result<Vec<Milestone>> {
        let _guard = self.goal_locks.acquire([goal_id]).await;
        let balance = self.replay_balance(goal_id)?;
        debug!("Re-settling goal {} at balance {}", goal_id, balance);
        self.settlement.settle(goal_id, balance, Utc::now()).await
    }
}
