//! Transaction repository and service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::transactions_model::{NewTransaction, Transaction};
use crate::errors::Result;
use crate::milestones::Milestone;

/// Trait defining the contract for Transaction repository operations.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_by_id(&self, transaction_id: i32) -> Result<Option<Transaction>>;

    /// Rows where the goal is either the source or the target.
    fn get_transactions_for_goal(&self, goal_id: i32) -> Result<Vec<Transaction>>;

    /// Rows touching any goal owned by the user.
    fn get_transactions_for_user(&self, user_id: i32) -> Result<Vec<Transaction>>;

    /// Persists the transaction with `target_goal_id` as its target endpoint.
    async fn create(
        &self,
        new_transaction: NewTransaction,
        target_goal_id: Option<i32>,
    ) -> Result<Option<Transaction>>;
}

/// Trait defining the contract for Transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transactions_for_goal(&self, goal_id: i32) -> Result<Vec<Transaction>>;

    fn get_all_transactions_for_user(&self, user_id: i32) -> Result<Vec<Transaction>>;

    /// Validates, checks ownership and funds, persists, then settles milestones
    /// of the target goal.
    async fn create_transaction(
        &self,
        user_id: i32,
        new_transaction: Option<NewTransaction>,
        target_goal_id: Option<i32>,
    ) -> Result<Transaction>;

    async fn withdraw(&self, user_id: i32, amount: f64, goal_id: i32) -> Result<Transaction>;

    async fn deposit(&self, user_id: i32, amount: f64, goal_id: i32) -> Result<Transaction>;

    async fn reverse_transaction(&self, transaction_id: i32) -> Result<Transaction>;

    fn get_goal_balance(&self, goal_id: i32) -> Result<Decimal>;

    /// Re-runs settlement at the replayed balance. Safe to call repeatedly.
    async fn settle_goal(&self, goal_id: i32) -> Result<Vec<Milestone>>;
}
