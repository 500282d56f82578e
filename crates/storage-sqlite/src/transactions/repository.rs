use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use saver_core::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait};
use saver_core::Result;

use super::model::{NewTransactionDB, TransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{goals, transactions};

/// Ledger rows are append-only; there is no update or delete here.
pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn get_by_id(&self, transaction_id: i32) -> Result<Option<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let row = transactions::table
            .find(transaction_id)
            .select(TransactionDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Transaction::from))
    }

    fn get_transactions_for_goal(&self, goal_id: i32) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions::table
            .filter(
                transactions::source_goal_id
                    .eq(goal_id)
                    .or(transactions::target_goal_id.eq(goal_id)),
            )
            .order(transactions::id.asc())
            .select(TransactionDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    fn get_transactions_for_user(&self, user_id: i32) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        // Soft-deleted goals still belong to the user, so their history is included
        let owned_goals = || {
            goals::table
                .filter(goals::user_id.eq(user_id))
                .select(goals::id.nullable())
        };
        let rows = transactions::table
            .filter(
                transactions::source_goal_id
                    .eq_any(owned_goals())
                    .or(transactions::target_goal_id.eq_any(owned_goals())),
            )
            .order(transactions::id.asc())
            .select(TransactionDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn create(
        &self,
        new_transaction: NewTransaction,
        target_goal_id: Option<i32>,
    ) -> Result<Option<Transaction>> {
        let row = NewTransactionDB {
            amount: new_transaction.amount,
            source_goal_id: new_transaction.source_goal_id,
            target_goal_id,
            posted_at: new_transaction
                .timestamp
                .unwrap_or_else(Utc::now)
                .naive_utc(),
        };
        debug!(
            "Inserting transaction {:?} -> {:?}",
            row.source_goal_id, row.target_goal_id
        );
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Transaction>> {
                let created = diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Some(Transaction::from(created)))
            })
            .await
    }
}
