//! Database models for ledger rows.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use saver_core::transactions::Transaction;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: i32,
    pub amount: f64,
    pub source_goal_id: Option<i32>,
    pub target_goal_id: Option<i32>,
    pub posted_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransactionDB {
    pub amount: f64,
    pub source_goal_id: Option<i32>,
    pub target_goal_id: Option<i32>,
    pub posted_at: NaiveDateTime,
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        Self {
            id: db.id,
            amount: db.amount,
            source_goal_id: db.source_goal_id,
            target_goal_id: db.target_goal_id,
            timestamp: db.posted_at.and_utc(),
        }
    }
}
