//! Transactions module - the goal ledger, validation and posting.

mod goal_locks;
mod ledger;
mod transactions_errors;
mod transactions_model;
mod transactions_service;
mod transactions_traits;
mod validation;

pub use goal_locks::{GoalLockGuard, GoalLocks};
pub use ledger::{goal_balance, summarize, to_decimal, LedgerSummary};
pub use transactions_errors::TransactionError;
pub use transactions_model::{NewTransaction, Transaction};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
pub use validation::validate_transaction;
