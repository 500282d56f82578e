//! Balance helpers computed by replaying a goal's ledger.
//!
//! Amounts travel as `f64` on the models; the arithmetic here is done in
//! `Decimal` so sums like `0.3 - 0.1` compare equal to `0.2`.

use rust_decimal::Decimal;

use super::transactions_model::Transaction;
use crate::errors::{Error, Result};

/// Money posted to and withdrawn from a single goal.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LedgerSummary {
    pub posted: Decimal,
    pub withdrawn: Decimal,
}

impl LedgerSummary {
    pub fn balance(&self) -> Decimal {
        self.posted - self.withdrawn
    }
}

/// Decimal value of a ledger amount or target. `None` for NaN, infinities and
/// values outside the `Decimal` range.
pub fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::try_from(value).ok()
}

/// Splits the goal's transactions into posted and withdrawn totals.
///
/// `transactions` is expected to be the goal's own history, i.e. rows where
/// the goal is either the source or the target.
pub fn summarize(goal_id: i32, transactions: &[Transaction]) -> Result<LedgerSummary> {
    transactions
        .iter()
        .try_fold(LedgerSummary::default(), |mut summary, transaction| {
            let amount = to_decimal(transaction.amount).ok_or_else(|| {
                Error::Unexpected(format!(
                    "transaction {} holds an unusable amount {}",
                    transaction.id, transaction.amount
                ))
            })?;
            if transaction.is_withdrawn_from(goal_id) {
                summary.withdrawn += amount;
            } else {
                summary.posted += amount;
            }
            Ok(summary)
        })
}

pub fn goal_balance(goal_id: i32, transactions: &[Transaction]) -> Result<Decimal> {
    Ok(summarize(goal_id, transactions)?.balance())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn tx(id: i32, amount: f64, source: Option<i32>, target: Option<i32>) -> Transaction {
        Transaction {
            id,
            amount,
            source_goal_id: source,
            target_goal_id: target,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn empty_ledger_has_zero_balance() {
        assert_eq!(summarize(1, &[]).unwrap(), LedgerSummary::default());
        assert_eq!(goal_balance(1, &[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn deposits_transfers_and_withdrawals() {
        let history = vec![
            tx(1, 600.0, None, Some(1)),
            tx(2, 150.0, Some(1), None),
            tx(3, 50.0, Some(2), Some(1)),
            tx(4, 100.0, Some(1), Some(2)),
        ];

        let summary = summarize(1, &history).unwrap();
        assert_eq!(summary.posted, dec!(650));
        assert_eq!(summary.withdrawn, dec!(250));
        assert_eq!(goal_balance(1, &history).unwrap(), dec!(400));
    }

    #[test]
    fn deposit_minus_withdrawal() {
        let history = vec![tx(1, 45.0, None, Some(3)), tx(2, 30.0, Some(3), None)];
        assert_eq!(goal_balance(3, &history).unwrap(), dec!(15));
    }

    #[test]
    fn fractional_amounts_sum_exactly() {
        let history = vec![tx(1, 0.3, None, Some(1)), tx(2, 0.1, Some(1), None)];
        assert_eq!(goal_balance(1, &history).unwrap(), dec!(0.2));
        assert_eq!(to_decimal(0.2), Some(dec!(0.2)));
    }

    #[test]
    fn non_finite_amounts_are_unusable() {
        assert_eq!(to_decimal(f64::INFINITY), None);
        assert_eq!(to_decimal(f64::NAN), None);
        assert!(goal_balance(1, &[tx(1, f64::INFINITY, None, Some(1))]).is_err());
    }
}
