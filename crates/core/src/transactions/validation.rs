use rust_decimal::Decimal;

use super::ledger::to_decimal;
use super::transactions_errors::TransactionError;
use super::transactions_model::NewTransaction;

/// Structural checks on a proposed transaction. Ownership is checked separately.
///
/// The checks run in a fixed order and the first failure is returned.
pub fn validate_transaction(
    transaction: Option<&NewTransaction>,
    target_goal_id: Option<i32>,
) -> Result<(), TransactionError> {
    let transaction = transaction.ok_or(TransactionError::NullTransaction)?;

    // Non-finite amounts have no decimal value and fail here too
    let amount = to_decimal(transaction.amount).unwrap_or(Decimal::ZERO);
    if amount <= Decimal::ZERO {
        return Err(TransactionError::InvalidAmount(transaction.amount));
    }

    match (transaction.source_goal_id, target_goal_id) {
        (None, None) => Err(TransactionError::MissingEndpoint),
        (Some(source), Some(target)) if source == target => {
            Err(TransactionError::SameEndpoint(source))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_tx(amount: f64, source: Option<i32>) -> NewTransaction {
        NewTransaction {
            amount,
            source_goal_id: source,
            timestamp: None,
        }
    }

    #[test]
    fn rejects_missing_transaction() {
        assert!(matches!(
            validate_transaction(None, Some(1)),
            Err(TransactionError::NullTransaction)
        ));
    }

    #[test]
    fn rejects_unusable_amount_before_endpoints() {
        for amount in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e40] {
            assert!(matches!(
                validate_transaction(Some(&new_tx(amount, None)), None),
                Err(TransactionError::InvalidAmount(_))
            ));
        }
    }

    #[test]
    fn rejects_missing_and_identical_endpoints() {
        assert!(matches!(
            validate_transaction(Some(&new_tx(10.0, None)), None),
            Err(TransactionError::MissingEndpoint)
        ));
        assert!(matches!(
            validate_transaction(Some(&new_tx(10.0, Some(4))), Some(4)),
            Err(TransactionError::SameEndpoint(4))
        ));
    }

    #[test]
    fn accepts_deposit_withdrawal_and_transfer() {
        assert!(validate_transaction(Some(&new_tx(10.0, None)), Some(1)).is_ok());
        assert!(validate_transaction(Some(&new_tx(10.0, Some(1))), None).is_ok());
        assert!(validate_transaction(Some(&new_tx(10.0, Some(1))), Some(2)).is_ok());
    }
}
