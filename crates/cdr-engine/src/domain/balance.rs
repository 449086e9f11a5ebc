//! # Balance Arithmetic
//!
//! Pure computation of a transaction's effect on an item balance.
//!
//! | Kind | New balance |
//! |------|-------------|
//! | `Receive` | `B + Q` |
//! | `Administer` / `Waste` / `Move` | `B - Q` |
//! | `Check` | `Q` (the physical count replaces the balance) |
//!
//! Deductions that would go below zero are rejected: a negative recorded
//! balance of a controlled substance is unrepresentable here, and the
//! shortfall is reported so the operator sees what is actually left.

use super::errors::EngineError;
use cdr_types::TransactionKind;

/// Result of applying a transaction to a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceChange {
    pub new_balance: u32,
    /// Signed effect; for `Check` this is counted minus recorded.
    pub delta: i64,
}

/// Compute the balance after applying `kind` × `quantity` to `current`.
pub fn apply(
    kind: TransactionKind,
    current: u32,
    quantity: u32,
) -> Result<BalanceChange, EngineError> {
    match kind {
        TransactionKind::Receive => {
            let new_balance = current.checked_add(quantity).ok_or(
                EngineError::QuantityOutOfRange { kind, quantity },
            )?;
            Ok(BalanceChange {
                new_balance,
                delta: i64::from(quantity),
            })
        }
        TransactionKind::Administer | TransactionKind::Waste | TransactionKind::Move => {
            let new_balance =
                current
                    .checked_sub(quantity)
                    .ok_or(EngineError::InsufficientStock {
                        requested: quantity,
                        available: current,
                    })?;
            Ok(BalanceChange {
                new_balance,
                delta: -i64::from(quantity),
            })
        }
        TransactionKind::Check => Ok(BalanceChange {
            new_balance: quantity,
            delta: i64::from(quantity) - i64::from(current),
        }),
    }
}
