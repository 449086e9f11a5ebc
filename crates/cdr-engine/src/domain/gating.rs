//! # Witness Gating Policy
//!
//! Decides whether a transaction is legally valid without an independent
//! witness. Pure and stateless: this function is the single authority for
//! a safeguard that must never be skipped by accident, so it is written
//! to be exhaustively checkable against its truth table.

use cdr_types::{DrugClass, Grade, TransactionKind};

/// The grade at which a clinician may administer unsupervised.
///
/// Actors at or above this grade administer without a witness; actors
/// strictly below it are witnessed regardless of drug classification.
pub const REFERENCE_GRADE: Grade = Grade::Paramedic;

/// Whether a transaction requires an independent witness.
///
/// A witness is mandatory when either:
/// - the item is `Controlled` and the movement destroys or reconciles
///   stock (`Waste`, `Check`), or
/// - the movement is an `Administer` and the acting clinician's grade is
///   strictly below [`REFERENCE_GRADE`].
///
/// `Receive` and `Move` are never gated in the baseline policy.
pub fn requires_witness(class: DrugClass, kind: TransactionKind, actor_grade: Grade) -> bool {
    match kind {
        TransactionKind::Waste | TransactionKind::Check => class == DrugClass::Controlled,
        TransactionKind::Administer => actor_grade < REFERENCE_GRADE,
        TransactionKind::Receive | TransactionKind::Move => false,
    }
}
