//! # Proposal Type-State
//!
//! Compile-time enforcement of the transaction state machine. Each state
//! is a distinct type and every transition consumes `self`, so an
//! unwitnessed proposal cannot reach `commit` for a gated transaction,
//! and no proposal can be committed twice.
//!
//! ## State Machine
//!
//! ```text
//! [Drafted] ──propose──→ [AwaitingWitness] ──attach_witness──→ [Witnessed]
//!     │                                                            │
//!     │ (witness not required)                                     │ validate
//!     └──────────────────────────────→ [Validated] ←───────────────┘
//! ```
//!
//! Cancellation is free at every pre-commit state: dropping the proposal
//! abandons it and nothing has been mutated. In particular an operator
//! closing the witness PIN dialog simply drops the
//! `Proposal<AwaitingWitness>`.

use super::errors::EngineError;
use cdr_types::{Actor, ItemId, TransactionKind, WitnessAssertion};
use chrono::NaiveDate;
use std::marker::PhantomData;

// =============================================================================
// STATE MARKERS (Zero-Sized Types)
// =============================================================================

/// Marker: drafted by the operator, not yet validated.
#[derive(Debug, Clone, Copy)]
pub struct Drafted;

/// Marker: gating requires a witness that has not been attached yet.
#[derive(Debug, Clone, Copy)]
pub struct AwaitingWitness;

/// Marker: a witness assertion is attached, pending validation.
#[derive(Debug, Clone, Copy)]
pub struct Witnessed;

/// Marker: cleared for commit.
#[derive(Debug, Clone, Copy)]
pub struct Validated;

// =============================================================================
// TYPE-STATE PROPOSAL
// =============================================================================

/// A proposed stock movement with compile-time enforced state.
#[derive(Debug)]
pub struct Proposal<S> {
    pub(crate) item_id: ItemId,
    pub(crate) kind: TransactionKind,
    pub(crate) quantity: u32,
    pub(crate) actor: Actor,
    pub(crate) notes: Option<String>,
    pub(crate) batch_number: Option<String>,
    pub(crate) expiry_date: Option<NaiveDate>,
    pub(crate) witness: Option<WitnessAssertion>,
    _state: PhantomData<S>,
}

impl<S> Proposal<S> {
    fn into_state<T>(self) -> Proposal<T> {
        Proposal {
            item_id: self.item_id,
            kind: self.kind,
            quantity: self.quantity,
            actor: self.actor,
            notes: self.notes,
            batch_number: self.batch_number,
            expiry_date: self.expiry_date,
            witness: self.witness,
            _state: PhantomData,
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }
}

impl Proposal<Drafted> {
    /// Draft a proposal. This is the only entry point for creating one.
    pub fn new(item_id: ItemId, kind: TransactionKind, quantity: u32, actor: Actor) -> Self {
        Self {
            item_id,
            kind,
            quantity,
            actor,
            notes: None,
            batch_number: None,
            expiry_date: None,
            witness: None,
            _state: PhantomData,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Record batch and expiry details; meaningful for `Receive` only.
    pub fn with_batch(mut self, batch_number: impl Into<String>, expiry: Option<NaiveDate>) -> Self {
        self.batch_number = Some(batch_number.into());
        self.expiry_date = expiry;
        self
    }

    pub(crate) fn awaiting_witness(self) -> Proposal<AwaitingWitness> {
        self.into_state()
    }

    pub(crate) fn validated(self) -> Proposal<Validated> {
        self.into_state()
    }
}

impl Proposal<AwaitingWitness> {
    /// Attach a witness assertion, consuming both.
    ///
    /// The assertion cannot be reused: it is moved into this proposal and
    /// a second transaction would need a fresh PIN verification.
    #[must_use = "the witnessed proposal must be validated and committed"]
    pub fn attach_witness(mut self, assertion: WitnessAssertion) -> Proposal<Witnessed> {
        self.witness = Some(assertion);
        self.into_state()
    }
}

impl Proposal<Witnessed> {
    /// Confirm the attached witness is acceptable for this proposal.
    ///
    /// Two-person integrity means two people: an assertion naming the
    /// acting user is refused.
    pub fn validate(self) -> Result<Proposal<Validated>, EngineError> {
        // Unreachable through the public API; kept as a guard.
        let Some(assertion) = &self.witness else {
            return Err(EngineError::WitnessRequired);
        };
        if assertion.witness_id() == self.actor.id {
            return Err(EngineError::InvalidWitness {
                reason: "witness and acting user must be different people".to_string(),
            });
        }
        Ok(self.into_state())
    }
}

impl Proposal<Validated> {
    /// Witness display name, when one was attached.
    pub fn witness_name(&self) -> Option<&str> {
        self.witness.as_ref().map(|w| w.witness_name())
    }
}

/// What `propose` hands back: either cleared for commit, or parked until
/// a witness verifies.
#[derive(Debug)]
pub enum ProposalStage {
    AwaitingWitness(Proposal<AwaitingWitness>),
    Validated(Proposal<Validated>),
}

impl ProposalStage {
    /// Expect the proposal to be cleared without a witness.
    ///
    /// Fails with [`EngineError::WitnessRequired`] when the gating policy
    /// parked it awaiting one. The caller either supplies a witness via
    /// [`Proposal::attach_witness`] or abandons the transaction.
    pub fn validated(self) -> Result<Proposal<Validated>, EngineError> {
        match self {
            Self::Validated(proposal) => Ok(proposal),
            Self::AwaitingWitness(_) => Err(EngineError::WitnessRequired),
        }
    }
}
