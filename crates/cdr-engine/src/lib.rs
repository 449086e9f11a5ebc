//! # cdr-engine
//!
//! Transaction engine for the CD Register.
//!
//! ## Role in System
//!
//! Validates a proposed stock movement against the witness policy,
//! computes the new balance, and commits the balance mutation, the
//! register transaction, and the compliance audit entry as one logical
//! unit.
//!
//! ## State Machine
//!
//! ```text
//! [Drafted] ──propose──→ [AwaitingWitness] ──attach_witness──→ [Witnessed]
//!     │                         │                                   │
//!     │ (no witness needed)     │ drop = cancelled,                 │ validate
//!     │                         │ nothing mutated                   ▼
//!     └────────────────────────────────────────────────────→ [Validated]
//!                                                                   │ commit
//!                                                                   ▼
//!                                                             [Committed]
//! ```
//!
//! Each transition consumes the proposal, so a proposal cannot be
//! committed twice and a gated proposal cannot reach `commit` without a
//! witness. Abandoning a proposal before `commit` is simply dropping it:
//! no state has been touched. `commit` is the point of no return.
//!
//! ## Concurrency
//!
//! Commits on one item are serialized by optimistic concurrency: the
//! engine reads the item's version, computes, and commits conditioned on
//! that version, retrying (bounded) when a concurrent transaction got
//! there first. Lost updates are impossible; `balance_after` always
//! reflects commit order.

pub mod domain;
pub mod service;

pub use domain::{
    gating, AwaitingWitness, BalanceChange, Drafted, EngineError, Proposal, ProposalStage,
    Validated, Witnessed,
};
pub use service::{EngineConfig, TransactionEngine};
