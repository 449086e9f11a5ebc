//! Engine domain: witness gating, balance arithmetic, proposal typestate.

pub mod balance;
pub mod errors;
pub mod gating;
pub mod proposal;

pub use balance::BalanceChange;
pub use errors::EngineError;
pub use proposal::{AwaitingWitness, Drafted, Proposal, ProposalStage, Validated, Witnessed};
