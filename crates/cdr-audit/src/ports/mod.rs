//! Audit ports.

pub mod outbound;

pub use outbound::ComplianceSink;
