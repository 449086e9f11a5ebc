//! Cross-crate integration tests.

pub mod concurrency;
pub mod fault_injection;
pub mod replay;
