//! Saver Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for savings goals: goal lifecycle
//! rules, milestone settlement and the goal ledger. It is database-agnostic
//! and defines repository traits that are implemented by the `storage-sqlite`
//! crate (or by in-memory doubles in tests).

pub mod constants;
pub mod errors;
pub mod goals;
pub mod milestones;
pub mod transactions;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
