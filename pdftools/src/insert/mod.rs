//! Page insertion.
//!
//! [`planner`] decides the order in which pages are inserted; [`inserter`]
//! runs the `insert` command on real documents.

pub mod inserter;
pub mod planner;

pub use inserter::{InsertResult, Inserter};
pub use planner::{InsertionPlan, InsertionRequest, OutOfRange, pair_requests};
