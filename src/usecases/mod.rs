//! Use-case layer - Trade admission and quantity search.
//!
//! Business decisions built on top of the domain kernel. Unlike the
//! domain layer these modules emit `tracing` events, since rejections
//! and solver exhaustion are the states operators want visibility into.

pub mod admission;
pub mod solver;

pub use admission::{AdmissionChecker, RejectionReason, TradeDecision};
pub use solver::ShareEstimator;
