//! Fixity Core Types
//!
//! This crate provides the foundational types used throughout the constraint subsystem:
//! - Identity types (NodeId, ConstraintTag, HypothesisTag, PatternTag, FrameId)
//! - Degree-of-freedom references (DofRef)
//! - The node catalog collaborator used to validate constraint construction
//! - Common model validation errors

mod catalog;
mod error;
mod id;

pub use catalog::*;
pub use error::*;
pub use id::*;
