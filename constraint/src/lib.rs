//! Fixity Constraint
//!
//! Kinematic constraints and the container that owns them.
//!
//! Responsibilities:
//! - Model single-freedom, multi-freedom and multi-retained constraints
//! - Reject invalid node/DOF references at construction
//! - Issue monotonically increasing tags shared across all three collections
//! - Track the active load patterns
//! - Produce the linear rows each constraint contributes to the reduced system
//! - Move container state through the exchange protocol

mod constraint;
mod container;
mod exchange;
mod multi;
mod retained;
mod row;
mod single;

pub use constraint::{Constraint, ConstraintKind, ConstraintRef};
pub use container::ConstraintContainer;
pub use exchange::{entry_label, parse_entry_label};
pub use multi::MultiFreedom;
pub use retained::{MultiRetained, RetainedBlock};
pub use row::LinearRow;
pub use single::SingleFreedom;
