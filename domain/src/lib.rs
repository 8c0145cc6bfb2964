//! Fixity Domain
//!
//! The owner of one constraint container and one hypothesis registry.
//! Removals go through the domain so its bookkeeping is retracted before
//! anything is dropped.

mod analysis;
mod bookkeeping;
mod domain;
mod error;
mod state;

pub use analysis::AnalysisSet;
pub use bookkeeping::Bookkeeping;
pub use domain::Domain;
pub use error::{DomainError, DomainResult};
pub use state::StateReport;
