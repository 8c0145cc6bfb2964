//! Fixity Tests
//!
//! Fixtures and assertion helpers shared by the integration tests under `tests/`.

pub mod assertion;
pub mod fixtures;

pub mod prelude {
    pub use crate::assertion::{assert_same_entries, Counts};
    pub use crate::fixtures::{
        grid_nodes, mixed_container, random_single_freedom, registry_with, GRID_NDOF,
    };

    pub use fixity_constraint::{
        entry_label, Constraint, ConstraintContainer, ConstraintKind, MultiFreedom,
        MultiRetained, RetainedBlock, SingleFreedom,
    };
    pub use fixity_core::{
        ConstraintTag, DofRef, HypothesisTag, ModelError, NodeCatalog, NodeId, NodeTable,
        PatternTag,
    };
    pub use fixity_domain::{Domain, StateReport};
    pub use fixity_exchange::{
        decode_nested, encode_nested, encode_payload, recv_self, send_self, Channel, Exchange,
        ExchangeConfig, ExchangeError, FrameBody, FrameKind, MemoryChannel, PeerTag, RecvReport,
        StreamChannel,
    };
    pub use fixity_hypothesis::{Hypothesis, HypothesisRegistry};
}
