//! Sending and receiving a domain's constraint state.

use fixity_core::FrameId;
use fixity_exchange::{recv_self, send_self, Channel, PeerTag, RecvReport};
use tracing::{info, warn};

use crate::domain::Domain;
use crate::error::DomainResult;

/// Outcome of receiving a domain's state: one report per frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateReport {
    pub constraints: RecvReport,
    pub hypotheses: RecvReport,
}

impl StateReport {
    pub fn failed_count(&self) -> usize {
        self.constraints.failed_count() + self.hypotheses.failed_count()
    }

    pub fn is_complete(&self) -> bool {
        self.constraints.is_complete() && self.hypotheses.is_complete()
    }
}

impl Domain {
    /// Send the container frame, then the registry frame, to `destination`.
    ///
    /// Nodes are not sent; the receiving partition owns its own node table.
    pub fn send_state<C>(&self, channel: &mut C, destination: PeerTag) -> DomainResult<[FrameId; 2]>
    where
        C: Channel + ?Sized,
    {
        let constraints = send_self(&self.constraints, channel, destination)?;
        let hypotheses = send_self(&self.hypotheses, channel, destination)?;
        info!(
            domain = self.tag(),
            peer = %destination,
            constraints = self.constraints.len(),
            hypotheses = self.hypotheses.len(),
            "domain state sent"
        );
        Ok([constraints, hypotheses])
    }

    /// Receive the two frames written by [`Domain::send_state`] from `source`.
    ///
    /// A protocol error on either frame is returned as `Err`; entries that could
    /// not be rebuilt are in the report.
    pub fn recv_state<C>(&mut self, channel: &mut C, source: PeerTag) -> DomainResult<StateReport>
    where
        C: Channel + ?Sized,
    {
        let constraints = recv_self(&mut self.constraints, channel, source)?;
        let hypotheses = recv_self(&mut self.hypotheses, channel, source)?;
        let report = StateReport {
            constraints,
            hypotheses,
        };

        if report.is_complete() {
            info!(domain = self.tag(), peer = %source, "domain state received");
        } else {
            warn!(
                domain = self.tag(),
                peer = %source,
                failed = report.failed_count(),
                "domain state received with failures"
            );
        }
        Ok(report)
    }
}
