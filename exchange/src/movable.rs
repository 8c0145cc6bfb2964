//! Objects that can be moved across process boundaries.

use tracing::{debug, error};

use fixity_core::FrameId;

use crate::channel::{Channel, PeerTag};
use crate::config::ExchangeConfig;
use crate::error::ExchangeResult;
use crate::frame::FrameBody;
use crate::manifest::FrameKind;
use crate::report::RecvReport;

/// An object whose state travels as one frame.
///
/// `send_data` must emit entries in a deterministic order; `recv_data` must
/// hydrate entry `i` from payload `i` and report, not abort, on entries it
/// cannot rebuild.
pub trait Exchange {
    /// Kind written to (and expected in) the manifest.
    const KIND: FrameKind;

    /// Build the frame body describing this object.
    fn send_data(&self, config: &ExchangeConfig) -> ExchangeResult<FrameBody>;

    /// Rebuild this object's state from a decoded body of kind [`Self::KIND`].
    fn recv_data(&mut self, body: FrameBody, config: &ExchangeConfig) -> ExchangeResult<RecvReport>;
}

/// Encode `object` and hand it to `channel` as one frame.
pub fn send_self<T, C>(object: &T, channel: &mut C, destination: PeerTag) -> ExchangeResult<FrameId>
where
    T: Exchange + ?Sized,
    C: Channel + ?Sized,
{
    let bytes = encode_nested(object, channel.config())?;
    let id = channel.send(bytes, destination).map_err(|e| {
        error!(kind = %T::KIND, peer = %destination, "failed to send frame: {}", e);
        e
    })?;
    debug!(kind = %T::KIND, frame = %id, peer = %destination, "sent");
    Ok(id)
}

/// Receive one frame from `channel` and rebuild `object` from it.
///
/// Protocol errors are returned as `Err`; per-entry reconstruction failures are
/// in the returned report.
pub fn recv_self<T, C>(
    object: &mut T,
    channel: &mut C,
    source: PeerTag,
) -> ExchangeResult<RecvReport>
where
    T: Exchange + ?Sized,
    C: Channel + ?Sized,
{
    let frame = channel.receive(source)?;
    let config = channel.config().clone();
    let mut report = decode_nested(object, &frame.bytes, &config).map_err(|e| {
        error!(kind = %T::KIND, frame = %frame.id, "failed to receive frame: {}", e);
        e
    })?;
    report.frame = Some(frame.id);
    debug!(
        kind = %T::KIND,
        frame = %frame.id,
        entries = report.entries,
        failed = report.failed_count(),
        "received"
    );
    Ok(report)
}

/// Encode `object` to frame bytes without a transport (used for nested payloads).
pub fn encode_nested<T: Exchange + ?Sized>(
    object: &T,
    config: &ExchangeConfig,
) -> ExchangeResult<Vec<u8>> {
    object.send_data(config)?.encode(config)
}

/// Decode frame bytes into `object` without a transport.
pub fn decode_nested<T: Exchange + ?Sized>(
    object: &mut T,
    bytes: &[u8],
    config: &ExchangeConfig,
) -> ExchangeResult<RecvReport> {
    let body = FrameBody::decode(bytes, config)?;
    body.expect_kind(T::KIND)?;
    object.recv_data(body, config)
}
