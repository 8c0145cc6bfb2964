//! Transports for encoded frames.
//!
//! A channel only moves opaque frame bytes and assigns frame identifiers; it
//! never looks inside a frame. Retries and connection recovery belong to the
//! transport, not to the objects being exchanged.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::io::{self, ErrorKind as IoErrorKind, Read, Write};

use fixity_core::FrameId;
use tracing::debug;

use crate::codec::{read_block, write_block};
use crate::config::ExchangeConfig;
use crate::error::{ExchangeError, ExchangeResult};

/// Address of a peer (or mailbox) on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerTag(pub u64);

impl PeerTag {
    pub fn new(tag: u64) -> Self {
        Self(tag)
    }
}

impl fmt::Display for PeerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peer{}", self.0)
    }
}

/// One encoded frame as carried by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Transport-assigned identifier.
    pub id: FrameId,
    /// Encoded frame body.
    pub bytes: Vec<u8>,
}

/// A synchronous frame transport.
///
/// `send` returns once the whole frame has been handed over; `receive` returns
/// a whole frame or an error, never part of one.
pub trait Channel {
    /// Limits used to encode and decode frames on this channel.
    fn config(&self) -> &ExchangeConfig;

    /// Hand a complete frame to the transport.
    fn send(&mut self, bytes: Vec<u8>, destination: PeerTag) -> ExchangeResult<FrameId>;

    /// Take the next complete frame from `source`.
    fn receive(&mut self, source: PeerTag) -> ExchangeResult<Frame>;
}

/// In-process channel: one FIFO mailbox per peer tag.
///
/// `send(bytes, p)` deposits into mailbox `p`; `receive(p)` takes from it.
#[derive(Debug)]
pub struct MemoryChannel {
    config: ExchangeConfig,
    mailboxes: HashMap<PeerTag, VecDeque<Frame>>,
    next_frame_id: u64,
}

impl MemoryChannel {
    /// Create a channel with default limits.
    pub fn new() -> Self {
        Self::with_config(ExchangeConfig::default())
    }

    pub fn with_config(config: ExchangeConfig) -> Self {
        Self {
            config,
            mailboxes: HashMap::new(),
            next_frame_id: 1,
        }
    }

    /// Number of frames waiting in mailbox `peer`.
    pub fn pending(&self, peer: PeerTag) -> usize {
        self.mailboxes.get(&peer).map(VecDeque::len).unwrap_or(0)
    }

    fn alloc_frame_id(&mut self) -> FrameId {
        let id = FrameId::new(self.next_frame_id);
        self.next_frame_id += 1;
        id
    }
}

impl Default for MemoryChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Channel for MemoryChannel {
    fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    fn send(&mut self, bytes: Vec<u8>, destination: PeerTag) -> ExchangeResult<FrameId> {
        let limit = self.config.max_frame_bytes;
        if bytes.len() as u64 > limit {
            return Err(ExchangeError::Oversized { limit });
        }

        let id = self.alloc_frame_id();
        debug!(frame = %id, peer = %destination, bytes = bytes.len(), "frame queued");
        self.mailboxes
            .entry(destination)
            .or_default()
            .push_back(Frame { id, bytes });
        Ok(id)
    }

    fn receive(&mut self, source: PeerTag) -> ExchangeResult<Frame> {
        self.mailboxes
            .get_mut(&source)
            .and_then(VecDeque::pop_front)
            .ok_or(ExchangeError::EmptyMailbox(source))
    }
}

/// Channel over any byte stream (socket, pipe, file, in-memory cursor).
///
/// Each frame is written as a three-word header `[frame id, peer tag, length]`
/// in the same fixed-width little-endian encoding as the frame blocks,
/// followed by the frame bytes.
#[derive(Debug)]
pub struct StreamChannel<S> {
    stream: S,
    config: ExchangeConfig,
    next_frame_id: u64,
}

impl<S: Read + Write> StreamChannel<S> {
    pub fn new(stream: S) -> Self {
        Self::with_config(stream, ExchangeConfig::default())
    }

    pub fn with_config(stream: S, config: ExchangeConfig) -> Self {
        Self {
            stream,
            config,
            next_frame_id: 1,
        }
    }

    /// Get a reference to the underlying stream.
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Get a mutable reference to the underlying stream.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// Consume the channel, returning the stream.
    pub fn into_inner(self) -> S {
        self.stream
    }

    /// Read past the body of a frame that will not be delivered, so the
    /// stream stays positioned on the next header.
    fn skip_body(&mut self, len: u64) -> ExchangeResult<()> {
        let skipped = io::copy(&mut (&mut self.stream).take(len), &mut io::sink())?;
        if skipped < len {
            return Err(ExchangeError::truncated(format!(
                "expected {} frame bytes, stream ended after {}",
                len, skipped
            )));
        }
        Ok(())
    }
}

impl<S: Read + Write> Channel for StreamChannel<S> {
    fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    fn send(&mut self, bytes: Vec<u8>, destination: PeerTag) -> ExchangeResult<FrameId> {
        let limit = self.config.max_frame_bytes;
        if bytes.len() as u64 > limit {
            return Err(ExchangeError::Oversized { limit });
        }

        let id = FrameId::new(self.next_frame_id);
        self.next_frame_id += 1;

        let header = [id.raw(), destination.0, bytes.len() as u64];
        write_block(&mut self.stream, &header, limit)?;
        self.stream.write_all(&bytes)?;
        self.stream.flush()?;

        debug!(frame = %id, peer = %destination, bytes = bytes.len(), "frame written");
        Ok(id)
    }

    fn receive(&mut self, source: PeerTag) -> ExchangeResult<Frame> {
        let limit = self.config.max_frame_bytes;
        let [id, peer, len]: [u64; 3] = read_block(&mut self.stream, limit)?;

        let peer = PeerTag::new(peer);
        let refused = if peer != source {
            Some(ExchangeError::PeerMismatch {
                expected: source,
                actual: peer,
            })
        } else if len > limit {
            Some(ExchangeError::Oversized { limit })
        } else {
            None
        };
        if let Some(err) = refused {
            self.skip_body(len)?;
            debug!(frame = id, peer = %peer, bytes = len, "frame skipped");
            return Err(err);
        }

        let mut bytes = vec![0_u8; len as usize];
        self.stream.read_exact(&mut bytes).map_err(|e| {
            if e.kind() == IoErrorKind::UnexpectedEof {
                ExchangeError::truncated(format!("expected {} frame bytes", len))
            } else {
                ExchangeError::Io(e)
            }
        })?;

        let id = FrameId::new(id);
        debug!(frame = %id, peer = %source, bytes = len, "frame read");
        Ok(Frame { id, bytes })
    }
}
