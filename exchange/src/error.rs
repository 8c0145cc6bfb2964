//! Exchange error types.

use crate::channel::PeerTag;
use crate::manifest::FrameKind;
use thiserror::Error;

/// Protocol and transport errors. Any of these is fatal for the frame being read.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// IO error on a stream channel.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The frame ended before a block was complete.
    #[error("truncated frame: {message}")]
    Truncated { message: String },

    /// A block's length disagrees with the manifest's entry count.
    #[error("manifest declares {declared} entries but the {block} block holds {actual}")]
    CountMismatch {
        block: &'static str,
        declared: u64,
        actual: usize,
    },

    /// Manifest kind word is not the one the receiver expects.
    #[error("unexpected frame kind: expected {expected}, got code {actual}")]
    WrongKind { expected: FrameKind, actual: u64 },

    /// Manifest kind word is not a known frame kind.
    #[error("unknown frame kind code {0}")]
    UnknownKind(u64),

    /// Manifest tag counter leaves the receiver unable to issue another tag.
    #[error("manifest tag counter {next_tag} is out of range")]
    TagCounterOutOfRange { next_tag: u64 },

    /// Bytes remain after the trailer.
    #[error("{0} trailing bytes after frame trailer")]
    TrailingBytes(usize),

    /// Frame or payload exceeds the configured size limit.
    #[error("frame exceeds size limit of {limit} bytes")]
    Oversized { limit: u64 },

    /// A label exceeds the configured maximum length.
    #[error("label of {len} bytes exceeds limit of {limit}")]
    LabelTooLong { len: usize, limit: usize },

    /// Payload could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(String),

    /// No frame is waiting for this peer.
    #[error("no frame available from {0}")]
    EmptyMailbox(PeerTag),

    /// A stream frame was addressed to a different peer.
    #[error("frame addressed to {actual}, expected {expected}")]
    PeerMismatch { expected: PeerTag, actual: PeerTag },
}

impl ExchangeError {
    pub fn truncated(message: impl Into<String>) -> Self {
        Self::Truncated {
            message: message.into(),
        }
    }

    pub fn count_mismatch(block: &'static str, declared: u64, actual: usize) -> Self {
        Self::CountMismatch {
            block,
            declared,
            actual,
        }
    }

    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec(message.into())
    }
}

/// Result type for exchange operations.
pub type ExchangeResult<T> = Result<T, ExchangeError>;
