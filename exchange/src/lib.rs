//! Fixity Exchange
//!
//! State-exchange protocol for moving constraint state between processes.
//!
//! Responsibilities:
//! - Build a fresh manifest per frame (owner tag, entry count, tag counter)
//! - Keep label and payload blocks positionally paired
//! - Encode blocks byte-exact with a fixed, documented layout
//! - Carry frames over in-memory or byte-stream channels
//! - Report per-entry reconstruction failures without aborting the frame

mod channel;
mod codec;
mod config;
mod error;
mod frame;
mod manifest;
mod movable;
mod report;

pub use channel::{Channel, Frame, MemoryChannel, PeerTag, StreamChannel};
pub use codec::{decode_payload, encode_payload};
pub use config::ExchangeConfig;
pub use error::{ExchangeError, ExchangeResult};
pub use frame::FrameBody;
pub use manifest::{FrameKind, Manifest, MANIFEST_WORDS};
pub use movable::{decode_nested, encode_nested, recv_self, send_self, Exchange};
pub use report::{EntryFailure, RecvReport};
