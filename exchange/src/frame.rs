//! Frame body: manifest, label block, payload block and trailer.
//!
//! Wire order is manifest, then (only when `n > 0`) the label block and the
//! payload block, then the trailer. Label `i` names payload `i`; the body keeps
//! both blocks the same length at all times so the pairing cannot drift.

use fixity_core::can_issue_tag;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::{decode_payload, encode_payload, read_block, write_block};
use crate::config::ExchangeConfig;
use crate::error::{ExchangeError, ExchangeResult};
use crate::manifest::{FrameKind, Manifest, MANIFEST_WORDS};

/// Decoded content of one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBody {
    kind: FrameKind,
    owner_tag: u64,
    next_tag: u64,
    labels: Vec<String>,
    payloads: Vec<Vec<u8>>,
    trailer: Vec<u8>,
}

impl FrameBody {
    /// Create an empty body for an object of `kind`.
    pub fn new(kind: FrameKind, owner_tag: u64, next_tag: u64) -> Self {
        Self {
            kind,
            owner_tag,
            next_tag,
            labels: Vec::new(),
            payloads: Vec::new(),
            trailer: Vec::new(),
        }
    }

    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    pub fn owner_tag(&self) -> u64 {
        self.owner_tag
    }

    pub fn next_tag(&self) -> u64 {
        self.next_tag
    }

    /// The manifest describing this body, computed from its current content.
    pub fn manifest(&self) -> Manifest {
        Manifest::new(
            self.kind,
            self.owner_tag,
            self.labels.len() as u64,
            self.next_tag,
        )
    }

    /// Append a label and its payload at the same index.
    pub fn push_entry(&mut self, label: impl Into<String>, payload: Vec<u8>) {
        self.labels.push(label.into());
        self.payloads.push(payload);
    }

    /// Number of label/payload pairs.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate `(index, label, payload)` in wire order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &str, &[u8])> {
        self.labels
            .iter()
            .zip(&self.payloads)
            .enumerate()
            .map(|(i, (label, payload))| (i, label.as_str(), payload.as_slice()))
    }

    pub fn trailer(&self) -> &[u8] {
        &self.trailer
    }

    pub fn set_trailer(&mut self, trailer: Vec<u8>) {
        self.trailer = trailer;
    }

    /// Encode `value` as the trailer.
    pub fn set_trailer_value<T: Serialize>(
        &mut self,
        value: &T,
        config: &ExchangeConfig,
    ) -> ExchangeResult<()> {
        self.trailer = encode_payload(value, config)?;
        Ok(())
    }

    /// Decode the trailer as `T`.
    pub fn trailer_value<T: DeserializeOwned>(&self, config: &ExchangeConfig) -> ExchangeResult<T> {
        decode_payload(&self.trailer, config)
    }

    /// Fail unless this body carries `expected`.
    pub fn expect_kind(&self, expected: FrameKind) -> ExchangeResult<()> {
        if self.kind != expected {
            return Err(ExchangeError::WrongKind {
                expected,
                actual: self.kind.code(),
            });
        }
        Ok(())
    }

    /// Encode to the wire layout.
    pub fn encode(&self, config: &ExchangeConfig) -> ExchangeResult<Vec<u8>> {
        let limit = config.max_frame_bytes;
        let mut out = Vec::new();

        write_block(&mut out, &self.manifest().to_words(), limit)?;
        if !self.labels.is_empty() {
            for label in &self.labels {
                check_label(label, config)?;
            }
            write_block(&mut out, &self.labels, limit)?;
            write_block(&mut out, &self.payloads, limit)?;
        }
        write_block(&mut out, &self.trailer, limit)?;

        if out.len() as u64 > limit {
            return Err(ExchangeError::Oversized { limit });
        }
        Ok(out)
    }

    /// Decode from the wire layout. The slice must hold exactly one frame.
    pub fn decode(bytes: &[u8], config: &ExchangeConfig) -> ExchangeResult<Self> {
        let limit = config.max_frame_bytes;
        if bytes.len() as u64 > limit {
            return Err(ExchangeError::Oversized { limit });
        }

        let mut reader = bytes;
        let words: [u64; MANIFEST_WORDS] = read_block(&mut reader, limit)?;
        let manifest = Manifest::from_words(words);
        let kind = manifest
            .frame_kind()
            .ok_or(ExchangeError::UnknownKind(manifest.kind))?;
        if !can_issue_tag(manifest.next_tag) {
            return Err(ExchangeError::TagCounterOutOfRange {
                next_tag: manifest.next_tag,
            });
        }

        let (labels, payloads) = if manifest.count > 0 {
            let labels: Vec<String> = read_block(&mut reader, limit)?;
            if labels.len() as u64 != manifest.count {
                return Err(ExchangeError::count_mismatch(
                    "label",
                    manifest.count,
                    labels.len(),
                ));
            }
            for label in &labels {
                check_label(label, config)?;
            }

            let payloads: Vec<Vec<u8>> = read_block(&mut reader, limit)?;
            if payloads.len() as u64 != manifest.count {
                return Err(ExchangeError::count_mismatch(
                    "payload",
                    manifest.count,
                    payloads.len(),
                ));
            }
            (labels, payloads)
        } else {
            (Vec::new(), Vec::new())
        };

        let trailer: Vec<u8> = read_block(&mut reader, limit)?;
        if !reader.is_empty() {
            return Err(ExchangeError::TrailingBytes(reader.len()));
        }

        Ok(Self {
            kind,
            owner_tag: manifest.owner_tag,
            next_tag: manifest.next_tag,
            labels,
            payloads,
            trailer,
        })
    }
}

fn check_label(label: &str, config: &ExchangeConfig) -> ExchangeResult<()> {
    if label.len() > config.max_label_len {
        return Err(ExchangeError::LabelTooLong {
            len: label.len(),
            limit: config.max_label_len,
        });
    }
    Ok(())
}
