//! Block and payload (de)serialization helpers.
//!
//! Every block of a frame is encoded with the same bincode options: fixed-width
//! little-endian integers and a size limit taken from [`ExchangeConfig`]. Payload
//! decoding additionally rejects trailing bytes so a payload cannot silently
//! carry data its reader ignores.

use std::io::{ErrorKind as IoErrorKind, Read, Write};

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ExchangeConfig;
use crate::error::{ExchangeError, ExchangeResult};

fn options(limit: u64) -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .with_limit(limit)
}

pub(crate) fn map_error(err: bincode::Error, limit: u64) -> ExchangeError {
    match *err {
        bincode::ErrorKind::Io(ref io) if io.kind() == IoErrorKind::UnexpectedEof => {
            ExchangeError::truncated(io.to_string())
        }
        bincode::ErrorKind::Io(ref io) => ExchangeError::codec(io.to_string()),
        bincode::ErrorKind::SizeLimit => ExchangeError::Oversized { limit },
        ref other => ExchangeError::codec(other.to_string()),
    }
}

/// Append one block to `out`.
pub(crate) fn write_block<T, W>(out: W, value: &T, limit: u64) -> ExchangeResult<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    options(limit)
        .serialize_into(out, value)
        .map_err(|e| map_error(e, limit))
}

/// Read the next block from `reader`.
pub(crate) fn read_block<T, R>(reader: R, limit: u64) -> ExchangeResult<T>
where
    T: DeserializeOwned,
    R: Read,
{
    options(limit)
        .deserialize_from(reader)
        .map_err(|e| map_error(e, limit))
}

/// Encode a single object payload.
pub fn encode_payload<T: Serialize>(value: &T, config: &ExchangeConfig) -> ExchangeResult<Vec<u8>> {
    let limit = config.max_frame_bytes;
    options(limit)
        .serialize(value)
        .map_err(|e| map_error(e, limit))
}

/// Decode a single object payload; the whole slice must be consumed.
pub fn decode_payload<T: DeserializeOwned>(
    bytes: &[u8],
    config: &ExchangeConfig,
) -> ExchangeResult<T> {
    let limit = config.max_frame_bytes;
    options(limit)
        .reject_trailing_bytes()
        .deserialize(bytes)
        .map_err(|e| map_error(e, limit))
}
