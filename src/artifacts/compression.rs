//! zlib codec for stored objects
//!
//! Loose objects are written as a single zlib stream holding the framed bytes.

use crate::errors::{BitError, BitResult};
use bytes::Bytes;
use flate2::{Decompress, FlushDecompress, Status};
use std::io::Write;

const INFLATE_CHUNK: usize = 8 * 1024;

pub fn compress(data: &[u8]) -> BitResult<Bytes> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder
        .write_all(data)
        .map_err(BitError::io("Unable to compress object content"))?;

    encoder
        .finish()
        .map(Bytes::from)
        .map_err(BitError::io("Unable to finish compressing object content"))
}

/// Inflate a complete zlib stream
///
/// A stream that ends before its trailer is reported as corrupt instead of
/// yielding the bytes inflated so far.
pub fn decompress(data: &[u8]) -> BitResult<Bytes> {
    let mut inflater = Decompress::new(true);
    let mut inflated = Vec::with_capacity(data.len().saturating_mul(2).max(INFLATE_CHUNK));

    loop {
        if inflated.len() == inflated.capacity() {
            inflated.reserve(INFLATE_CHUNK);
        }

        let progress = (inflater.total_in(), inflater.total_out());
        let remaining = &data[inflater.total_in() as usize..];

        let status = inflater
            .decompress_vec(remaining, &mut inflated, FlushDecompress::None)
            .map_err(|err| BitError::corrupt(format!("invalid zlib stream: {err}")))?;

        match status {
            Status::StreamEnd => break,
            _ if (inflater.total_in(), inflater.total_out()) == progress => {
                return Err(BitError::corrupt("truncated zlib stream"));
            }
            _ => continue,
        }
    }

    Ok(inflated.into())
}
