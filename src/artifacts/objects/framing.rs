//! Object framing and content addressing
//!
//! Every object kind is stored as `<type> <size>\0<payload>` where `<size>` is
//! the decimal byte count of the payload alone. The object ID is the SHA-1 of
//! that framed form.

use crate::artifacts::objects::RAW_OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{BitError, BitResult};
use bytes::{BufMut, Bytes, BytesMut};
use sha1::{Digest, Sha1};

/// Prepend the `<type> <size>\0` header to a payload
pub fn frame(object_type: ObjectType, payload: &[u8]) -> Bytes {
    let header = format!("{} {}\0", object_type.as_str(), payload.len());

    let mut framed = BytesMut::with_capacity(header.len() + payload.len());
    framed.put_slice(header.as_bytes());
    framed.put_slice(payload);

    framed.freeze()
}

/// Split framed bytes back into their type tag and payload
pub fn unframe(framed: Bytes) -> BitResult<(ObjectType, Bytes)> {
    let nul = framed
        .iter()
        .position(|&byte| byte == 0)
        .ok_or_else(|| BitError::malformed("missing NUL after object header"))?;

    let header = std::str::from_utf8(&framed[..nul])
        .map_err(|_| BitError::malformed("object header is not ASCII"))?;
    let (object_type, size) = header
        .split_once(' ')
        .ok_or_else(|| BitError::malformed(format!("invalid object header {header:?}")))?;

    let object_type = ObjectType::try_from(object_type)?;
    let size = parse_size(size)?;

    let payload = framed.slice(nul + 1..);
    if payload.len() != size {
        return Err(BitError::malformed(format!(
            "declared size {size} does not match payload size {}",
            payload.len()
        )));
    }

    Ok((object_type, payload))
}

/// SHA-1 of the framed bytes
pub fn digest(framed: &[u8]) -> ObjectId {
    let hash = Sha1::digest(framed);

    let mut raw = [0u8; RAW_OBJECT_ID_LENGTH];
    raw.copy_from_slice(&hash);

    ObjectId::from_bytes(raw)
}

fn parse_size(size: &str) -> BitResult<usize> {
    // `usize::from_str` would also accept a leading '+'
    if size.is_empty() || !size.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(BitError::malformed(format!("invalid object size {size:?}")));
    }

    size.parse::<usize>()
        .map_err(|_| BitError::malformed(format!("object size {size} out of range")))
}
