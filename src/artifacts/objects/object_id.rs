//! Object identifier (SHA-1 digest)
//!
//! Object IDs are 40-character lowercase hexadecimal strings: the SHA-1 of
//! the framed object bytes. Tree entries carry the same value in its compact
//! 20-byte form.
//!
//! ## Storage
//!
//! Objects are stored in `.git/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_LENGTH, RAW_OBJECT_ID_LENGTH};
use crate::errors::{BitError, BitResult};
use std::path::PathBuf;

/// Object identifier (SHA-1 hex digest)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Upper-case digits are accepted and normalized so that the fan-out
    /// path always matches what the external tool writes.
    pub fn try_parse(id: impl Into<String>) -> BitResult<Self> {
        let id = id.into();

        if id.len() != OBJECT_ID_LENGTH || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(BitError::InvalidObjectId(id));
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Build an object ID from a compact 20-byte slice, as read from a tree
    pub fn from_raw(raw: &[u8]) -> BitResult<Self> {
        let raw: [u8; RAW_OBJECT_ID_LENGTH] = raw.try_into().map_err(|_| {
            BitError::malformed(format!(
                "object id must be {RAW_OBJECT_ID_LENGTH} bytes, got {}",
                raw.len()
            ))
        })?;

        Ok(Self::from_bytes(raw))
    }

    pub fn from_bytes(raw: [u8; RAW_OBJECT_ID_LENGTH]) -> Self {
        Self(raw.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    /// Compact 20-byte form, as written inside tree entries
    pub fn to_raw(&self) -> [u8; RAW_OBJECT_ID_LENGTH] {
        let mut raw = [0u8; RAW_OBJECT_ID_LENGTH];
        let digits = self.0.as_bytes();

        for (i, byte) in raw.iter_mut().enumerate() {
            // validated as hex on construction
            *byte = (hex_value(digits[2 * i]) << 4) | hex_value(digits[2 * i + 1]);
        }

        raw
    }

    /// Convert to the fan-out path under the objects directory
    ///
    /// For example, `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => 0,
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("af5626b4a114abcb82d63db7c8082c3c4756e51")]
    #[case("af5626b4a114abcb82d63db7c8082c3c4756e51bb")]
    #[case("zf5626b4a114abcb82d63db7c8082c3c4756e51b")]
    fn rejects_invalid_ids(#[case] id: &str) {
        assert!(matches!(
            ObjectId::try_parse(id),
            Err(BitError::InvalidObjectId(_))
        ));
    }

    #[test]
    fn normalizes_upper_case_digits() {
        let oid = ObjectId::try_parse("AF5626B4A114ABCB82D63DB7C8082C3C4756E51B").unwrap();
        assert_eq!(oid.as_ref(), "af5626b4a114abcb82d63db7c8082c3c4756e51b");
    }

    #[test]
    fn splits_into_fan_out_path() {
        let oid = ObjectId::try_parse("af5626b4a114abcb82d63db7c8082c3c4756e51b").unwrap();
        assert_eq!(
            oid.to_path(),
            PathBuf::from("af").join("5626b4a114abcb82d63db7c8082c3c4756e51b")
        );
    }

    #[test]
    fn rejects_short_raw_ids() {
        assert!(matches!(
            ObjectId::from_raw(&[0xab; 19]),
            Err(BitError::MalformedObject(_))
        ));
    }

    proptest! {
        #[test]
        fn raw_form_preserves_the_digest(id in "[0-9a-f]{40}") {
            let oid = ObjectId::try_parse(id.clone()).unwrap();
            let back = ObjectId::from_raw(&oid.to_raw()).unwrap();
            prop_assert_eq!(back.as_ref(), id.as_str());
        }
    }
}
