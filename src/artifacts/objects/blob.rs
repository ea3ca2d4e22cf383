//! Blob object
//!
//! Blobs store a single version of a file's content. They carry no metadata
//! such as the file name or permissions; trees record those.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::BitResult;
use bytes::Bytes;
use derive_new::new;

/// Raw file content, binary-safe
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    #[new(into)]
    content: Bytes,
}

impl Blob {
    pub fn into_content(self) -> Bytes {
        self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> BitResult<Bytes> {
        Ok(self.content.clone())
    }
}

impl Unpackable for Blob {
    const OBJECT_TYPE: ObjectType = ObjectType::Blob;

    fn deserialize(payload: Bytes) -> BitResult<Self> {
        Ok(Self::new(payload))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}
