use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::framing;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::BitResult;
use bytes::Bytes;

/// Encode an object's payload (everything after the frame header)
pub trait Packable {
    fn serialize(&self) -> BitResult<Bytes>;
}

/// Decode an object from its payload; the frame header is already consumed
pub trait Unpackable {
    const OBJECT_TYPE: ObjectType;

    fn deserialize(payload: Bytes) -> BitResult<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    fn framed(&self) -> BitResult<Bytes> {
        Ok(framing::frame(self.object_type(), &self.serialize()?))
    }

    fn object_id(&self) -> BitResult<ObjectId> {
        Ok(framing::digest(&self.framed()?))
    }
}

/// Any decoded object, dispatched on the type tag read from the frame header
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectBox {
    Blob(Blob),
    Tree(Tree),
    Commit(Box<Commit>),
}

impl ObjectBox {
    pub fn from_payload(object_type: ObjectType, payload: Bytes) -> BitResult<Self> {
        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Blob::deserialize(payload)?)),
            ObjectType::Tree => Ok(ObjectBox::Tree(Tree::deserialize(payload)?)),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(payload)?))),
        }
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectBox::Blob(blob) => blob.object_type(),
            ObjectBox::Tree(tree) => tree.object_type(),
            ObjectBox::Commit(commit) => commit.object_type(),
        }
    }

    pub fn display(&self) -> String {
        match self {
            ObjectBox::Blob(blob) => blob.display(),
            ObjectBox::Tree(tree) => tree.display(),
            ObjectBox::Commit(commit) => commit.display(),
        }
    }
}
