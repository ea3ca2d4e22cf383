//! Tree object
//!
//! Trees are directory snapshots: one entry per file (blob) or subdirectory
//! (tree) with its name and mode.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! ## Canonical order
//!
//! Entries are sorted byte-wise by name, where a directory sorts as if its
//! name ended with `/`. So `foo.txt` comes before the directory `foo`, while
//! the file `foo` comes before `foo.txt`. Two trees with the same entries
//! always serialize to the same bytes.

use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::RAW_OBJECT_ID_LENGTH;
use crate::errors::{BitError, BitResult};
use bytes::{BufMut, Bytes, BytesMut};
use derive_new::new;
use std::cmp::Ordering;

/// One `(mode, name, oid)` record of a tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct TreeEntry {
    pub mode: EntryMode,
    #[new(into)]
    pub name: String,
    pub oid: ObjectId,
}

impl TreeEntry {
    fn sort_key(&self) -> impl Iterator<Item = u8> + '_ {
        self.name
            .bytes()
            .chain(self.mode.is_tree().then_some(b'/'))
    }

    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(other.sort_key())
    }
}

/// Sort entries into the order they are serialized in
pub fn sort_canonical(entries: &mut [TreeEntry]) {
    entries.sort_by(TreeEntry::canonical_cmp);
}

/// Serialize entries as a tree payload, in canonical order
pub fn encode_entries(entries: impl IntoIterator<Item = TreeEntry>) -> Bytes {
    let mut entries = entries.into_iter().collect::<Vec<_>>();
    sort_canonical(&mut entries);

    let mut payload = BytesMut::new();
    for entry in &entries {
        payload.put_slice(entry.mode.as_str().as_bytes());
        payload.put_u8(b' ');
        payload.put_slice(entry.name.as_bytes());
        payload.put_u8(0);
        payload.put_slice(&entry.oid.to_raw());
    }

    payload.freeze()
}

/// Parse a tree payload; entries come back in stored order
pub fn decode_entries(payload: &[u8]) -> BitResult<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    let mut rest = payload;

    while !rest.is_empty() {
        let space = rest
            .iter()
            .position(|&byte| byte == b' ')
            .ok_or_else(|| BitError::malformed("tree entry is missing the mode separator"))?;
        let mode = std::str::from_utf8(&rest[..space])
            .map_err(|_| BitError::malformed("tree entry mode is not ASCII"))?;
        let mode = EntryMode::try_from(mode)?;
        rest = &rest[space + 1..];

        let nul = rest
            .iter()
            .position(|&byte| byte == 0)
            .ok_or_else(|| BitError::malformed("tree entry name is not NUL terminated"))?;
        let name = std::str::from_utf8(&rest[..nul])
            .map_err(|_| BitError::malformed("tree entry name is not valid UTF-8"))?;
        if name.is_empty() {
            return Err(BitError::malformed("tree entry has an empty name"));
        }
        rest = &rest[nul + 1..];

        if rest.len() < RAW_OBJECT_ID_LENGTH {
            return Err(BitError::malformed(format!(
                "tree entry {name:?} has a truncated object id"
            )));
        }
        let oid = ObjectId::from_raw(&rest[..RAW_OBJECT_ID_LENGTH])?;
        rest = &rest[RAW_OBJECT_ID_LENGTH..];

        entries.push(TreeEntry::new(mode, name, oid));
    }

    Ok(entries)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a tree from entries in any order
    pub fn new(mut entries: Vec<TreeEntry>) -> Self {
        sort_canonical(&mut entries);
        Tree { entries }
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> BitResult<Bytes> {
        Ok(encode_entries(self.entries.iter().cloned()))
    }
}

impl Unpackable for Tree {
    const OBJECT_TYPE: ObjectType = ObjectType::Tree;

    fn deserialize(payload: Bytes) -> BitResult<Self> {
        Ok(Tree {
            entries: decode_entries(&payload)?,
        })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{:06o} {} {}\t{}",
                    entry.mode.as_u32(),
                    entry.mode.object_type(),
                    entry.oid,
                    entry.name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
