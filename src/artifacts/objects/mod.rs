//! Object types and their on-disk encoding
//!
//! Content is stored as objects identified by the SHA-1 of their framed bytes.
//! There are three kinds:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (modes, names and object IDs)
//! - **Commit**: Snapshot with metadata (tree, optional parent, author, committer, message)
//!
//! All objects share the framing `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod framing;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in its compact binary form
pub const RAW_OBJECT_ID_LENGTH: usize = 20;
