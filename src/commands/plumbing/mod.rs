//! Plumbing commands (low-level object operations)
//!
//! - `cat-file`: Print an object's type, size or content
//! - `commit-tree`: Create a commit object from a tree
//! - `hash-object`: Compute a blob's object ID and optionally store it
//! - `ls-tree`: List the entries of a tree object
//! - `write-tree`: Snapshot the working directory as tree objects

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod ls_tree;
pub mod write_tree;
