//! Content-addressable object store compatible with git's loose object format
//!
//! Files and directory trees become immutable, SHA-1 addressed objects under
//! `.git/objects`, and snapshots chain into history through commit objects.
//!
//! - `areas`: object store, working directory snapshots, refs bootstrap
//! - `artifacts`: object kinds, framing, object IDs and compression
//! - `commands`: operations invoked by the command-line layer
//! - `errors`: error taxonomy shared by every operation

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
pub mod observability;
