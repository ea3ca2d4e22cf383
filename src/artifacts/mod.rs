//! Object model data structures
//!
//! - `compression`: zlib codec for stored objects
//! - `objects`: object kinds (blob, tree, commit), framing and object IDs

pub mod compression;
pub mod objects;
