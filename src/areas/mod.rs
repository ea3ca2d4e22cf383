//! Repository areas
//!
//! - `database`: Object store for blobs, trees, and commits
//! - `refs`: `HEAD` and the reference directories created at init time
//! - `repository`: Context handle tying the areas to one store root
//! - `workspace`: Working directory snapshots (directory to tree objects)

pub mod database;
pub mod refs;
pub mod repository;
pub mod workspace;
