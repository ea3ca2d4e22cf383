//! Command implementations
//!
//! Commands are organized the way git splits them:
//!
//! - `plumbing`: Low-level commands for direct object manipulation
//! - `porcelain`: Repository setup and the delegated clone
//!
//! Commands take already-parsed arguments and write their results to the
//! repository's writer; parsing and exit codes belong to the binary.

pub mod plumbing;
pub mod porcelain;
