//! Delegated clone
//!
//! No transport is implemented here: the system `git` binary fetches the
//! repository, and the resulting `.git/objects` can then be read with the
//! object store like any other.

use crate::errors::{BitError, BitResult};
use std::path::Path;
use std::process::{Command, ExitStatus};
use tracing::debug;

pub const GIT_BINARY: &str = "git";

/// Run `git clone --quiet <url> <destination>` and hand back its exit status
pub fn clone(url: &str, destination: &Path) -> BitResult<ExitStatus> {
    debug!(url, destination = %destination.display(), "delegating clone");

    Command::new(GIT_BINARY)
        .args(["clone", "--quiet", url])
        .arg(destination)
        .status()
        .map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => {
                BitError::io(format!("system {GIT_BINARY} not found in PATH"))(err)
            }
            _ => BitError::io(format!("Unable to run {GIT_BINARY} clone"))(err),
        })
}
