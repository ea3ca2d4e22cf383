#![allow(dead_code)]

pub mod command;
pub mod file;

const TMPDIR: &str = env!("CARGO_TARGET_TMPDIR");

/// Keep scratch repositories under the build directory
pub fn redirect_temp_dir() {
    unsafe {
        std::env::set_var("TMPDIR", TMPDIR);
    }

    if !std::path::Path::new(TMPDIR).exists() {
        std::fs::create_dir_all(TMPDIR).expect("Failed to create TMPDIR");
    }
}

/// Whether a system git binary can be used for cross-checks
pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

/// Bail out of a cross-check test when git is not installed
#[macro_export]
macro_rules! require_git {
    () => {
        if !common::git_available() {
            eprintln!("skipping: system git not available");
            return Ok(());
        }
    };
}

/// Trimmed stdout of a finished command
pub fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
