pub mod clone;
pub mod init;
