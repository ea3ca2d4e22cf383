//! Error taxonomy of the object model
//!
//! Every failure is surfaced to the caller as-is. Nothing in the library
//! retries, prints or exits; the command layer decides how to report.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the library
pub type BitResult<T> = Result<T, BitError>;

#[derive(Error, Debug)]
pub enum BitError {
    /// The digest has no corresponding entry in the object store
    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    /// Framed or encoded bytes violate the object grammar
    #[error("malformed object: {0}")]
    MalformedObject(String),

    /// Stored bytes cannot be decompressed
    #[error("corrupt object: {0}")]
    CorruptObject(String),

    /// The stored type tag differs from the one the caller asked for
    #[error("object {oid} is a {actual}, not a {expected}")]
    UnexpectedType {
        oid: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },

    /// Bootstrap invoked on a directory that already holds a repository
    #[error("repository already initialized at {}", .0.display())]
    AlreadyInitialized(PathBuf),

    /// The store root does not exist yet
    #[error("not a repository (missing {})", .0.display())]
    NotInitialized(PathBuf),

    /// A digest string that is not 40 hexadecimal characters
    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    /// Symbolic links, special files and non UTF-8 names cannot be snapshotted
    #[error("unsupported file {}: {reason}", .path.display())]
    UnsupportedFileType { path: PathBuf, reason: String },

    /// Filesystem or process failure; the cause is kept as the error source
    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl BitError {
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        BitError::MalformedObject(msg.into())
    }

    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        BitError::CorruptObject(msg.into())
    }

    /// Build a mapper that wraps an I/O error with what was being attempted
    pub fn io<S: Into<String>>(context: S) -> impl FnOnce(std::io::Error) -> Self {
        let context = context.into();
        move |source| BitError::Io { context, source }
    }
}
