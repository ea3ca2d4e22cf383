//! Commit object
//!
//! Commits chain tree snapshots into history. They contain:
//! - A tree object ID (directory snapshot)
//! - At most one parent commit ID
//! - Author and committer information
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! The message is stored verbatim after the blank line.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{BitError, BitResult};
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, TimeZone};
use derive_new::new;

const DEFAULT_NAME: &str = "minibit";
const DEFAULT_EMAIL: &str = "minibit@localhost";

/// Which identity environment variables to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Author,
    Committer,
}

impl Role {
    fn env_prefix(&self) -> &'static str {
        match self {
            Role::Author => "GIT_AUTHOR",
            Role::Committer => "GIT_COMMITTER",
        }
    }
}

/// Author or committer information
///
/// Name, email, and a timestamp that keeps the UTC offset it was recorded in.
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Author {
    #[new(into)]
    name: String,
    #[new(into)]
    email: String,
    timestamp: DateTime<FixedOffset>,
}

impl Author {
    /// Identity stamped with the current local time
    pub fn now(name: impl Into<String>, email: impl Into<String>) -> Self {
        Author::new(name, email, chrono::Local::now().fixed_offset())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format as it appears on an `author`/`committer` line
    ///
    /// # Returns
    ///
    /// String in format "Name <email> timestamp timezone"
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Load an identity from the environment
    ///
    /// Reads `GIT_<ROLE>_NAME`, `GIT_<ROLE>_EMAIL` and `GIT_<ROLE>_DATE`. The
    /// committer falls back to the author variables, and both fall back to a
    /// fixed identity stamped with the current time.
    pub fn load_from_env(role: Role) -> BitResult<Self> {
        let lookup = |suffix: &str| {
            std::env::var(format!("{}_{suffix}", role.env_prefix()))
                .ok()
                .or_else(|| {
                    (role == Role::Committer)
                        .then(|| std::env::var(format!("GIT_AUTHOR_{suffix}")).ok())
                        .flatten()
                })
                .filter(|value| !value.is_empty())
        };

        let name = lookup("NAME").unwrap_or_else(|| DEFAULT_NAME.to_string());
        let email = lookup("EMAIL").unwrap_or_else(|| DEFAULT_EMAIL.to_string());

        match lookup("DATE") {
            Some(date) => Ok(Author::new(name, email, parse_date(&date)?)),
            None => Ok(Author::now(name, email)),
        }
    }
}

/// Parse a date given in the environment
///
/// Accepts git's raw `<unix> <±hhmm>` (optionally prefixed with `@`),
/// RFC 2822, or `YYYY-MM-DD HH:MM:SS ±hhmm`.
fn parse_date(date: &str) -> BitResult<DateTime<FixedOffset>> {
    let date = date.trim();

    if let Some((timestamp, offset)) = date.trim_start_matches('@').split_once(' ')
        && let Ok(timestamp) = timestamp.parse::<i64>()
    {
        return timestamp_with_offset(timestamp, offset);
    }

    DateTime::parse_from_rfc2822(date)
        .or_else(|_| DateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S %z"))
        .map_err(|_| BitError::malformed(format!("unrecognized date {date:?}")))
}

/// Build a timestamp from a unix time and a `±hhmm` offset
///
/// `-0000` (an unknown zone in git) collapses to `+0000`: `FixedOffset` carries
/// no sign for a zero offset, so re-encoding such an identity changes its bytes.
fn timestamp_with_offset(timestamp: i64, offset: &str) -> BitResult<DateTime<FixedOffset>> {
    let invalid = || BitError::malformed(format!("invalid timezone {offset:?}"));

    let (sign, digits) = match offset.as_bytes().first() {
        Some(b'+') => (1, &offset[1..]),
        Some(b'-') => (-1, &offset[1..]),
        _ => return Err(invalid()),
    };
    if digits.len() != 4 || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours = digits[..2].parse::<i32>().map_err(|_| invalid())?;
    let minutes = digits[2..].parse::<i32>().map_err(|_| invalid())?;
    let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)?;

    offset
        .timestamp_opt(timestamp, 0)
        .single()
        .ok_or_else(|| BitError::malformed(format!("invalid timestamp {timestamp}")))
}

impl TryFrom<&str> for Author {
    type Error = BitError;

    fn try_from(value: &str) -> BitResult<Self> {
        // "name <email> timestamp timezone", split from the right
        let mut parts = value.rsplitn(3, ' ');
        let (Some(timezone), Some(timestamp), Some(name_email)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(BitError::malformed(format!("invalid identity {value:?}")));
        };

        let timestamp = timestamp
            .parse::<i64>()
            .map_err(|_| BitError::malformed(format!("invalid timestamp {timestamp:?}")))?;
        let timestamp = timestamp_with_offset(timestamp, timezone)?;

        let email_start = name_email
            .find('<')
            .ok_or_else(|| BitError::malformed("identity is missing '<'"))?;
        let email = name_email[email_start + 1..]
            .strip_suffix('>')
            .ok_or_else(|| BitError::malformed("identity is missing '>'"))?;
        let name = name_email[..email_start].trim_end();

        Ok(Author::new(name, email, timestamp))
    }
}

/// Commit object
///
/// Multi-parent (merge) commits are not supported.
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Commit {
    /// Parent commit ID (None for a root commit)
    parent: Option<ObjectId>,
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    /// Author who wrote the changes
    author: Author,
    /// Committer who recorded the commit
    committer: Author,
    /// Commit message, verbatim
    #[new(into)]
    message: String,
}

impl Commit {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn committer(&self) -> &Author {
        &self.committer
    }

    fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("tree {}", self.tree_oid)];
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));

        lines
    }
}

impl Packable for Commit {
    fn serialize(&self) -> BitResult<Bytes> {
        let mut content = String::new();
        for line in self.header_lines() {
            content.push_str(&line);
            content.push('\n');
        }
        content.push('\n');
        content.push_str(&self.message);

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Commit {
    const OBJECT_TYPE: ObjectType = ObjectType::Commit;

    fn deserialize(payload: Bytes) -> BitResult<Self> {
        let content = std::str::from_utf8(&payload)
            .map_err(|_| BitError::malformed("commit is not valid UTF-8"))?;
        let (headers, message) = content
            .split_once("\n\n")
            .ok_or_else(|| BitError::malformed("commit is missing the blank line before its message"))?;

        let mut tree_oid = None;
        let mut parent = None;
        let mut author = None;
        let mut committer = None;

        for line in headers.lines() {
            // continuation lines of multi-line headers such as gpgsig
            if line.starts_with(' ') {
                continue;
            }

            let (key, value) = line
                .split_once(' ')
                .ok_or_else(|| BitError::malformed(format!("invalid commit header {line:?}")))?;

            match key {
                "tree" if tree_oid.is_none() => tree_oid = Some(ObjectId::try_parse(value)?),
                "parent" if parent.is_none() => parent = Some(ObjectId::try_parse(value)?),
                "parent" => {
                    return Err(BitError::malformed("commits with several parents are not supported"));
                }
                "author" if author.is_none() => author = Some(Author::try_from(value)?),
                "committer" if committer.is_none() => committer = Some(Author::try_from(value)?),
                "tree" | "author" | "committer" => {
                    return Err(BitError::malformed(format!("duplicate {key} line in commit")));
                }
                _ => {}
            }
        }

        let tree_oid = tree_oid.ok_or_else(|| BitError::malformed("commit is missing its tree line"))?;
        let author = author.ok_or_else(|| BitError::malformed("commit is missing its author line"))?;
        let committer =
            committer.ok_or_else(|| BitError::malformed("commit is missing its committer line"))?;

        Ok(Commit::new(parent, tree_oid, author, committer, message))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = self.header_lines();
        lines.push(String::new());
        lines.push(self.message.clone());

        lines.join("\n")
    }
}
