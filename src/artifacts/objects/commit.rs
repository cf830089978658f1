//! Commit object
//!
//! Commits are immutable snapshots of the tracked files. They contain:
//! - A commit message
//! - A timestamp
//! - Parent commit ID(s): none for the initial commit, two for merges
//! - A map from file path to blob ID
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! date <unix-millis>
//! parent <parent-sha>
//! blob <blob-sha> <path-length> <path>
//!
//! <commit message>
//! ```
//!
//! Paths are prefixed with their byte length since they may contain newlines.
//!
//! The id is computed from the message, the rendered timestamp, the rendered
//! path map and the rendered parent list, in that order.

use crate::areas::index::Index;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::{ObjectHeader, ObjectType};
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;
use std::path::{Path, PathBuf};

pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Timestamps are rendered in GMT+09:00
const TIMESTAMP_OFFSET_SECONDS: i32 = 9 * 3600;

/// Human-readable timestamp layout, e.g. `Thu Jan 1 09:00:00 1970 +0900`
const TIMESTAMP_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// Path-to-blob map recorded by a commit
pub type TrackedFiles = BTreeMap<PathBuf, ObjectId>;

/// Environment variable freezing the commit clock
pub const COMMIT_DATE_ENV: &str = "GITLET_COMMIT_DATE";

pub fn timestamp_offset() -> FixedOffset {
    FixedOffset::east_opt(TIMESTAMP_OFFSET_SECONDS).expect("GMT+09:00 is a valid offset")
}

/// Timestamp for a new commit
///
/// `GITLET_COMMIT_DATE` (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`) overrides the
/// system clock; an unparsable value falls back to the current time.
pub fn commit_timestamp() -> DateTime<FixedOffset> {
    std::env::var(COMMIT_DATE_ENV)
        .ok()
        .and_then(|date_str| {
            DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .inspect_err(|error| tracing::warn!(%date_str, %error, "ignoring commit date"))
                .ok()
        })
        .unwrap_or_else(|| Utc::now().fixed_offset())
        .with_timezone(&timestamp_offset())
}

/// Slim representation of a commit
///
/// Contains only the information the split point finder needs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    /// The commit's object ID
    pub oid: ObjectId,
    /// The commit's parent object IDs
    pub parents: Vec<ObjectId>,
    /// Commit timestamp (needed for ordering)
    pub timestamp: DateTime<FixedOffset>,
}

/// Immutable snapshot: message, timestamp, parent list, path-to-blob map
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    oid: ObjectId,
    message: String,
    timestamp: DateTime<FixedOffset>,
    tracked: TrackedFiles,
    /// Parent commit IDs (empty for the initial commit, two for merge commits)
    parents: Vec<ObjectId>,
}

impl Commit {
    /// Assemble a commit and compute its id
    pub fn new(
        message: String,
        timestamp: DateTime<FixedOffset>,
        tracked: TrackedFiles,
        parents: Vec<ObjectId>,
    ) -> Self {
        let timestamp = timestamp.with_timezone(&timestamp_offset());
        let oid = Self::compute_id(&message, &timestamp, &tracked, &parents);

        Commit {
            oid,
            message,
            timestamp,
            tracked,
            parents,
        }
    }

    /// The root of every history: epoch timestamp, nothing tracked, no parents
    pub fn initial() -> Self {
        Self::new(
            INITIAL_COMMIT_MESSAGE.to_string(),
            DateTime::<Utc>::UNIX_EPOCH.fixed_offset(),
            TrackedFiles::new(),
            Vec::new(),
        )
    }

    /// Create the successor of `parent` from the staged changes in `index`
    ///
    /// The parent's path map is reconciled with the index and the parent list is
    /// ordered with [`Commit::ordered_parents`].
    pub fn child_of(
        parent: &Commit,
        message: String,
        timestamp: DateTime<FixedOffset>,
        index: &Index,
        second_parent: Option<ObjectId>,
    ) -> Self {
        let tracked = Self::reconcile(&parent.tracked, index.staged(), index.removed());
        let parents = Self::ordered_parents(parent.oid.clone(), second_parent);

        Self::new(message, timestamp, tracked, parents)
    }

    /// Apply staged additions and removals to a path map
    ///
    /// Removals win over additions for the same path; staged paths not yet
    /// tracked are inserted.
    pub fn reconcile(
        tracked: &TrackedFiles,
        staged: &TrackedFiles,
        removed: &BTreeSet<PathBuf>,
    ) -> TrackedFiles {
        let mut reconciled = tracked
            .iter()
            .filter(|(path, _)| !removed.contains(*path))
            .map(|(path, oid)| (path.clone(), staged.get(path).unwrap_or(oid).clone()))
            .collect::<TrackedFiles>();

        for (path, oid) in staged {
            if !tracked.contains_key(path) {
                reconciled.insert(path.clone(), oid.clone());
            }
        }

        reconciled
    }

    /// Parent list for a new commit
    ///
    /// The second parent, when present, comes first: a merge commit lists the
    /// given branch's head before the current branch's head.
    pub fn ordered_parents(first: ObjectId, second: Option<ObjectId>) -> Vec<ObjectId> {
        let mut parents = Vec::with_capacity(2);
        if let Some(second) = second {
            parents.push(second);
        }
        parents.push(first);

        parents
    }

    fn compute_id(
        message: &str,
        timestamp: &DateTime<FixedOffset>,
        tracked: &TrackedFiles,
        parents: &[ObjectId],
    ) -> ObjectId {
        let tracked = tracked
            .iter()
            .map(|(path, oid)| format!("{}={}", path.to_string_lossy(), oid))
            .collect::<Vec<_>>()
            .join(", ");
        let parents = parents
            .iter()
            .map(ObjectId::as_ref)
            .collect::<Vec<_>>()
            .join(", ");

        ObjectId::hash_of([
            message.to_string(),
            Self::format_timestamp(timestamp),
            format!("{{{tracked}}}"),
            format!("[{parents}]"),
        ])
    }

    fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
        timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp in human-readable form
    ///
    /// String like "Thu Jan 1 09:00:00 1970 +0900"
    pub fn readable_timestamp(&self) -> String {
        Self::format_timestamp(&self.timestamp)
    }

    pub fn tracked(&self) -> &TrackedFiles {
        &self.tracked
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First-parent link followed by linear history walks
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_tracked(&self, path: &Path) -> bool {
        self.tracked.contains_key(path)
    }

    pub fn blob_for(&self, path: &Path) -> Option<&ObjectId> {
        self.tracked.get(path)
    }

    pub fn has_identical_content(&self, path: &Path, content_oid: &ObjectId) -> bool {
        self.blob_for(path) == Some(content_oid)
    }

    pub fn to_slim(&self) -> SlimCommit {
        SlimCommit {
            oid: self.oid.clone(),
            parents: self.parents.clone(),
            timestamp: self.timestamp,
        }
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![format!("date {}", self.timestamp.timestamp_millis())];

        for parent in &self.parents {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        for (path, oid) in &self.tracked {
            let path = path.to_string_lossy();
            object_content.push(format!("blob {} {} {path}", oid.as_ref(), path.len()));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        Ok(ObjectHeader::frame(self.object_type(), object_content.as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let mut body = BodyCursor::new(&content);

        let millis = body
            .line()?
            .strip_prefix("date ")
            .context("Invalid commit object: invalid date line")?
            .parse::<i64>()
            .context("Invalid commit object: invalid timestamp")?;
        let timestamp = DateTime::from_timestamp_millis(millis)
            .context("Invalid commit object: timestamp out of range")?
            .with_timezone(&timestamp_offset());

        let mut parents = Vec::new();
        let mut tracked = TrackedFiles::new();
        while !body.skip("\n") {
            if body.skip("parent ") {
                parents.push(ObjectId::try_parse(body.line()?.to_string())?);
            } else if body.skip("blob ") {
                let oid = ObjectId::try_parse(body.field(' ')?.to_string())?;
                let path_length = body
                    .field(' ')?
                    .parse::<usize>()
                    .context("Invalid commit object: invalid path length")?;
                let path = body.take(path_length)?;
                if !body.skip("\n") {
                    anyhow::bail!(
                        "Invalid commit object: path {path:?} is not followed by a newline"
                    );
                }
                tracked.insert(PathBuf::from(path), oid);
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {:?}", body.line()?);
            }
        }

        Ok(Self::new(body.rest().to_string(), timestamp, tracked, parents))
    }
}

/// Reading position within a commit body
struct BodyCursor<'c> {
    rest: &'c str,
}

impl<'c> BodyCursor<'c> {
    fn new(content: &'c str) -> Self {
        BodyCursor { rest: content }
    }

    fn rest(&self) -> &'c str {
        self.rest
    }

    /// Consume `prefix` if the body continues with it
    fn skip(&mut self, prefix: &str) -> bool {
        match self.rest.strip_prefix(prefix) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    /// Consume up to and including `delimiter`, returning what precedes it
    fn field(&mut self, delimiter: char) -> anyhow::Result<&'c str> {
        let (field, rest) = self
            .rest
            .split_once(delimiter)
            .with_context(|| format!("Invalid commit object: missing {delimiter:?}"))?;
        self.rest = rest;

        Ok(field)
    }

    fn line(&mut self) -> anyhow::Result<&'c str> {
        self.field('\n')
    }

    fn take(&mut self, length: usize) -> anyhow::Result<&'c str> {
        let taken = self
            .rest
            .get(..length)
            .context("Invalid commit object: truncated path")?;
        self.rest = &self.rest[length..];

        Ok(taken)
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn object_id(&self) -> &ObjectId {
        &self.oid
    }
}
