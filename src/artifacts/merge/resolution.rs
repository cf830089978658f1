//! Three-way classification of merged paths
//!
//! Every path tracked by the split point, the current head or the given head
//! is classified by the blob ids it has in each (`None` when absent):
//!
//! | given vs split | current vs split | outcome                                 |
//! |----------------|------------------|-----------------------------------------|
//! | unmodified     | any              | keep the current version                |
//! | modified       | unmodified       | take the given version, or remove it    |
//! | modified       | modified         | keep when both agree, conflict otherwise |

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

const CONFLICT_HEAD_MARKER: &[u8] = b"<<<<<<< HEAD\n";
const CONFLICT_SEPARATOR: &[u8] = b"=======\n";
const CONFLICT_END_MARKER: &[u8] = b">>>>>>>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Write the given branch's blob and stage it
    TakeGiven(ObjectId),
    /// Delete the working copy and stage the removal
    Remove,
    /// Write both versions between conflict markers and stage the result
    Conflict {
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

/// Decide what merging does to one path; `None` keeps the current version
pub fn classify(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    given: Option<&ObjectId>,
) -> Option<MergeAction> {
    let modified_in_current = current != split;
    let modified_in_given = given != split;

    match (modified_in_current, modified_in_given) {
        (_, false) => None,
        (false, true) => Some(match given {
            Some(given) => MergeAction::TakeGiven(given.clone()),
            None => MergeAction::Remove,
        }),
        (true, true) if current == given => None,
        (true, true) => Some(MergeAction::Conflict {
            current: current.cloned(),
            given: given.cloned(),
        }),
    }
}

/// Every path the merge has to act on, in path order
pub fn plan_merge(
    split: &Commit,
    current: &Commit,
    given: &Commit,
) -> BTreeMap<PathBuf, MergeAction> {
    let paths = split
        .tracked()
        .keys()
        .chain(current.tracked().keys())
        .chain(given.tracked().keys())
        .collect::<BTreeSet<_>>();

    paths
        .into_iter()
        .filter_map(|path| {
            let action = classify(
                split.blob_for(path),
                current.blob_for(path),
                given.blob_for(path),
            )?;
            tracing::trace!(?path, ?action, "classified merge path");

            Some((path.clone(), action))
        })
        .collect()
}

/// Conflict file content; an absent side contributes no bytes
pub fn conflict_content(current: &[u8], given: &[u8]) -> Vec<u8> {
    [
        CONFLICT_HEAD_MARKER,
        current,
        CONFLICT_SEPARATOR,
        given,
        CONFLICT_END_MARKER,
    ]
    .concat()
}
