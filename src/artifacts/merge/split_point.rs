//! Split point finder
//!
//! The split point of two commits is the most recent commit reachable from
//! both of them by following first parents only.
//!
//! ## Algorithm
//!
//! Both commits seed a priority queue ordered by timestamp, newest first, and
//! are marked as visited from their own side. Each polled commit hands its
//! side mark to its first parent. The first commit to carry both marks is the
//! split point; a seed reached from the other side is therefore detected too,
//! which covers the ancestor and fast-forward cases.
//!
//! Each side walks a single chain and marks a commit at most once, so the
//! walk ends after at most as many steps as both histories are long. A queue
//! that drains without a meeting point means the histories have different
//! roots, reported as an error.
//!
//! Because merge commits list the given branch's head first, a first-parent
//! walk from a merge follows the branch that was merged in.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use chrono::{DateTime, FixedOffset};
use std::collections::{BinaryHeap, HashMap};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    struct VisitState: u8 {
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
    }
}

/// Finds split points given a way to load commits
///
/// The loader keeps the walk independent from the storage backend: the
/// repository passes a closure over its object store, tests an in-memory map.
pub struct SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    pub fn find_split_point(
        &self,
        source_commit_id: &ObjectId,
        target_commit_id: &ObjectId,
    ) -> anyhow::Result<ObjectId> {
        if source_commit_id == target_commit_id {
            return Ok(source_commit_id.clone());
        }

        let mut walk = Walk::default();

        let source_commit = (self.commit_loader)(source_commit_id)?;
        let target_commit = (self.commit_loader)(target_commit_id)?;
        walk.visit(&source_commit.oid, source_commit.timestamp, VisitState::VISITED_FROM_SOURCE);
        walk.visit(&target_commit.oid, target_commit.timestamp, VisitState::VISITED_FROM_TARGET);

        while let Some((_, commit_id)) = walk.queue.pop() {
            let side = walk.state_of(&commit_id);
            let commit = (self.commit_loader)(&commit_id)?;

            let Some(parent_id) = commit.parents.first() else {
                continue;
            };
            let parent = (self.commit_loader)(parent_id)?;

            if walk.visit(&parent.oid, parent.timestamp, side) {
                tracing::debug!(
                    source = %source_commit_id,
                    target = %target_commit_id,
                    split_point = %parent.oid,
                    "found split point"
                );
                return Ok(parent.oid);
            }
        }

        anyhow::bail!(
            "Commits {} and {} share no history",
            source_commit_id,
            target_commit_id
        )
    }
}

#[derive(Default)]
struct Walk {
    states: HashMap<ObjectId, VisitState>,
    queue: BinaryHeap<(DateTime<FixedOffset>, ObjectId)>,
}

impl Walk {
    fn state_of(&self, commit_id: &ObjectId) -> VisitState {
        self.states.get(commit_id).copied().unwrap_or_default()
    }

    /// Mark a commit from one side; true once both sides have reached it
    fn visit(
        &mut self,
        commit_id: &ObjectId,
        timestamp: DateTime<FixedOffset>,
        side: VisitState,
    ) -> bool {
        let state = self.states.entry(commit_id.clone()).or_default();
        if state.contains(side) {
            return false;
        }

        *state |= side;
        if state.contains(VisitState::VISITED_FROM_BOTH) {
            return true;
        }

        tracing::trace!(commit = %commit_id, ?side, "visiting");
        self.queue.push((timestamp, commit_id.clone()));
        false
    }
}
