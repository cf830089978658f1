//! Repository context
//!
//! Bundles the areas of one repository rooted at the invocation's working
//! directory. Commands are implemented as methods on [`Repository`] in
//! `commands::porcelain` and write their output through [`Repository::writer`].

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::checkout::conflict::untracked_in_the_way;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::error::GitletError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the metadata directory under the working directory root
pub const GITLET_DIR: &str = ".gitlet";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;
        let gitlet_path = path.join(GITLET_DIR);

        let index = Index::new(gitlet_path.join("index").into_boxed_path());
        let database = Database::new(gitlet_path.clone().into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(gitlet_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn gitlet_path(&self) -> Box<Path> {
        self.path.join(GITLET_DIR).into_boxed_path()
    }

    pub fn is_initialized(&self) -> bool {
        self.gitlet_path().is_dir()
    }

    /// Fail with the user-facing error unless `init` has run here
    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if !self.is_initialized() {
            anyhow::bail!(GitletError::NotInitialized);
        }

        Ok(())
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// The commit the current branch points at
    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let head_oid = self.refs.read_head()?;

        self.database.load_commit(&head_oid)
    }

    /// Replace the working tree with the snapshot of `target`
    ///
    /// Refuses before touching any file when an untracked working file would
    /// be overwritten with different content.
    pub fn migrate_working_tree(
        &self,
        head: &Commit,
        index: &Index,
        target: &Commit,
    ) -> anyhow::Result<()> {
        let working_copies = self.workspace.hash_files()?;

        let in_the_way = untracked_in_the_way(&working_copies, head, index, target);
        if !in_the_way.is_empty() {
            tracing::debug!(?in_the_way, target = %target.object_id(), "refusing to migrate");
            anyhow::bail!(GitletError::UntrackedInTheWay);
        }

        let migration = Migration::plan(target, working_copies.keys());
        self.workspace.apply_migration(&migration, &self.database)
    }
}
