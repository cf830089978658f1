use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use derive_new::new;

/// One commit as printed by `log` and `global-log`
///
/// ```text
/// ===
/// commit <id>
/// Merge: <first parent, 7 chars> <second parent, 7 chars>
/// Date: <timestamp>
/// <message>
///
/// ```
///
/// The `Merge:` line only appears for commits with more than one parent.
#[derive(new)]
pub struct LogEntry<'c> {
    commit: &'c Commit,
}

impl std::fmt::Display for LogEntry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "===")?;
        writeln!(f, "commit {}", self.commit.object_id())?;
        if let [first, second, ..] = self.commit.parents() {
            writeln!(
                f,
                "Merge: {} {}",
                first.to_short_oid(),
                second.to_short_oid()
            )?;
        }
        writeln!(f, "Date: {}", self.commit.readable_timestamp())?;
        writeln!(f, "{}", self.commit.message())?;
        writeln!(f)
    }
}
