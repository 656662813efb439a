use std::collections::HashSet;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::snapshot::Snapshot;

/// Partition of every path seen in two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Present in both snapshots with identical metadata, mapped to the old record.
    pub unchanged: Snapshot,
    /// Created, deleted or modified paths. Creations carry the new record; deletions
    /// and modifications carry the old one.
    pub changed: Snapshot,
}

impl DiffResult {
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Number of distinct paths across both snapshots.
    pub fn total(&self) -> usize {
        self.unchanged.len() + self.changed.len()
    }
}

/// Classifies every path in `old ∪ new` as unchanged or changed.
///
/// A modified file is represented by its old record, so `changed` always describes
/// what was there before unless the file did not exist before.
pub fn diff_snapshots(old: &Snapshot, new: &Snapshot) -> DiffResult {
    let all_paths: HashSet<&PathBuf> = old.keys().chain(new.keys()).collect();
    let mut result = DiffResult::default();

    for path in all_paths {
        let (destination, record) = match (old.get(path), new.get(path)) {
            (Some(old_record), Some(new_record)) if old_record.same_state_as(new_record) => {
                (&mut result.unchanged, old_record)
            }
            (Some(old_record), Some(_)) => {
                debug!("Modified: {}", path.display());
                (&mut result.changed, old_record)
            }
            (None, Some(new_record)) => {
                debug!("Created: {}", path.display());
                (&mut result.changed, new_record)
            }
            (Some(old_record), None) => {
                debug!("Deleted: {}", path.display());
                (&mut result.changed, old_record)
            }
            (None, None) => continue,
        };
        destination.insert(record.clone());
    }

    info!(
        "Compared {} paths: {} unchanged, {} changed",
        result.total(),
        result.unchanged.len(),
        result.changed.len()
    );
    result
}
