use std::collections::HashMap;
use std::path::{Path, PathBuf};

use derive_more::Deref;

use crate::snapshot::FileRecord;

/// Directory metadata captured at one instant, keyed by each record's own path.
///
/// Only records can be inserted, so a key never disagrees with its record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Snapshot(HashMap<PathBuf, FileRecord>);

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record`, returning the record previously stored under the same path.
    pub fn insert(&mut self, record: FileRecord) -> Option<FileRecord> {
        self.0.insert(record.path().to_path_buf(), record)
    }

    /// Records ordered by path, for stable output.
    pub fn sorted(&self) -> Vec<(&Path, &FileRecord)> {
        let mut records = self
            .0
            .iter()
            .map(|(path, record)| (path.as_path(), record))
            .collect::<Vec<_>>();
        records.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        records
    }
}

impl FromIterator<FileRecord> for Snapshot {
    fn from_iter<I: IntoIterator<Item = FileRecord>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for record in iter {
            snapshot.insert(record);
        }
        snapshot
    }
}

impl Extend<FileRecord> for Snapshot {
    fn extend<I: IntoIterator<Item = FileRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl IntoIterator for Snapshot {
    type Item = (PathBuf, FileRecord);
    type IntoIter = std::collections::hash_map::IntoIter<PathBuf, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
