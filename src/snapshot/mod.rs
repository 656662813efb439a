//! Point-in-time capture of a directory's immediate entries.
//!
//! A [`Snapshot`] maps every entry's full path to the [`FileRecord`] captured for it.

mod file_mode;
mod file_record;
mod scanner;
mod snapshot;

pub use file_mode::FileMode;
pub use file_record::{FileRecord, FileRecordError};
pub use scanner::{ScanError, scan_directory};
pub use snapshot::Snapshot;
