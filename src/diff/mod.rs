//! Comparison of two directory snapshots.

mod differ;

pub use differ::{DiffResult, diff_snapshots};
