mod report;

pub use report::{Report, ReportError, Section};
