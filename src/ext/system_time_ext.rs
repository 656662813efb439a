use std::time::SystemTime;

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:9] [offset_hour sign:mandatory][offset_minute] UTC"
);

pub trait SystemTimeExt {
    /// Renders the instant in UTC with nanosecond precision.
    fn to_timestamp_string(&self) -> String;
}

impl SystemTimeExt for SystemTime {
    fn to_timestamp_string(&self) -> String {
        OffsetDateTime::from(*self)
            .format(TIMESTAMP_FORMAT)
            .unwrap_or_else(|_| format!("{self:?}"))
    }
}
