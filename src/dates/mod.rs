//! Calendar-aware durations and date formatting for placeholder values.
//!
//! This module provides:
//! - Unit-code resolution into single-unit calendar durations
//! - Calendar-aware offset arithmetic (months keep their real lengths)
//! - Named (`rfc1123`, `iso8601`) and custom token-pattern date formatting

mod duration;
mod format;

pub use duration::{apply_offset, resolve_duration, CalendarDuration};
pub use format::format_date;

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
