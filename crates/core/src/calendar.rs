//! Resolution of "today" for date-keyed task lists.
//!
//! All comparisons (lazy list creation, lifecycle actions, the auto-close
//! sweep) go through one [`DayClock`] so the day boundary is consistent.

use chrono::{Duration, FixedOffset, NaiveDate, Offset, Utc};

use crate::types::Timestamp;

/// Largest accepted offset magnitude, in minutes (UTC-14:00 .. UTC+14:00).
pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Truncates instants to calendar dates in a pinned UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClock {
    offset: FixedOffset,
}

impl DayClock {
    /// Clock whose days start at midnight UTC.
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Clock whose days start at midnight in `UTC + offset_minutes`.
    pub fn with_offset_minutes(offset_minutes: i32) -> Result<Self, String> {
        if offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(format!(
                "Day boundary offset must be within +/-{MAX_OFFSET_MINUTES} minutes (got {offset_minutes})"
            ));
        }
        FixedOffset::east_opt(offset_minutes * 60)
            .map(|offset| Self { offset })
            .ok_or_else(|| format!("Invalid day boundary offset: {offset_minutes} minutes"))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar date of `now` in the clock's offset.
    pub fn today_at(&self, now: Timestamp) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }

    /// The day before [`today_at`](Self::today_at).
    pub fn yesterday_at(&self, now: Timestamp) -> NaiveDate {
        self.today_at(now) - Duration::days(1)
    }

    /// Today according to the process wall clock.
    pub fn today(&self) -> NaiveDate {
        self.today_at(Utc::now())
    }
}

impl Default for DayClock {
    fn default() -> Self {
        Self::utc()
    }
}
