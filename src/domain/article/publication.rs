// src/domain/article/publication.rs
//! Calendar-day addressing of articles.
//!
//! Detail pages address an article by the local calendar day of its `pub_date`.
//! The day is interpreted in the site's UTC offset and converted into a
//! half-open UTC window so the store can answer with a range scan.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicationDay(NaiveDate);

impl PublicationDay {
    /// `None` when the triple is not a real calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The local calendar day `moment` falls on.
    pub fn of(moment: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self(moment.with_timezone(&offset).date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// `[start of day, start of next day)` in UTC, or `None` when either end
    /// falls outside the representable range.
    pub fn utc_window(&self, offset: FixedOffset) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let midnight = self.0.and_time(NaiveTime::MIN);
        let local_minus_utc = Duration::seconds(i64::from(offset.local_minus_utc()));
        let start = midnight.checked_sub_signed(local_minus_utc)?;
        let end = start.checked_add_signed(Duration::days(1))?;
        Some((Utc.from_utc_datetime(&start), Utc.from_utc_datetime(&end)))
    }
}
