//! Shared fixture for unit tests.
//!
//! | strm | p2 | w1 | break | last week |
//! |------|----|----|-------|-----------|
//! | 2061 | 1882 | 1884 (2006-02-13) | b1 1892 | w13 1897 |
//! | 2062 | 1898 | 1900 (2006-06-05) | b1 1912 | w17 1917 |
//! | 2063 | 1918 | 1920 (2006-10-23) | none | w16 1935 |
//! | 2071 | 1936 | 1938 (2007-02-26) | none | w20 1957 |

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::builder::TableBuilder;
use crate::calendar::Calendar;
use crate::clock::WeekClock;
use crate::config::{TermConfig, TermConfigFile};
use crate::term_id::TermId;
use crate::week_code::WeekCode;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn strm(s: &str) -> TermId {
    s.parse().unwrap()
}

pub fn code(s: &str) -> WeekCode {
    s.parse().unwrap()
}

pub fn brisbane() -> FixedOffset {
    FixedOffset::east_opt(10 * 3600).unwrap()
}

/// Local (UTC+10) noon on the given date.
pub fn local_noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    brisbane()
        .with_ymd_and_hms(y, m, d, 12, 0, 0)
        .unwrap()
        .with_timezone(&Utc)
}

pub fn config() -> TermConfigFile {
    let mut t1 = TermConfig::new(date(2006, 2, 13), date(2006, 3, 31));
    t1.b1 = Some(date(2006, 4, 10));
    let mut t2 = TermConfig::new(date(2006, 6, 5), date(2006, 6, 30));
    t2.b1 = Some(date(2006, 8, 28));
    let t3 = TermConfig::new(date(2006, 10, 23), date(2006, 11, 24));
    let t4 = TermConfig::new(date(2007, 2, 26), date(2007, 3, 30));
    [
        (strm("2061"), t1),
        (strm("2062"), t2),
        (strm("2063"), t3),
        (strm("2071"), t4),
    ]
    .into_iter()
    .collect()
}

/// Fixture calendar with "now" pinned to `now`.
pub fn calendar_at(now: DateTime<Utc>) -> Calendar {
    calendar_from(&config(), now)
}

/// Fixture calendar with "now" in week 3 of 2061 (2006-03-01).
pub fn calendar() -> Calendar {
    calendar_at(local_noon(2006, 3, 1))
}

pub fn calendar_from(config: &TermConfigFile, now: DateTime<Utc>) -> Calendar {
    let clock = WeekClock::fixed(now, brisbane());
    let table = TableBuilder::new(&clock).build(config).unwrap();
    Calendar::new(table, clock)
}
