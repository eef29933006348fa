//! Week epoch arithmetic.
//!
//! A week epoch is the number of whole weeks elapsed since Monday
//! 1970-01-05 00:00:00 local time. Every conversion uses the UTC offset that
//! applies *now*, not the offset at the instant being converted, so an
//! instant on the other side of a DST transition lands in the same bucket
//! the calendar was compiled with.
//!
//! [`WeekClock`] is also the single source of "now" for the runtime layer.
//! [`WeekClock::System`] reads the host clock on every call;
//! [`WeekClock::Fixed`] pins both the instant and the offset, which keeps
//! tests and replays deterministic.

use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Utc,
};

use crate::error::{Result, TermError};
use crate::WeekEpoch;

/// Seconds between the Unix epoch (a Thursday) and the reference Monday.
const REFERENCE_ALIGNMENT_SECS: i64 = 345_600;

const SECS_PER_WEEK: i64 = 604_800;

/// Source of the current instant and local UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekClock {
    /// Host clock and host local offset, read on every call.
    #[default]
    System,
    /// A pinned instant and offset.
    Fixed {
        now: DateTime<Utc>,
        offset: FixedOffset,
    },
}

impl WeekClock {
    pub fn system() -> Self {
        WeekClock::System
    }

    pub fn fixed(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        WeekClock::Fixed { now, offset }
    }

    /// The current instant.
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            WeekClock::System => Utc::now(),
            WeekClock::Fixed { now, .. } => *now,
        }
    }

    /// The local UTC offset in effect right now.
    pub fn offset(&self) -> FixedOffset {
        match self {
            WeekClock::System => Local::now().offset().fix(),
            WeekClock::Fixed { offset, .. } => *offset,
        }
    }

    /// Week epoch containing the current instant.
    pub fn current_week_epoch(&self) -> WeekEpoch {
        self.date_to_week_epoch(&self.now())
    }

    /// Convert an instant to its week epoch.
    ///
    /// `floor((unix - (345600 - offset)) / 604800)` where `offset` is the
    /// local UTC offset in seconds at the current moment.
    pub fn date_to_week_epoch<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> WeekEpoch {
        week_epoch_for(instant.timestamp(), self.offset())
    }

    /// Convert Unix seconds to a week epoch.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::Input`] if `unix` is outside the range chrono can
    /// represent as a date.
    pub fn unix_to_week_epoch(&self, unix: i64) -> Result<WeekEpoch> {
        let instant = DateTime::<Utc>::from_timestamp(unix, 0).ok_or_else(|| {
            TermError::Input(format!("unix timestamp {unix} is out of range"))
        })?;
        Ok(self.date_to_week_epoch(&instant))
    }

    /// Start of the given week: the reference Monday at local midnight plus
    /// `epoch` whole weeks.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::Input`] if the resulting date is out of range.
    pub fn week_epoch_to_instant(&self, epoch: WeekEpoch) -> Result<DateTime<FixedOffset>> {
        let out_of_range = || TermError::Input(format!("epoch week {epoch} is out of range"));
        let naive = TimeDelta::try_weeks(epoch)
            .and_then(|weeks| reference_monday().checked_add_signed(weeks))
            .ok_or_else(out_of_range)?;
        self.localize(naive).ok_or_else(out_of_range)
    }

    /// Start of the given week as Unix seconds.
    pub fn week_epoch_to_unix(&self, epoch: WeekEpoch) -> Result<i64> {
        Ok(self.week_epoch_to_instant(epoch)?.timestamp())
    }

    /// `date` at 00:00:00 local.
    pub fn local_midnight(&self, date: NaiveDate) -> Result<DateTime<FixedOffset>> {
        self.localize(date.and_time(NaiveTime::MIN))
            .ok_or_else(|| TermError::Input(format!("date {date} is out of range")))
    }

    /// `date` at 23:59:59 local.
    pub fn local_end_of_day(&self, date: NaiveDate) -> Result<DateTime<FixedOffset>> {
        let end = NaiveTime::from_hms_opt(23, 59, 59)
            .ok_or_else(|| TermError::Input("invalid end-of-day time".to_string()))?;
        self.localize(date.and_time(end))
            .ok_or_else(|| TermError::Input(format!("date {date} is out of range")))
    }

    fn localize(&self, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        self.offset().from_local_datetime(&naive).single()
    }
}

fn week_epoch_for(unix: i64, offset: FixedOffset) -> WeekEpoch {
    let offset = i64::from(offset.local_minus_utc());
    (unix - (REFERENCE_ALIGNMENT_SECS - offset)).div_euclid(SECS_PER_WEEK)
}

/// Monday 1970-01-05 00:00:00, four days after the Unix epoch.
fn reference_monday() -> NaiveDateTime {
    DateTime::<Utc>::UNIX_EPOCH.naive_utc() + TimeDelta::days(4)
}
