//! Runtime weeks.
//!
//! A [`Week`] is always obtained through [`Term::week`]; it names its term by
//! [`TermId`] and re-resolves it through the shared [`Calendar`] on demand.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Utc};

use crate::calendar::Calendar;
use crate::error::{Result, TermError};
use crate::term::Term;
use crate::term_id::TermId;
use crate::week_code::WeekCode;
use crate::WeekEpoch;

/// How to pick a week within a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekSelector {
    /// The week containing the calendar's current instant.
    #[default]
    Current,
    Code(WeekCode),
    Epoch(WeekEpoch),
    /// The week containing an instant.
    At(DateTime<Utc>),
    /// An already resolved [`Week`], by epoch. Comparisons use it as is.
    Week(WeekEpoch),
}

impl WeekSelector {
    /// Parse command-line style input: a week code (`w3`, `b1`, `p2`) or an
    /// integer week epoch.
    ///
    /// # Errors
    ///
    /// [`TermError::Input`] if `s` is neither.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(code) = s.parse::<WeekCode>() {
            return Ok(WeekSelector::Code(code));
        }
        s.parse::<WeekEpoch>()
            .map(WeekSelector::Epoch)
            .map_err(|_| TermError::Input(format!("'{s}' is neither a week code nor a week epoch")))
    }
}

impl From<WeekCode> for WeekSelector {
    fn from(code: WeekCode) -> Self {
        WeekSelector::Code(code)
    }
}

impl From<WeekEpoch> for WeekSelector {
    fn from(epoch: WeekEpoch) -> Self {
        WeekSelector::Epoch(epoch)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for WeekSelector {
    fn from(instant: DateTime<Tz>) -> Self {
        WeekSelector::At(instant.with_timezone(&Utc))
    }
}

impl From<&Week<'_>> for WeekSelector {
    fn from(week: &Week<'_>) -> Self {
        WeekSelector::Week(week.epoch)
    }
}

impl<T: Into<WeekSelector>> From<Option<T>> for WeekSelector {
    fn from(selector: Option<T>) -> Self {
        selector.map_or(WeekSelector::Current, Into::into)
    }
}

#[derive(Clone, Copy)]
pub struct Week<'c> {
    epoch: WeekEpoch,
    code: WeekCode,
    term: TermId,
    calendar: &'c Calendar,
}

impl<'c> Week<'c> {
    pub(crate) fn new(calendar: &'c Calendar, term: TermId, epoch: WeekEpoch, code: WeekCode) -> Self {
        Week {
            epoch,
            code,
            term,
            calendar,
        }
    }

    pub fn epoch(&self) -> WeekEpoch {
        self.epoch
    }

    pub fn code(&self) -> WeekCode {
        self.code
    }

    pub fn short_name(&self) -> String {
        self.code.short_name()
    }

    pub fn long_name(&self) -> String {
        self.code.long_name()
    }

    pub fn term_id(&self) -> TermId {
        self.term
    }

    /// The owning term.
    pub fn term(&self) -> Result<Term<'c>> {
        Term::from_id(self.calendar, self.term)
    }

    /// Monday 00:00:00 local.
    pub fn week_start(&self) -> Result<DateTime<FixedOffset>> {
        self.calendar.clock().week_epoch_to_instant(self.epoch)
    }

    /// Sunday 23:59:59 local.
    pub fn week_end(&self) -> Result<DateTime<FixedOffset>> {
        let start = self.week_start()?;
        start
            .checked_add_signed(week_end_delta())
            .ok_or_else(|| TermError::Input(format!("end of epoch week {} is out of range", self.epoch)))
    }

    pub fn week_start_unix(&self) -> Result<i64> {
        self.calendar.clock().week_epoch_to_unix(self.epoch)
    }

    /// One second before the following week starts.
    pub fn week_end_unix(&self) -> Result<i64> {
        Ok(self.calendar.clock().week_epoch_to_unix(self.epoch + 1)? - 1)
    }

    pub fn is_current_week(&self) -> bool {
        self.epoch == self.calendar.clock().current_week_epoch()
    }

    pub fn compare(&self, other: &Week<'_>) -> Ordering {
        self.epoch.cmp(&other.epoch)
    }

    /// Compare with another week.
    ///
    /// A [`Week`] is compared directly. Codes, epochs, instants and
    /// `Current` are first resolved within the owning term.
    ///
    /// # Errors
    ///
    /// Whatever [`Term::week`] returns for `other`.
    pub fn compare_to(&self, other: impl Into<WeekSelector>) -> Result<Ordering> {
        let other = match other.into() {
            WeekSelector::Week(epoch) => epoch,
            selector => self.term()?.week(selector)?.epoch,
        };
        Ok(self.epoch.cmp(&other))
    }

    pub fn greater_than(&self, other: impl Into<WeekSelector>) -> Result<bool> {
        Ok(self.compare_to(other)? == Ordering::Greater)
    }

    pub fn less_than(&self, other: impl Into<WeekSelector>) -> Result<bool> {
        Ok(self.compare_to(other)? == Ordering::Less)
    }

    pub fn equals(&self, other: impl Into<WeekSelector>) -> Result<bool> {
        Ok(self.compare_to(other)? == Ordering::Equal)
    }

    /// The following week of the same term, or `None` after its last week.
    pub fn next_week(&self) -> Result<Option<Week<'c>>> {
        match self.term()?.week(self.epoch + 1) {
            Ok(week) => Ok(Some(week)),
            Err(TermError::InvalidEpochWeek { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn week_end_delta() -> TimeDelta {
    TimeDelta::days(7) - TimeDelta::seconds(1)
}

impl PartialEq for Week<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.epoch == other.epoch && self.term == other.term
    }
}

impl Eq for Week<'_> {}

impl PartialOrd for Week<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Week<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| self.term.cmp(&other.term))
    }
}

impl fmt::Debug for Week<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Week")
            .field("epoch", &self.epoch)
            .field("code", &self.code)
            .field("term", &self.term)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Week<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.long_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{calendar, calendar_at, code, date, local_noon, strm};
    use chrono::{Datelike, Timelike, Weekday};

    #[test]
    fn selector_parse() {
        assert_eq!(WeekSelector::parse("w3").unwrap(), WeekSelector::Code(code("w3")));
        assert_eq!(WeekSelector::parse(" b1 ").unwrap(), WeekSelector::Code(WeekCode::B1));
        assert_eq!(WeekSelector::parse("1886").unwrap(), WeekSelector::Epoch(1886));
        assert!(matches!(WeekSelector::parse("w21"), Err(TermError::Input(_))));
        assert!(matches!(WeekSelector::parse("soon"), Err(TermError::Input(_))));
    }

    #[test]
    fn accessors_and_names() {
        let cal = calendar();
        let term = cal.term(strm("2061")).unwrap();
        let week = term.week(code("w3")).unwrap();
        assert_eq!(week.epoch(), 1886);
        assert_eq!(week.code(), code("w3"));
        assert_eq!(week.short_name(), "3");
        assert_eq!(week.long_name(), "Week 3");
        assert_eq!(week.term_id(), strm("2061"));
        assert_eq!(week.term().unwrap(), term);
        assert_eq!(week.to_string(), "Week 3");

        let brk = term.week(WeekCode::B1).unwrap();
        assert_eq!(brk.short_name(), "B1");
        assert_eq!(brk.long_name(), "Break Week 1");
    }

    #[test]
    fn week_bounds() {
        let cal = calendar();
        let week = cal.term(strm("2061")).unwrap().week(code("w1")).unwrap();

        let start = week.week_start().unwrap();
        assert_eq!(start.date_naive(), date(2006, 2, 13));
        assert_eq!(start.weekday(), Weekday::Mon);
        assert_eq!((start.hour(), start.minute(), start.second()), (0, 0, 0));

        let end = week.week_end().unwrap();
        assert_eq!(end - start, TimeDelta::days(6) + TimeDelta::hours(23) + TimeDelta::minutes(59) + TimeDelta::seconds(59));
        assert_eq!(end.date_naive(), date(2006, 2, 19));

        assert_eq!(week.week_start_unix().unwrap(), start.timestamp());
        assert_eq!(week.week_end_unix().unwrap(), end.timestamp());
        assert_eq!(week.week_end_unix().unwrap() - week.week_start_unix().unwrap(), 604_799);
    }

    #[test]
    fn current_week_follows_clock() {
        let cal = calendar();
        let term = cal.current_term().unwrap();
        assert!(term.week(code("w3")).unwrap().is_current_week());
        assert!(!term.week(code("w4")).unwrap().is_current_week());
        assert_eq!(cal.current_week().unwrap().code(), code("w3"));

        let cal = calendar_at(local_noon(2006, 4, 12));
        assert_eq!(cal.current_week().unwrap().code(), WeekCode::B1);
    }

    #[test]
    fn compare_against_weeks_and_selectors() {
        let cal = calendar();
        let term = cal.term(strm("2061")).unwrap();
        let w3 = term.week(code("w3")).unwrap();
        let w9 = term.week(code("w9")).unwrap();

        assert_eq!(w3.compare(&w9), Ordering::Less);
        assert!(w3 < w9);
        assert_eq!(w9.compare(&w9), Ordering::Equal);

        assert!(w9.greater_than(WeekCode::B1).unwrap());
        assert!(w3.less_than(WeekCode::B1).unwrap());
        assert!(w3.equals(1886_i64).unwrap());
        assert!(w3.equals(&w3).unwrap());
        assert!(w3.equals(WeekSelector::Current).unwrap());
        assert!(w9.greater_than(&w3).unwrap());
        assert_eq!(w3.compare_to(local_noon(2006, 4, 19)).unwrap(), Ordering::Less);
    }

    #[test]
    fn compare_propagates_lookup_errors() {
        let cal = calendar();
        let w3 = cal.term(strm("2061")).unwrap().week(code("w3")).unwrap();
        assert!(matches!(
            w3.greater_than(code("w20")),
            Err(TermError::InvalidWeekCode { .. })
        ));
        assert!(matches!(
            w3.less_than(local_noon(2006, 7, 1)),
            Err(TermError::InvalidEpochWeek { .. })
        ));
    }

    #[test]
    fn bare_epochs_must_belong_to_the_term() {
        let cal = calendar();
        let w3 = cal.term(strm("2061")).unwrap().week(code("w3")).unwrap();
        assert!(matches!(
            w3.greater_than(5000_i64),
            Err(TermError::InvalidEpochWeek { epoch: 5000, .. })
        ));
        // 1900 is w1 of 2062, not a week of 2061.
        assert!(matches!(
            w3.less_than(1900_i64),
            Err(TermError::InvalidEpochWeek { epoch: 1900, .. })
        ));
        assert!(matches!(w3.equals(1881_i64), Err(TermError::InvalidEpochWeek { .. })));
        assert!(w3.less_than(1897_i64).unwrap());
    }

    #[test]
    fn weeks_of_other_terms_compare_directly() {
        let cal = calendar();
        let w3 = cal.term(strm("2061")).unwrap().week(code("w3")).unwrap();
        let later = cal.term(strm("2062")).unwrap().week(WeekCode::W1).unwrap();
        assert!(w3.less_than(&later).unwrap());
        assert!(later.greater_than(&w3).unwrap());
        assert!(!w3.equals(&later).unwrap());
        assert_eq!(WeekSelector::from(&later), WeekSelector::Week(1900));
    }

    #[test]
    fn next_week_steps_through_breaks() {
        let cal = calendar();
        let term = cal.term(strm("2061")).unwrap();
        let w8 = term.week(code("w8")).unwrap();
        let b1 = w8.next_week().unwrap().unwrap();
        assert_eq!(b1.code(), WeekCode::B1);
        assert_eq!(b1.next_week().unwrap().unwrap().code(), code("w9"));

        let p1 = term.week(WeekCode::P2).unwrap().next_week().unwrap().unwrap();
        assert_eq!(p1.code(), WeekCode::P1);
        assert_eq!(p1.next_week().unwrap().unwrap().code(), WeekCode::W1);
    }

    #[test]
    fn next_week_after_last_week_is_none() {
        let cal = calendar();
        let last = cal.term(strm("2061")).unwrap().week(code("w13")).unwrap();
        assert!(last.next_week().unwrap().is_none());

        let last = cal.term(strm("2071")).unwrap().week(code("w20")).unwrap();
        assert!(last.next_week().unwrap().is_none());
    }

    #[test]
    fn iterate_whole_term() {
        let cal = calendar();
        let term = cal.term(strm("2062")).unwrap();
        let mut week = Some(term.week(WeekCode::P2).unwrap());
        let mut codes = Vec::new();
        while let Some(w) = week {
            codes.push(w.code());
            week = w.next_week().unwrap();
        }
        let expected: Vec<_> = term.weeks().map(|w| w.code()).collect();
        assert_eq!(codes, expected);
        assert_eq!(codes.len(), 20);
    }

    #[test]
    fn debug_omits_calendar() {
        let cal = calendar();
        let week = cal.term(strm("2061")).unwrap().week(WeekCode::W1).unwrap();
        assert_eq!(
            format!("{week:?}"),
            "Week { epoch: 1884, code: WeekCode { kind: Teaching, number: 1 }, term: TermId(2061), .. }"
        );
    }
}
