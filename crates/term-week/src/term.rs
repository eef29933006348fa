//! Runtime academic terms.
//!
//! A [`Term`] is a validated strm bound to a [`Calendar`]. Terms are resolved
//! from an explicit strm, from an instant, or from "now"; an instant that
//! falls between two terms resolves to the earlier one.

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

use crate::calendar::Calendar;
use crate::error::{Result, TermError};
use crate::table::TermData;
use crate::term_id::TermId;
use crate::week::{Week, WeekSelector};
use crate::week_code::WeekCode;
use crate::WeekEpoch;

/// How to pick a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TermSelector {
    /// The term containing the calendar's current instant.
    #[default]
    Current,
    /// An explicit strm.
    Id(TermId),
    /// The term containing an instant.
    At(DateTime<Utc>),
}

impl From<TermId> for TermSelector {
    fn from(id: TermId) -> Self {
        TermSelector::Id(id)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TermSelector {
    fn from(instant: DateTime<Tz>) -> Self {
        TermSelector::At(instant.with_timezone(&Utc))
    }
}

impl<T: Into<TermSelector>> From<Option<T>> for TermSelector {
    fn from(selector: Option<T>) -> Self {
        selector.map_or(TermSelector::Current, Into::into)
    }
}

#[derive(Clone, Copy)]
pub struct Term<'c> {
    id: TermId,
    data: &'c TermData,
    calendar: &'c Calendar,
}

impl<'c> Term<'c> {
    /// Resolve a term.
    ///
    /// For [`TermSelector::Current`] and [`TermSelector::At`] the week epoch
    /// of the instant is looked up in the table; if no term claims it, the
    /// nearest claimed epoch *before* it decides. The search never goes below
    /// the first epoch in the table.
    ///
    /// # Errors
    ///
    /// - [`TermError::UnknownTerm`] if the instant precedes every term;
    /// - [`TermError::NoTermData`] if the strm is not configured.
    pub fn resolve(calendar: &'c Calendar, selector: impl Into<TermSelector>) -> Result<Self> {
        let id = match selector.into() {
            TermSelector::Id(id) => id,
            TermSelector::Current => {
                Self::id_for_epoch(calendar, calendar.clock().current_week_epoch())?
            }
            TermSelector::At(instant) => {
                Self::id_for_epoch(calendar, calendar.clock().date_to_week_epoch(&instant))?
            }
        };
        let data = calendar
            .table()
            .term_data(id)
            .ok_or(TermError::NoTermData(id))?;
        Ok(Term { id, data, calendar })
    }

    pub fn current(calendar: &'c Calendar) -> Result<Self> {
        Self::resolve(calendar, TermSelector::Current)
    }

    pub fn from_id(calendar: &'c Calendar, id: TermId) -> Result<Self> {
        Self::resolve(calendar, TermSelector::Id(id))
    }

    /// Resolve a strm given as text (`"2061"` or `"20061"`).
    ///
    /// # Errors
    ///
    /// [`TermError::Input`] if `strm` is malformed, otherwise as
    /// [`Term::resolve`].
    pub fn from_strm(calendar: &'c Calendar, strm: &str) -> Result<Self> {
        Self::from_id(calendar, strm.parse()?)
    }

    /// The term containing `instant` (or the latest term before it).
    pub fn containing<Tz: TimeZone>(calendar: &'c Calendar, instant: &DateTime<Tz>) -> Result<Self> {
        Self::resolve(calendar, TermSelector::At(instant.with_timezone(&Utc)))
    }

    fn id_for_epoch(calendar: &Calendar, epoch: WeekEpoch) -> Result<TermId> {
        calendar
            .table()
            .latest_term_at_or_before(epoch)
            .map(|(_, id)| id)
            .ok_or(TermError::UnknownTerm(epoch))
    }

    /// Every term from `start` to `end` inclusive, in order.
    ///
    /// Exactly one bound may be `None`; it stands for the current term.
    ///
    /// # Errors
    ///
    /// - [`TermError::Input`] if both bounds are absent, `start` is after
    ///   `end`, or `end` cannot be reached by stepping through successors;
    /// - [`TermError::NoTermData`] if a term between the two is not
    ///   configured.
    pub fn range(
        calendar: &'c Calendar,
        start: Option<TermId>,
        end: Option<TermId>,
    ) -> Result<Vec<Term<'c>>> {
        let (start, end) = match (start, end) {
            (None, None) => {
                return Err(TermError::Input(
                    "term range start and end are both absent; only one may be".to_string(),
                ))
            }
            (Some(start), None) => (Term::from_id(calendar, start)?, Term::current(calendar)?),
            (None, Some(end)) => (Term::current(calendar)?, Term::from_id(calendar, end)?),
            (Some(start), Some(end)) => {
                (Term::from_id(calendar, start)?, Term::from_id(calendar, end)?)
            }
        };
        if start.id > end.id {
            return Err(TermError::Input(format!(
                "term range start {} is after end {}",
                start.id, end.id
            )));
        }

        let mut terms = vec![start];
        let mut cursor = start;
        while cursor.id < end.id {
            let next_id = cursor.id.next()?;
            if next_id <= cursor.id {
                return Err(TermError::Input(format!(
                    "term {} is not reachable from {}",
                    end.id, start.id
                )));
            }
            cursor = cursor.next_term()?.ok_or(TermError::NoTermData(next_id))?;
            if cursor.id > end.id {
                return Err(TermError::Input(format!(
                    "term {} is not reachable from {}",
                    end.id, start.id
                )));
            }
            terms.push(cursor);
        }
        Ok(terms)
    }

    /// Strms of [`Term::range`].
    pub fn id_range(
        calendar: &'c Calendar,
        start: Option<TermId>,
        end: Option<TermId>,
    ) -> Result<Vec<TermId>> {
        Ok(Self::range(calendar, start, end)?
            .into_iter()
            .map(|t| t.id)
            .collect())
    }

    pub fn id(&self) -> TermId {
        self.id
    }

    pub fn calendar(&self) -> &'c Calendar {
        self.calendar
    }

    /// Compare with `other`, or with the current term when `other` is `None`.
    pub fn equals(&self, other: Option<&Term<'_>>) -> Result<bool> {
        match other {
            Some(other) => Ok(self.id == other.id),
            None => Ok(self.id == Term::current(self.calendar)?.id),
        }
    }

    pub fn is_current_term(&self) -> Result<bool> {
        self.equals(None)
    }

    pub fn year(&self) -> i32 {
        self.id.year()
    }

    pub fn term_number(&self) -> u8 {
        self.id.term_number()
    }

    /// `"Term {n}, {yyyy}"`.
    pub fn term_name(&self) -> String {
        format!("Term {}, {}", self.term_number(), self.year())
    }

    /// Census cut-off, local end of day.
    pub fn census(&self) -> DateTime<FixedOffset> {
        self.data.census()
    }

    /// The following term, or `None` when it has no data.
    ///
    /// # Errors
    ///
    /// Propagates anything other than [`TermError::NoTermData`], e.g. a strm
    /// with no representable successor.
    pub fn next_term(&self) -> Result<Option<Term<'c>>> {
        match Term::from_id(self.calendar, self.id.next()?) {
            Ok(term) => Ok(Some(term)),
            Err(TermError::NoTermData(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Start of week `p2`.
    pub fn term_start(&self) -> Result<DateTime<FixedOffset>> {
        self.week(WeekCode::P2)?.week_start()
    }

    /// End of week `w12`.
    pub fn term_end(&self) -> Result<DateTime<FixedOffset>> {
        self.week(WeekCode::W12)?.week_end()
    }

    pub fn term_start_unix(&self) -> Result<i64> {
        self.week(WeekCode::P2)?.week_start_unix()
    }

    pub fn term_end_unix(&self) -> Result<i64> {
        self.week(WeekCode::W12)?.week_end_unix()
    }

    /// Look up a week of this term.
    ///
    /// # Errors
    ///
    /// - [`TermError::InvalidEpochWeek`] if an epoch, instant or the current
    ///   week falls outside this term;
    /// - [`TermError::InvalidWeekCode`] if the code is not used by this term.
    pub fn week(&self, selector: impl Into<WeekSelector>) -> Result<Week<'c>> {
        let clock = self.calendar.clock();
        match selector.into() {
            WeekSelector::Current => self.week_at(clock.current_week_epoch()),
            WeekSelector::Epoch(epoch) | WeekSelector::Week(epoch) => self.week_at(epoch),
            WeekSelector::At(instant) => self.week_at(clock.date_to_week_epoch(&instant)),
            WeekSelector::Code(code) => {
                let epoch = self
                    .data
                    .epoch_of(code)
                    .ok_or_else(|| TermError::InvalidWeekCode {
                        term: self.id,
                        code: code.to_string(),
                    })?;
                Ok(Week::new(self.calendar, self.id, epoch, code))
            }
        }
    }

    fn week_at(&self, epoch: WeekEpoch) -> Result<Week<'c>> {
        let code = self
            .data
            .week_code(epoch)
            .ok_or(TermError::InvalidEpochWeek {
                term: self.id,
                epoch,
            })?;
        Ok(Week::new(self.calendar, self.id, epoch, code))
    }

    pub fn current_week(&self) -> Result<Week<'c>> {
        self.week(WeekSelector::Current)
    }

    /// Every week of this term in epoch order, breaks included.
    pub fn weeks(&self) -> impl Iterator<Item = Week<'c>> + 'c {
        let (calendar, id) = (self.calendar, self.id);
        self.data
            .weeks()
            .iter()
            .map(move |(&epoch, &code)| Week::new(calendar, id, epoch, code))
    }

    /// Weeks from `start` to `end` inclusive; `Current` stands for this
    /// week.
    ///
    /// # Errors
    ///
    /// [`TermError::Input`] if `start` is after `end`; lookup errors as for
    /// [`Term::week`].
    pub fn week_range(
        &self,
        start: impl Into<WeekSelector>,
        end: impl Into<WeekSelector>,
    ) -> Result<Vec<Week<'c>>> {
        let start = self.week(start)?;
        let end = self.week(end)?;
        if start.epoch() > end.epoch() {
            return Err(TermError::Input(format!(
                "week range start {} is after end {} in term {}",
                start.code(),
                end.code(),
                self.id
            )));
        }
        (start.epoch()..=end.epoch())
            .map(|epoch| self.week_at(epoch))
            .collect()
    }

    /// Codes of [`Term::week_range`].
    pub fn week_code_range(
        &self,
        start: impl Into<WeekSelector>,
        end: impl Into<WeekSelector>,
    ) -> Result<Vec<WeekCode>> {
        Ok(self
            .week_range(start, end)?
            .iter()
            .map(Week::code)
            .collect())
    }
}

impl PartialEq for Term<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Term<'_> {}

impl fmt::Debug for Term<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Term").field("id", &self.id).finish_non_exhaustive()
    }
}

impl fmt::Display for Term<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.term_name())
    }
}
