//! Offline compiler from term configuration to a [`TermTable`].
//!
//! For each strm, in ascending order:
//!
//! 1. `w1` is converted to its week epoch;
//! 2. configured break weeks are placed at their own epochs (`b1`..`b3`);
//! 3. the two epochs before week 1 become `p2` and `p1`;
//! 4. the term runs until two weeks before the successor's week 1, or for
//!    20 weeks when the successor is not configured yet;
//! 5. every non-break epoch in that span gets the next teaching week number;
//! 6. the census date is recorded at local end of day.
//!
//! Finally the epoch → strm index is built, rejecting overlaps.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::clock::WeekClock;
use crate::config::{TermConfig, TermConfigFile};
use crate::error::{Result, TermError};
use crate::table::{TermData, TermTable};
use crate::term_id::TermId;
use crate::week_code::{WeekCode, MAX_TEACHING_WEEK};
use crate::WeekEpoch;

/// Length of a term, from week 1, whose successor is not configured.
pub const DEFAULT_TERM_WEEKS: WeekEpoch = 20;

/// Pre-term weeks reserved before the successor's week 1.
const SUCCESSOR_LEAD_WEEKS: WeekEpoch = 2;

#[derive(Debug, Clone, Copy)]
pub struct TableBuilder<'a> {
    clock: &'a WeekClock,
}

impl<'a> TableBuilder<'a> {
    /// Dates are placed in weeks using `clock`'s local offset.
    pub fn new(clock: &'a WeekClock) -> Self {
        TableBuilder { clock }
    }

    /// Compile every configured term.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::TableConstruction`] if two terms claim the same
    /// epoch, two codes of one term land on the same epoch, or a term would
    /// need more than 20 teaching weeks. Returns [`TermError::Input`] if a
    /// date is out of range.
    pub fn build(&self, config: &TermConfigFile) -> Result<TermTable> {
        let mut strms = BTreeMap::new();
        for (&strm, term) in config.terms() {
            let successor = strm.next().ok().and_then(|next| config.get(next));
            strms.insert(strm, self.compile_term(strm, term, successor)?);
        }
        let table = TermTable::from_terms(strms)?;
        if let Some(range) = table.epoch_range() {
            info!(
                terms = table.len(),
                first_epoch = *range.start(),
                last_epoch = *range.end(),
                "term table compiled"
            );
        }
        Ok(table)
    }

    fn compile_term(
        &self,
        strm: TermId,
        term: &TermConfig,
        successor: Option<&TermConfig>,
    ) -> Result<TermData> {
        let epoch_w1 = self.epoch_of(term.w1)?;
        let mut weeks = BTreeMap::new();

        let mut breaks = BTreeSet::new();
        for (code, date) in term.break_weeks() {
            let epoch = self.epoch_of(date)?;
            breaks.insert(epoch);
            claim(&mut weeks, strm, epoch, code)?;
        }
        claim(&mut weeks, strm, epoch_w1 - 2, WeekCode::P2)?;
        claim(&mut weeks, strm, epoch_w1 - 1, WeekCode::P1)?;

        let epoch_end = match successor {
            Some(next) => self.epoch_of(next.w1)? - SUCCESSOR_LEAD_WEEKS,
            None => epoch_w1 + DEFAULT_TERM_WEEKS,
        };

        let mut teaching = 0u8;
        for epoch in (epoch_w1..epoch_end).filter(|e| !breaks.contains(e)) {
            if teaching == MAX_TEACHING_WEEK {
                return Err(TermError::TableConstruction(format!(
                    "term {strm} runs past week {MAX_TEACHING_WEEK} at epoch week {epoch}"
                )));
            }
            teaching += 1;
            claim(&mut weeks, strm, epoch, WeekCode::week(teaching)?)?;
        }

        let census = self.clock.local_end_of_day(term.census)?;
        debug!(
            strm = %strm,
            epoch_w1,
            epoch_end,
            teaching_weeks = teaching,
            break_weeks = breaks.len(),
            "compiled term"
        );
        TermData::new(weeks, census)
    }

    fn epoch_of(&self, date: NaiveDate) -> Result<WeekEpoch> {
        let midnight = self.clock.local_midnight(date)?;
        Ok(self.clock.date_to_week_epoch(&midnight))
    }
}

fn claim(
    weeks: &mut BTreeMap<WeekEpoch, WeekCode>,
    strm: TermId,
    epoch: WeekEpoch,
    code: WeekCode,
) -> Result<()> {
    if let Some(existing) = weeks.insert(epoch, code) {
        return Err(TermError::TableConstruction(format!(
            "epoch week {epoch} of term {strm} is both {existing} and {code}"
        )));
    }
    Ok(())
}
