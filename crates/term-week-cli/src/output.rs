//! Printable views of terms and weeks.

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use term_week::{Term, TermError, Week};

#[derive(Debug, Serialize)]
pub struct TermView {
    pub strm: String,
    pub name: String,
    pub year: i32,
    pub term: u8,
    pub start: DateTime<FixedOffset>,
    /// End of week 12; absent for terms shorter than that.
    pub end: Option<DateTime<FixedOffset>>,
    pub census: DateTime<FixedOffset>,
    /// False when "now" precedes every term in the table.
    pub current: bool,
}

impl TermView {
    pub fn new(term: &Term<'_>) -> Result<Self> {
        Ok(TermView {
            strm: term.id().to_string(),
            name: term.term_name(),
            year: term.year(),
            term: term.term_number(),
            start: term.term_start()?,
            end: match term.term_end() {
                Ok(end) => Some(end),
                Err(TermError::InvalidWeekCode { .. }) => None,
                Err(e) => return Err(e.into()),
            },
            census: term.census(),
            current: match term.is_current_term() {
                Ok(current) => current,
                Err(TermError::UnknownTerm(_)) => false,
                Err(e) => return Err(e.into()),
            },
        })
    }

    pub fn line(&self) -> String {
        let marker = if self.current { " *" } else { "" };
        let end = self
            .end
            .map_or_else(|| "?".to_string(), |end| end.date_naive().to_string());
        format!(
            "{}  {}  {} .. {end}  census {}{marker}",
            self.strm,
            self.name,
            self.start.date_naive(),
            self.census.date_naive(),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct WeekView {
    pub strm: String,
    pub epoch: i64,
    pub code: String,
    pub short_name: String,
    pub long_name: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub current: bool,
}

impl WeekView {
    pub fn new(week: &Week<'_>) -> Result<Self> {
        Ok(WeekView {
            strm: week.term_id().to_string(),
            epoch: week.epoch(),
            code: week.code().to_string(),
            short_name: week.short_name(),
            long_name: week.long_name(),
            start: week.week_start()?,
            end: week.week_end()?,
            current: week.is_current_week(),
        })
    }

    pub fn line(&self) -> String {
        let marker = if self.current { " *" } else { "" };
        format!(
            "{}  {:<4} {:<13} epoch {}  {} .. {}{marker}",
            self.strm,
            self.code,
            self.long_name,
            self.epoch,
            self.start.date_naive(),
            self.end.date_naive(),
        )
    }
}

/// Print one view as text or pretty JSON.
pub fn print_one<T: Serialize>(view: &T, json: bool, line: impl Fn(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        println!("{}", line(view));
    }
    Ok(())
}

/// Print a list of views as text lines or a pretty JSON array.
pub fn print_many<T: Serialize>(views: &[T], json: bool, line: impl Fn(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(views)?);
    } else {
        for view in views {
            println!("{}", line(view));
        }
    }
    Ok(())
}
