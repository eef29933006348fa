//! The runtime handle shared by every [`Term`] and [`Week`].

use crate::clock::WeekClock;
use crate::error::Result;
use crate::table::TermTable;
use crate::term::{Term, TermSelector};
use crate::term_id::TermId;
use crate::week::Week;

/// A compiled [`TermTable`] paired with the [`WeekClock`] used to read "now".
///
/// Construct one at startup and pass it by reference; terms and weeks borrow
/// it for their whole lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Calendar {
    table: TermTable,
    clock: WeekClock,
}

impl Calendar {
    pub fn new(table: TermTable, clock: WeekClock) -> Self {
        Calendar { table, clock }
    }

    /// A calendar reading the host clock and local offset.
    pub fn with_system_clock(table: TermTable) -> Self {
        Calendar::new(table, WeekClock::System)
    }

    pub fn table(&self) -> &TermTable {
        &self.table
    }

    pub fn clock(&self) -> &WeekClock {
        &self.clock
    }

    /// Resolve a term; see [`Term::resolve`].
    pub fn term(&self, selector: impl Into<TermSelector>) -> Result<Term<'_>> {
        Term::resolve(self, selector)
    }

    pub fn current_term(&self) -> Result<Term<'_>> {
        Term::current(self)
    }

    /// The current week of the current term.
    pub fn current_week(&self) -> Result<Week<'_>> {
        self.current_term()?.current_week()
    }

    /// See [`Term::range`].
    pub fn term_range(&self, start: Option<TermId>, end: Option<TermId>) -> Result<Vec<Term<'_>>> {
        Term::range(self, start, end)
    }
}
