//! Query commands over a compiled term table.

use anyhow::{Context, Result};
use tracing::debug;

use term_week::{store, Calendar, Term, TermSelector, WeekClock, WeekSelector};

use crate::cli::{TableArgs, TermArgs, TermsArgs, WeekArgs, WeeksArgs};
use crate::input;
use crate::output::{print_many, print_one, TermView, WeekView};

fn open(args: &TableArgs, clock: WeekClock) -> Result<Calendar> {
    let table = store::load(&args.table)
        .with_context(|| format!("failed to load term table: {}", args.table.display()))?;
    debug!(path = %args.table.display(), terms = table.len(), "calendar opened");
    Ok(Calendar::new(table, clock))
}

/// `--strm` wins, then `--date`, then the current term.
fn term_selector(strm: Option<&str>, date: Option<&str>, clock: &WeekClock) -> Result<TermSelector> {
    if let Some(id) = input::strm(strm)? {
        return Ok(TermSelector::Id(id));
    }
    match date {
        Some(date) => Ok(TermSelector::At(input::instant(date, clock)?)),
        None => Ok(TermSelector::Current),
    }
}

pub fn term(args: TermArgs, clock: WeekClock) -> Result<()> {
    let calendar = open(&args.table, clock)?;
    let selector = term_selector(args.strm.as_deref(), args.date.as_deref(), &clock)?;
    let term = calendar.term(selector).context("failed to resolve term")?;
    print_one(&TermView::new(&term)?, args.table.json, TermView::line)
}

pub fn week(args: WeekArgs, clock: WeekClock) -> Result<()> {
    let calendar = open(&args.table, clock)?;
    let term = calendar
        .term(term_selector(args.strm.as_deref(), args.date.as_deref(), &clock)?)
        .context("failed to resolve term")?;
    let selector = match args.date.as_deref() {
        Some(date) => WeekSelector::At(input::instant(date, &clock)?),
        None => input::week(args.week.as_deref())?,
    };
    let week = term
        .week(selector)
        .with_context(|| format!("failed to resolve week in term {}", term.id()))?;
    print_one(&WeekView::new(&week)?, args.table.json, WeekView::line)
}

pub fn weeks(args: WeeksArgs, clock: WeekClock) -> Result<()> {
    let calendar = open(&args.table, clock)?;
    let term = calendar
        .term(input::strm(args.strm.as_deref())?)
        .context("failed to resolve term")?;
    let weeks: Vec<_> = if args.all {
        term.weeks().collect()
    } else {
        term.week_range(
            input::week(args.from.as_deref())?,
            input::week(args.to.as_deref())?,
        )
        .with_context(|| format!("failed to list weeks of term {}", term.id()))?
    };
    let views = weeks.iter().map(WeekView::new).collect::<Result<Vec<_>>>()?;
    print_many(&views, args.table.json, WeekView::line)
}

pub fn terms(args: TermsArgs, clock: WeekClock) -> Result<()> {
    let calendar = open(&args.table, clock)?;
    let terms = Term::range(
        &calendar,
        input::strm(args.from.as_deref())?,
        input::strm(args.to.as_deref())?,
    )
    .context("failed to list terms")?;
    let views = terms.iter().map(TermView::new).collect::<Result<Vec<_>>>()?;
    print_many(&views, args.table.json, TermView::line)
}
