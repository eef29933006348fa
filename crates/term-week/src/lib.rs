//! # term-week
//!
//! Academic term and teaching-week arithmetic.
//!
//! A [`TableBuilder`] compiles per-term configuration (week 1 date, break
//! weeks, census date) into an immutable [`TermTable`]. At runtime a
//! [`Calendar`] pairs that table with a [`WeekClock`] and answers questions
//! such as "which term and week is it now", "when does week 12 of term 2061
//! end" or "list every term from 2061 to 2071".
//!
//! ```
//! use term_week::{Calendar, TableBuilder, TermConfigFile, WeekClock, WeekCode};
//! use chrono::{FixedOffset, TimeZone, Utc};
//!
//! let config = TermConfigFile::from_toml_str(r#"
//!     [2061]
//!     w1 = "13/2/2006"
//!     census = "31/3/2006"
//! "#).unwrap();
//! let clock = WeekClock::fixed(
//!     Utc.with_ymd_and_hms(2006, 3, 1, 0, 0, 0).unwrap(),
//!     FixedOffset::east_opt(10 * 3600).unwrap(),
//! );
//! let table = TableBuilder::new(&clock).build(&config).unwrap();
//! let calendar = Calendar::new(table, clock);
//!
//! let term = calendar.current_term().unwrap();
//! assert_eq!(term.term_name(), "Term 1, 2006");
//! assert_eq!(term.current_week().unwrap().code().to_string(), "w3");
//! assert!(term.week(WeekCode::W1).unwrap().less_than(WeekCode::W12).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`clock`]: week epoch conversions and the source of "now"
//! - [`term_id`]: strm codes and successor arithmetic
//! - [`week_code`]: `p2`/`p1`/`w1..w20`/`b1..b3` labels
//! - [`config`]: TOML term configuration
//! - [`builder`]: configuration → [`TermTable`]
//! - [`table`]: the compiled lookup table
//! - [`store`]: JSON persistence for tables
//! - [`calendar`], [`term`], [`week`]: runtime queries
//! - [`error`]: Error types

pub mod builder;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod error;
pub mod store;
pub mod table;
pub mod term;
pub mod term_id;
pub mod week;
pub mod week_code;

#[cfg(test)]
mod testing;

/// Whole weeks since Monday 1970-01-05 00:00 local time.
pub type WeekEpoch = i64;

pub use builder::TableBuilder;
pub use calendar::Calendar;
pub use clock::WeekClock;
pub use config::{TermConfig, TermConfigFile};
pub use error::{Result, TermError};
pub use table::{TermData, TermTable};
pub use term::{Term, TermSelector};
pub use term_id::TermId;
pub use week::{Week, WeekSelector};
pub use week_code::{WeekCode, WeekKind};
