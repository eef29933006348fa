//! Error types for term-week operations.

use thiserror::Error;

use crate::term_id::TermId;
use crate::WeekEpoch;

#[derive(Error, Debug)]
pub enum TermError {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("No term data configured for strm {0}")]
    NoTermData(TermId),

    #[error("Unknown term for epoch week {0}")]
    UnknownTerm(WeekEpoch),

    #[error("Epoch week {epoch} is not within term {term}")]
    InvalidEpochWeek { term: TermId, epoch: WeekEpoch },

    #[error("Week code '{code}' is not valid within term {term}")]
    InvalidWeekCode { term: TermId, code: String },

    #[error("Table construction error: {0}")]
    TableConstruction(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Table store error: {0}")]
    Store(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TermError>;
