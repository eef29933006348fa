//! Term-relative week codes.
//!
//! | Code | Short | Long |
//! |------|-------|------|
//! | `p2`, `p1` | `-2`, `-1` | `Week -2`, `Week -1` |
//! | `w1` .. `w20` | `1` .. `20` | `Week 1` .. `Week 20` |
//! | `b1` .. `b3` | `B1` .. `B3` | `Break Week 1` .. `Break Week 3` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TermError};

/// Highest teaching week a term may contain.
pub const MAX_TEACHING_WEEK: u8 = 20;

/// Number of configurable break weeks per term.
pub const MAX_BREAK_WEEK: u8 = 3;

/// Number of pre-term weeks before week 1.
pub const PRE_TERM_WEEKS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WeekKind {
    /// Lead-in weeks before week 1.
    PreTerm,
    Teaching,
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekCode {
    kind: WeekKind,
    number: u8,
}

impl WeekCode {
    pub const P2: WeekCode = WeekCode::new_unchecked(WeekKind::PreTerm, 2);
    pub const P1: WeekCode = WeekCode::new_unchecked(WeekKind::PreTerm, 1);
    pub const W1: WeekCode = WeekCode::new_unchecked(WeekKind::Teaching, 1);
    /// The week treated as the end of term.
    pub const W12: WeekCode = WeekCode::new_unchecked(WeekKind::Teaching, 12);
    pub const B1: WeekCode = WeekCode::new_unchecked(WeekKind::Break, 1);
    pub const B2: WeekCode = WeekCode::new_unchecked(WeekKind::Break, 2);
    pub const B3: WeekCode = WeekCode::new_unchecked(WeekKind::Break, 3);

    const fn new_unchecked(kind: WeekKind, number: u8) -> Self {
        WeekCode { kind, number }
    }

    /// Build a code, checking `number` against the range for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::Input`] if `number` is out of range.
    pub fn new(kind: WeekKind, number: u8) -> Result<Self> {
        let max = match kind {
            WeekKind::PreTerm => PRE_TERM_WEEKS,
            WeekKind::Teaching => MAX_TEACHING_WEEK,
            WeekKind::Break => MAX_BREAK_WEEK,
        };
        if number == 0 || number > max {
            return Err(TermError::Input(format!(
                "{kind:?} week number {number} is outside 1..={max}"
            )));
        }
        Ok(WeekCode { kind, number })
    }

    /// Teaching week `n` (`w{n}`).
    pub fn week(n: u8) -> Result<Self> {
        WeekCode::new(WeekKind::Teaching, n)
    }

    /// Break week `n` (`b{n}`).
    pub fn break_week(n: u8) -> Result<Self> {
        WeekCode::new(WeekKind::Break, n)
    }

    pub fn kind(self) -> WeekKind {
        self.kind
    }

    pub fn number(self) -> u8 {
        self.number
    }

    pub fn is_break(self) -> bool {
        self.kind == WeekKind::Break
    }

    /// Abbreviated label, e.g. `-2`, `7`, `B1`.
    pub fn short_name(self) -> String {
        match self.kind {
            WeekKind::PreTerm => format!("-{}", self.number),
            WeekKind::Teaching => self.number.to_string(),
            WeekKind::Break => format!("B{}", self.number),
        }
    }

    /// Formal label, e.g. `Week -2`, `Week 7`, `Break Week 1`.
    pub fn long_name(self) -> String {
        match self.kind {
            WeekKind::PreTerm => format!("Week -{}", self.number),
            WeekKind::Teaching => format!("Week {}", self.number),
            WeekKind::Break => format!("Break Week {}", self.number),
        }
    }
}

impl fmt::Display for WeekCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            WeekKind::PreTerm => 'p',
            WeekKind::Teaching => 'w',
            WeekKind::Break => 'b',
        };
        write!(f, "{prefix}{}", self.number)
    }
}

impl FromStr for WeekCode {
    type Err = TermError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TermError::Input(format!("'{s}' is not a valid week code"));
        let mut chars = s.chars();
        let kind = match chars.next() {
            Some('p') => WeekKind::PreTerm,
            Some('w') => WeekKind::Teaching,
            Some('b') => WeekKind::Break,
            _ => return Err(invalid()),
        };
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number = digits.parse::<u8>().map_err(|_| invalid())?;
        WeekCode::new(kind, number).map_err(|_| invalid())
    }
}

impl TryFrom<String> for WeekCode {
    type Error = TermError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<WeekCode> for String {
    fn from(code: WeekCode) -> Self {
        code.to_string()
    }
}
