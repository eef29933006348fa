//! Term identifiers ("strm" codes).
//!
//! A strm is four decimal digits `CYYT`: a century marker (`1` → 1900s,
//! `2` → 2000s), a two-digit year and a term number `1..=6`. Numeric order is
//! chronological order.
//!
//! The long form `YYYYT` (full year followed by the term number, e.g.
//! `20063` for term 3 of 2006) is accepted on input and normalized to the
//! compact code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TermError};

/// Terms per academic year assumed by [`TermId::next`].
pub const TERMS_PER_YEAR: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TermId(u16);

impl TermId {
    /// Build a strm from its components.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::Input`] if `century` is not 1 or 2, `year` is
    /// above 99, or `term` is outside `1..=6`.
    pub fn new(century: u8, year: u8, term: u8) -> Result<Self> {
        if !(1..=2).contains(&century) || year > 99 || !(1..=6).contains(&term) {
            return Err(TermError::Input(format!(
                "invalid strm components: century {century}, year {year}, term {term}"
            )));
        }
        Ok(TermId(
            u16::from(century) * 1000 + u16::from(year) * 10 + u16::from(term),
        ))
    }

    /// Century marker digit (1 or 2).
    pub fn century(self) -> u8 {
        (self.0 / 1000) as u8
    }

    /// Two-digit year within the century.
    pub fn year_of_century(self) -> u8 {
        ((self.0 / 10) % 100) as u8
    }

    /// Four-digit calendar year.
    pub fn year(self) -> i32 {
        let base = if self.century() == 1 { 1900 } else { 2000 };
        base + i32::from(self.year_of_century())
    }

    pub fn term_number(self) -> u8 {
        (self.0 % 10) as u8
    }

    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// The strm of the following term.
    ///
    /// Term numbers cycle `1 → 2 → 3 → 1`; the year advances when the cycle
    /// wraps, crossing from the 1900s to the 2000s after year 99.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::Input`] when the successor would fall after
    /// year 2099.
    ///
    /// # Examples
    ///
    /// ```
    /// use term_week::TermId;
    ///
    /// let strm: TermId = "2063".parse().unwrap();
    /// assert_eq!(strm.next().unwrap().to_string(), "2071");
    /// ```
    pub fn next(self) -> Result<TermId> {
        let term = self.term_number() % TERMS_PER_YEAR + 1;
        let (mut century, mut year) = (self.century(), self.year_of_century());
        if term == 1 {
            year += 1;
            if year > 99 {
                year = 0;
                century += 1;
            }
        }
        TermId::new(century, year, term)
            .map_err(|_| TermError::Input(format!("strm {self} has no successor")))
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl FromStr for TermId {
    type Err = TermError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TermError::Input(format!("'{s}' is not a valid strm"));
        let bytes = s.as_bytes();
        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }
        let digit = |i: usize| bytes[i] - b'0';
        match bytes.len() {
            4 => TermId::new(digit(0), digit(1) * 10 + digit(2), digit(3)).map_err(|_| invalid()),
            5 => {
                let year = s[..4].parse::<u16>().map_err(|_| invalid())?;
                let century = match year {
                    1900..=1999 => 1,
                    2000..=2099 => 2,
                    _ => return Err(invalid()),
                };
                TermId::new(century, (year % 100) as u8, digit(4)).map_err(|_| invalid())
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<u32> for TermId {
    type Error = TermError;

    fn try_from(value: u32) -> Result<Self> {
        value.to_string().parse()
    }
}

impl TryFrom<String> for TermId {
    type Error = TermError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TermId> for String {
    fn from(id: TermId) -> Self {
        id.to_string()
    }
}
