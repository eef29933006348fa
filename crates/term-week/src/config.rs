//! Human-edited term configuration.
//!
//! One TOML table per strm:
//!
//! ```toml
//! [2061]
//! w1 = "13/2/2006"
//! b1 = "10/4/2006"
//! census = "31/3/2006"
//! ```
//!
//! Dates are `d/m/yyyy` or ISO `yyyy-mm-dd`. `w1` and `census` are
//! required; `b1`..`b3` are optional break-week dates.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, TermError};
use crate::term_id::TermId;
use crate::week_code::WeekCode;

/// Raw configuration for a single term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermConfig {
    /// Any date in the first teaching week, normally its Monday.
    #[serde(deserialize_with = "deserialize_date")]
    pub w1: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_opt_date", skip_serializing_if = "Option::is_none")]
    pub b1: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_opt_date", skip_serializing_if = "Option::is_none")]
    pub b2: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_opt_date", skip_serializing_if = "Option::is_none")]
    pub b3: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_date")]
    pub census: NaiveDate,
}

impl TermConfig {
    pub fn new(w1: NaiveDate, census: NaiveDate) -> Self {
        TermConfig {
            w1,
            b1: None,
            b2: None,
            b3: None,
            census,
        }
    }

    /// Configured break weeks with their codes, in code order.
    pub fn break_weeks(&self) -> impl Iterator<Item = (WeekCode, NaiveDate)> + '_ {
        [
            (WeekCode::B1, self.b1),
            (WeekCode::B2, self.b2),
            (WeekCode::B3, self.b3),
        ]
        .into_iter()
        .filter_map(|(code, date)| date.map(|d| (code, d)))
    }
}

/// Every configured term, keyed by strm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermConfigFile {
    terms: BTreeMap<TermId, TermConfig>,
}

impl TermConfigFile {
    /// # Errors
    ///
    /// Returns [`TermError::Config`] if the document is not valid TOML, a
    /// section name is not a valid strm, or a date cannot be parsed.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| TermError::Config(e.to_string()))
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)
            .map_err(|e| TermError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), terms = config.len(), "term config loaded");
        Ok(config)
    }

    pub fn insert(&mut self, strm: TermId, config: TermConfig) -> Option<TermConfig> {
        self.terms.insert(strm, config)
    }

    pub fn get(&self, strm: TermId) -> Option<&TermConfig> {
        self.terms.get(&strm)
    }

    pub fn terms(&self) -> &BTreeMap<TermId, TermConfig> {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl FromIterator<(TermId, TermConfig)> for TermConfigFile {
    fn from_iter<I: IntoIterator<Item = (TermId, TermConfig)>>(iter: I) -> Self {
        TermConfigFile {
            terms: iter.into_iter().collect(),
        }
    }
}

/// Parse `d/m/yyyy` or `yyyy-mm-dd`.
pub fn parse_config_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .map_err(|_| TermError::Config(format!("'{s}' is not a d/m/yyyy or yyyy-mm-dd date")))
}

fn deserialize_date<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<NaiveDate, D::Error> {
    let s = String::deserialize(deserializer)?;
    parse_config_date(&s).map_err(serde::de::Error::custom)
}

fn deserialize_opt_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<NaiveDate>, D::Error> {
    let s = Option::<String>::deserialize(deserializer)?;
    s.map(|s| parse_config_date(&s).map_err(serde::de::Error::custom))
        .transpose()
}
