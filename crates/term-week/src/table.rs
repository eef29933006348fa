//! The compiled term table.
//!
//! A [`TermTable`] is produced once by [`crate::TableBuilder`] (or reloaded
//! from a store) and is read-only afterwards. It holds:
//!
//! - `terms`: week epoch → strm, for every epoch claimed by some term;
//! - `strms`: per strm, a bijective week epoch ↔ week code map and the
//!   census instant.
//!
//! Both construction paths enforce that no epoch belongs to two terms.

use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TermError};
use crate::term_id::TermId;
use crate::week_code::WeekCode;
use crate::WeekEpoch;

/// Compiled week data for one term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermData {
    weeks: BTreeMap<WeekEpoch, WeekCode>,
    #[serde(skip)]
    epochs: HashMap<WeekCode, WeekEpoch>,
    census: DateTime<FixedOffset>,
}

impl TermData {
    /// # Errors
    ///
    /// Returns [`TermError::TableConstruction`] if a week code is assigned to
    /// more than one epoch.
    pub fn new(weeks: BTreeMap<WeekEpoch, WeekCode>, census: DateTime<FixedOffset>) -> Result<Self> {
        let mut epochs = HashMap::with_capacity(weeks.len());
        for (&epoch, &code) in &weeks {
            if let Some(previous) = epochs.insert(code, epoch) {
                return Err(TermError::TableConstruction(format!(
                    "week code {code} assigned to both epoch week {previous} and {epoch}"
                )));
            }
        }
        Ok(TermData {
            weeks,
            epochs,
            census,
        })
    }

    /// Week epochs and their codes, ascending by epoch.
    pub fn weeks(&self) -> &BTreeMap<WeekEpoch, WeekCode> {
        &self.weeks
    }

    pub fn census(&self) -> DateTime<FixedOffset> {
        self.census
    }

    pub fn week_code(&self, epoch: WeekEpoch) -> Option<WeekCode> {
        self.weeks.get(&epoch).copied()
    }

    pub fn epoch_of(&self, code: WeekCode) -> Option<WeekEpoch> {
        self.epochs.get(&code).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct TermTable {
    terms: BTreeMap<WeekEpoch, TermId>,
    strms: BTreeMap<TermId, TermData>,
}

impl TermTable {
    /// Assemble a table from per-term data, building the epoch → strm index.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::TableConstruction`] if any epoch is claimed by
    /// more than one term.
    pub fn from_terms(strms: BTreeMap<TermId, TermData>) -> Result<Self> {
        let mut terms = BTreeMap::new();
        for (&strm, data) in &strms {
            for &epoch in data.weeks.keys() {
                if let Some(owner) = terms.insert(epoch, strm) {
                    return Err(TermError::TableConstruction(format!(
                        "epoch week {epoch} already found in terms index for term {owner}, \
                         cannot also assign it to term {strm}"
                    )));
                }
            }
        }
        Ok(TermTable { terms, strms })
    }

    pub fn term_for_epoch(&self, epoch: WeekEpoch) -> Option<TermId> {
        self.terms.get(&epoch).copied()
    }

    pub fn week_code(&self, term: TermId, epoch: WeekEpoch) -> Option<WeekCode> {
        self.strms.get(&term)?.week_code(epoch)
    }

    pub fn epoch_of(&self, term: TermId, code: WeekCode) -> Option<WeekEpoch> {
        self.strms.get(&term)?.epoch_of(code)
    }

    pub fn census(&self, term: TermId) -> Option<DateTime<FixedOffset>> {
        self.strms.get(&term).map(TermData::census)
    }

    pub fn contains_term(&self, term: TermId) -> bool {
        self.strms.contains_key(&term)
    }

    pub fn term_data(&self, term: TermId) -> Option<&TermData> {
        self.strms.get(&term)
    }

    /// Configured strms in ascending order.
    pub fn term_ids(&self) -> impl Iterator<Item = TermId> + '_ {
        self.strms.keys().copied()
    }

    /// The epoch → strm index, ascending by epoch.
    pub fn terms(&self) -> &BTreeMap<WeekEpoch, TermId> {
        &self.terms
    }

    /// Lowest and highest epoch claimed by any term.
    pub fn epoch_range(&self) -> Option<RangeInclusive<WeekEpoch>> {
        let first = *self.terms.keys().next()?;
        let last = *self.terms.keys().next_back()?;
        Some(first..=last)
    }

    /// The closest claimed epoch at or before `epoch`, with its term.
    ///
    /// Dates that fall in a gap between terms resolve to the preceding term.
    /// Returns `None` when `epoch` is below every claimed epoch.
    pub fn latest_term_at_or_before(&self, epoch: WeekEpoch) -> Option<(WeekEpoch, TermId)> {
        self.terms
            .range(..=epoch)
            .next_back()
            .map(|(&e, &strm)| (e, strm))
    }

    pub fn is_empty(&self) -> bool {
        self.strms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.strms.len()
    }

    /// # Errors
    ///
    /// Returns [`TermError::Store`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| TermError::Store(e.to_string()))
    }

    /// Decode and re-validate a table produced by [`TermTable::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`TermError::Store`] if the document is malformed or its
    /// epoch index disagrees with the per-term week maps.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TermError::Store(e.to_string()))
    }
}

/// Serialized shape of a table, validated on the way in.
#[derive(Deserialize)]
struct RawTable {
    terms: BTreeMap<WeekEpoch, TermId>,
    strms: BTreeMap<TermId, RawTermData>,
}

#[derive(Deserialize)]
struct RawTermData {
    weeks: BTreeMap<WeekEpoch, WeekCode>,
    census: DateTime<FixedOffset>,
}

impl TryFrom<RawTable> for TermTable {
    type Error = TermError;

    fn try_from(raw: RawTable) -> Result<Self> {
        let strms = raw
            .strms
            .into_iter()
            .map(|(strm, data)| Ok((strm, TermData::new(data.weeks, data.census)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        let table = TermTable::from_terms(strms)?;
        if table.terms != raw.terms {
            return Err(TermError::Store(
                "terms index does not match the per-term week maps".to_string(),
            ));
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn strm(s: &str) -> TermId {
        s.parse().unwrap()
    }

    fn code(s: &str) -> WeekCode {
        s.parse().unwrap()
    }

    fn census() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(10 * 3600)
            .unwrap()
            .with_ymd_and_hms(2006, 3, 31, 23, 59, 59)
            .unwrap()
    }

    fn term_data(entries: &[(WeekEpoch, &str)]) -> TermData {
        let weeks = entries.iter().map(|&(e, c)| (e, code(c))).collect();
        TermData::new(weeks, census()).unwrap()
    }

    fn sample() -> TermTable {
        let mut strms = BTreeMap::new();
        strms.insert(
            strm("2061"),
            term_data(&[(10, "p2"), (11, "p1"), (12, "w1"), (13, "b1"), (14, "w2")]),
        );
        strms.insert(strm("2062"), term_data(&[(15, "p2"), (16, "p1"), (17, "w1")]));
        TermTable::from_terms(strms).unwrap()
    }

    #[test]
    fn lookups_are_exact() {
        let t = sample();
        assert_eq!(t.term_for_epoch(13), Some(strm("2061")));
        assert_eq!(t.term_for_epoch(15), Some(strm("2062")));
        assert_eq!(t.term_for_epoch(18), None);
        assert_eq!(t.week_code(strm("2061"), 13), Some(WeekCode::B1));
        assert_eq!(t.week_code(strm("2062"), 13), None);
        assert_eq!(t.epoch_of(strm("2061"), code("w2")), Some(14));
        assert_eq!(t.epoch_of(strm("2061"), code("w3")), None);
        assert_eq!(t.census(strm("2062")), Some(census()));
        assert_eq!(t.census(strm("2063")), None);
    }

    #[test]
    fn week_maps_are_bijective() {
        let t = sample();
        for strm in t.term_ids() {
            for (&epoch, &code) in t.term_data(strm).unwrap().weeks() {
                assert_eq!(t.epoch_of(strm, code), Some(epoch));
                assert_eq!(t.week_code(strm, epoch), Some(code));
            }
        }
    }

    #[test]
    fn overlapping_terms_are_rejected() {
        let mut strms = BTreeMap::new();
        strms.insert(strm("2061"), term_data(&[(10, "w1"), (11, "w2")]));
        strms.insert(strm("2062"), term_data(&[(11, "p1"), (12, "w1")]));
        let err = TermTable::from_terms(strms).unwrap_err();
        assert!(matches!(err, TermError::TableConstruction(_)));
        assert!(err.to_string().contains("epoch week 11"));
    }

    #[test]
    fn duplicate_codes_within_a_term_are_rejected() {
        let weeks = [(10, code("w1")), (11, code("w1"))].into_iter().collect();
        assert!(matches!(
            TermData::new(weeks, census()),
            Err(TermError::TableConstruction(_))
        ));
    }

    #[test]
    fn backward_search_skips_gaps() {
        let mut strms = BTreeMap::new();
        strms.insert(strm("2061"), term_data(&[(10, "w1"), (11, "w2")]));
        strms.insert(strm("2062"), term_data(&[(20, "w1")]));
        let t = TermTable::from_terms(strms).unwrap();
        assert_eq!(t.latest_term_at_or_before(15), Some((11, strm("2061"))));
        assert_eq!(t.latest_term_at_or_before(20), Some((20, strm("2062"))));
        assert_eq!(t.latest_term_at_or_before(500), Some((20, strm("2062"))));
        assert_eq!(t.latest_term_at_or_before(9), None);
        assert_eq!(t.epoch_range(), Some(10..=20));
    }

    #[test]
    fn json_round_trip_preserves_table() {
        let t = sample();
        let json = t.to_json().unwrap();
        let back = TermTable::from_json(&json).unwrap();
        assert_eq!(back, t);
        assert_eq!(back.epoch_of(strm("2061"), WeekCode::B1), Some(13));
    }

    #[test]
    fn tampered_index_fails_to_load() {
        let json = sample().to_json().unwrap();
        let mut doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        doc["terms"]["13"] = serde_json::Value::String("2062".to_string());
        let err = TermTable::from_json(&doc.to_string()).unwrap_err();
        assert!(matches!(err, TermError::Store(_)));
    }

    #[test]
    fn overlapping_stored_terms_fail_to_load() {
        let json = sample().to_json().unwrap();
        let mut doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        doc["strms"]["2062"]["weeks"]["14"] = serde_json::Value::String("w9".to_string());
        assert!(TermTable::from_json(&doc.to_string()).is_err());
    }

    #[test]
    fn empty_table() {
        let t = TermTable::from_terms(BTreeMap::new()).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.epoch_range(), None);
        assert_eq!(t.latest_term_at_or_before(0), None);
    }
}
