//! Parsing of command-line values into library types.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};

use term_week::{TermId, WeekClock, WeekSelector};

/// The host clock, or a clock pinned to `now` (RFC 3339).
pub fn clock(now: Option<&str>) -> Result<WeekClock> {
    let Some(now) = now else {
        return Ok(WeekClock::system());
    };
    let instant = DateTime::parse_from_rfc3339(now)
        .with_context(|| format!("--now '{now}' is not an RFC 3339 datetime"))?;
    Ok(WeekClock::fixed(instant.with_timezone(&Utc), *instant.offset()))
}

/// An RFC 3339 instant, or a `yyyy-mm-dd` date taken at local midnight.
pub fn instant(s: &str, clock: &WeekClock) -> Result<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("'{s}' is neither yyyy-mm-dd nor an RFC 3339 datetime"))?;
    Ok(clock.local_midnight(date)?.with_timezone(&Utc))
}

pub fn strm(s: Option<&str>) -> Result<Option<TermId>> {
    s.map(|s| s.parse::<TermId>().with_context(|| format!("bad term code '{s}'")))
        .transpose()
}

/// A week code or epoch; absent means the current week.
pub fn week(s: Option<&str>) -> Result<WeekSelector> {
    match s {
        Some(s) => Ok(WeekSelector::parse(s)?),
        None => Ok(WeekSelector::Current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn pinned_clock_takes_offset_from_now() {
        let clock = clock(Some("2006-03-01T12:00:00+10:00")).unwrap();
        assert_eq!(clock.offset(), FixedOffset::east_opt(10 * 3600).unwrap());
        assert_eq!(
            clock.now(),
            Utc.with_ymd_and_hms(2006, 3, 1, 2, 0, 0).unwrap()
        );
        assert!(super::clock(Some("yesterday")).is_err());
        assert_eq!(super::clock(None).unwrap(), WeekClock::System);
    }

    #[test]
    fn plain_dates_are_local_midnight() {
        let clock = clock(Some("2006-03-01T12:00:00+10:00")).unwrap();
        let got = instant("2006-02-13", &clock).unwrap();
        assert_eq!(got, Utc.with_ymd_and_hms(2006, 2, 12, 14, 0, 0).unwrap());
        assert!(instant("13/2/2006", &clock).is_err());
    }

    #[test]
    fn week_and_strm_values() {
        assert_eq!(week(None).unwrap(), WeekSelector::Current);
        assert_eq!(week(Some("1886")).unwrap(), WeekSelector::Epoch(1886));
        assert!(week(Some("x9")).is_err());
        assert_eq!(strm(Some("20061")).unwrap().unwrap().to_string(), "2061");
        assert!(strm(Some("2068")).is_err());
        assert!(strm(None).unwrap().is_none());
    }
}
