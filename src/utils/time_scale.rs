//! Conversion between the feed's dynamical time stamps and civil time.
//!
//! NeoWs publishes `close_approach_date_full` in Barycentric Dynamical Time
//! (TDB). TDB differs from Terrestrial Time (TT) by a periodic term under
//! 2 ms, TT runs 32.184 s ahead of TAI, and TAI runs ahead of UTC by the
//! accumulated leap seconds.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDateTime};

/// Which time scale close-approach timestamps are reported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TimeScale {
    /// Convert the feed's TDB value to UTC
    #[default]
    Utc,
    /// Keep the feed's TDB value as-is
    Tdb,
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeScale::Utc => write!(f, "utc"),
            TimeScale::Tdb => write!(f, "tdb"),
        }
    }
}

impl TimeScale {
    /// Express a raw feed timestamp in this time scale
    pub fn normalize(self, raw_tdb: NaiveDateTime) -> NaiveDateTime {
        match self {
            TimeScale::Utc => tdb_to_utc(raw_tdb),
            TimeScale::Tdb => raw_tdb,
        }
    }
}

/// TT - TAI, fixed by definition
const TT_MINUS_TAI_SECONDS: f64 = 32.184;

/// Unix timestamp of J2000.0 (2000-01-01 12:00:00)
const J2000_UNIX_MILLIS: i64 = 946_728_000_000;

/// TAI - UTC in whole seconds, effective from the first day of (year, month)
const LEAP_SECONDS: &[(i32, u32, i64)] = &[
    (1972, 1, 10),
    (1972, 7, 11),
    (1973, 1, 12),
    (1974, 1, 13),
    (1975, 1, 14),
    (1976, 1, 15),
    (1977, 1, 16),
    (1978, 1, 17),
    (1979, 1, 18),
    (1980, 1, 19),
    (1981, 7, 20),
    (1982, 7, 21),
    (1983, 7, 22),
    (1985, 7, 23),
    (1988, 1, 24),
    (1990, 1, 25),
    (1991, 1, 26),
    (1992, 7, 27),
    (1993, 7, 28),
    (1994, 7, 29),
    (1996, 1, 30),
    (1997, 7, 31),
    (1999, 1, 32),
    (2006, 1, 33),
    (2009, 1, 34),
    (2012, 7, 35),
    (2015, 7, 36),
    (2017, 1, 37),
];

/// TAI - UTC in effect at `t`. Dates before 1972 use the initial 10 s.
pub fn tai_minus_utc(t: NaiveDateTime) -> i64 {
    let key = (t.year(), t.month());
    LEAP_SECONDS
        .iter()
        .rev()
        .find(|(year, month, _)| (*year, *month) <= key)
        .map(|(_, _, seconds)| *seconds)
        .unwrap_or(LEAP_SECONDS[0].2)
}

/// TDB - TT in seconds (Fairhead & Bretagnon leading terms)
pub fn tdb_minus_tt(t: NaiveDateTime) -> f64 {
    let days = (t.and_utc().timestamp_millis() - J2000_UNIX_MILLIS) as f64 / 86_400_000.0;
    let g = (357.53 + 0.985_600_28 * days).to_radians();
    0.001_657 * g.sin() + 0.000_014 * (2.0 * g).sin()
}

/// Convert a TDB timestamp to UTC, to millisecond precision
pub fn tdb_to_utc(tdb: NaiveDateTime) -> NaiveDateTime {
    let offset_seconds = tdb_minus_tt(tdb) + TT_MINUS_TAI_SECONDS + tai_minus_utc(tdb) as f64;
    tdb - Duration::milliseconds((offset_seconds * 1000.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_leap_second_lookup() {
        assert_eq!(tai_minus_utc(at(1960, 1, 1, 0, 0)), 10);
        assert_eq!(tai_minus_utc(at(1998, 12, 31, 23, 59)), 31);
        assert_eq!(tai_minus_utc(at(1999, 1, 1, 0, 0)), 32);
        assert_eq!(tai_minus_utc(at(2023, 10, 5, 12, 0)), 37);
    }

    #[test]
    fn test_periodic_term_is_small() {
        for month in 1..=12 {
            assert!(tdb_minus_tt(at(2023, month, 15, 0, 0)).abs() < 0.002);
        }
    }

    #[test]
    fn test_tdb_to_utc_recent_date() {
        let tdb = at(2023, 10, 5, 12, 0);
        let shift = (tdb - tdb_to_utc(tdb)).num_milliseconds();
        // 37 leap seconds + 32.184 s, give or take the periodic term
        assert!((69_182..=69_186).contains(&shift), "shift was {}", shift);
    }

    #[test]
    fn test_normalize_respects_scale() {
        let tdb = at(2023, 10, 5, 12, 0);
        assert_eq!(TimeScale::Tdb.normalize(tdb), tdb);
        assert!(TimeScale::Utc.normalize(tdb) < tdb);
        assert_eq!(TimeScale::default(), TimeScale::Utc);
        assert_eq!(TimeScale::Tdb.to_string(), "tdb");
    }
}
