//! Unix epoch <-> calendar conversion.

use std::fmt;

use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};

/// Magnitudes at or above this are read as milliseconds in auto mode
/// (1e11 seconds is past the year 5000).
pub const MILLIS_THRESHOLD: f64 = 100_000_000_000.0;

/// Largest accepted millisecond input.
pub const MAX_MILLIS: i64 = 9_999_999_999_999;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%B %d, %Y %H:%M:%S",
];

/// Date-times carrying an explicit offset; the first matches [`DateFormat::Human`] output.
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f %:z", "%Y-%m-%d %H:%M:%S%.f %z"];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%B %d, %Y"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpochUnit {
    Seconds,
    Milliseconds,
}

impl fmt::Display for EpochUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EpochUnit::Seconds => "seconds",
            EpochUnit::Milliseconds => "milliseconds",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UnitHint {
    #[default]
    Auto,
    Seconds,
    Milliseconds,
}

/// Output layout. RFC 2822 has whole-second resolution, so milliseconds are
/// dropped there; the other two keep them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DateFormat {
    #[default]
    Iso8601,
    Rfc2822,
    Human,
}

impl DateFormat {
    pub fn label(self) -> &'static str {
        match self {
            DateFormat::Iso8601 => "ISO 8601",
            DateFormat::Rfc2822 => "RFC 2822",
            DateFormat::Human => "Human",
        }
    }
}

/// Display zone. `Fixed` holds seconds east of UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Zone {
    #[default]
    Utc,
    Local,
    Fixed(i32),
}

impl Zone {
    /// Accepts `UTC`, `Z`, `local`, or an offset such as `+05:30`, `-0800`, `+9`.
    pub fn parse(s: &str) -> Result<Self> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("utc") || t.eq_ignore_ascii_case("z") || t.is_empty() {
            return Ok(Zone::Utc);
        }
        if t.eq_ignore_ascii_case("local") {
            return Ok(Zone::Local);
        }
        let bad = || ToolError::InvalidTimestamp(format!("unknown time zone {t:?}"));
        let (sign, rest) = match t.as_bytes()[0] {
            b'+' => (1, &t[1..]),
            b'-' => (-1, &t[1..]),
            _ => return Err(bad()),
        };
        let (h, m) = match rest.split_once(':') {
            Some((h, m)) => (h, m),
            None if rest.len() == 4 => rest.split_at(2),
            None => (rest, "0"),
        };
        let h: i32 = h.parse().map_err(|_| bad())?;
        let m: i32 = m.parse().map_err(|_| bad())?;
        if !(0..60).contains(&m) {
            return Err(bad());
        }
        let secs = sign * (h * 3600 + m * 60);
        FixedOffset::east_opt(secs).ok_or_else(bad)?;
        Ok(Zone::Fixed(secs))
    }

    pub fn label(&self) -> String {
        match self {
            Zone::Utc => "UTC".to_string(),
            Zone::Local => "Local".to_string(),
            Zone::Fixed(secs) => {
                let sign = if *secs < 0 { '-' } else { '+' };
                let a = secs.unsigned_abs();
                format!("{sign}{:02}:{:02}", a / 3600, (a % 3600) / 60)
            }
        }
    }
}

/// Result of reading an epoch value.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochToDate {
    pub unit: EpochUnit,
    pub millis: i64,
    pub utc: DateTime<Utc>,
    /// The instant in the requested zone and format.
    pub formatted: String,
}

impl EpochToDate {
    /// Multi-line summary shown in the output pane.
    pub fn report(&self, input: &str) -> String {
        let utc = self.utc;
        [
            format!("Input: {} ({})", input.trim(), self.unit),
            String::new(),
            format!("Result: {}", self.formatted),
            format!("UTC: {}", utc.format("%Y-%m-%d %H:%M:%S UTC")),
            format!("ISO 8601: {}", utc.to_rfc3339_opts(precision(self.unit, self.millis), true)),
            format!("RFC 2822: {}", utc.to_rfc2822()),
            String::new(),
            "Additional formats:".to_string(),
            format!("  {}", utc.format("%Y-%m-%d")),
            format!("  {}", utc.format("%d/%m/%Y %H:%M:%S")),
            format!("  {}", utc.format("%A, %B %d, %Y")),
        ]
        .join("\n")
    }
}

/// Result of reading a calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DateToEpoch {
    pub seconds: i64,
    pub millis: i64,
    pub utc: DateTime<Utc>,
}

impl DateToEpoch {
    pub fn report(&self, input: &str) -> String {
        [
            format!("Input: {}", input.trim()),
            String::new(),
            format!("Seconds: {}", self.seconds),
            format!("Milliseconds: {}", self.millis),
            String::new(),
            format!("UTC: {}", self.utc.format("%Y-%m-%d %H:%M:%S UTC")),
            format!("ISO 8601: {}", self.utc.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        ]
        .join("\n")
    }
}

fn precision(unit: EpochUnit, millis: i64) -> SecondsFormat {
    if unit == EpochUnit::Milliseconds || millis % 1000 != 0 {
        SecondsFormat::Millis
    } else {
        SecondsFormat::Secs
    }
}

fn parse_number(input: &str) -> Result<f64> {
    let t = input.trim();
    if t.is_empty() {
        return Err(ToolError::InvalidTimestamp("empty input".into()));
    }
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ToolError::InvalidTimestamp(format!("{t:?} is not a number"))),
    }
}

/// Converts an epoch value to a calendar date.
pub fn epoch_to_date(input: &str, hint: UnitHint, zone: Zone, format: DateFormat) -> Result<EpochToDate> {
    let value = parse_number(input)?;
    let unit = match hint {
        UnitHint::Seconds => EpochUnit::Seconds,
        UnitHint::Milliseconds => EpochUnit::Milliseconds,
        UnitHint::Auto if value.abs() >= MILLIS_THRESHOLD => EpochUnit::Milliseconds,
        UnitHint::Auto => EpochUnit::Seconds,
    };

    let millis_f = match unit {
        EpochUnit::Seconds => value * 1000.0,
        EpochUnit::Milliseconds => value,
    };
    let out_of_range = || ToolError::InvalidTimestamp(format!("{} is out of range", input.trim()));
    if unit == EpochUnit::Milliseconds && millis_f.abs() > MAX_MILLIS as f64 {
        return Err(ToolError::InvalidTimestamp("timestamp value is too large".into()));
    }
    if millis_f.abs() >= i64::MAX as f64 {
        return Err(out_of_range());
    }
    let millis = millis_f.round() as i64;
    let utc = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(out_of_range)?;

    let formatted = format_in_zone(utc, zone, format, precision(unit, millis))?;
    log::debug!("epoch {millis}ms -> {formatted}");
    Ok(EpochToDate {
        unit,
        millis,
        utc,
        formatted,
    })
}

fn format_in_zone(utc: DateTime<Utc>, zone: Zone, format: DateFormat, secs: SecondsFormat) -> Result<String> {
    Ok(match zone {
        Zone::Utc => render(&utc, format, secs),
        Zone::Local => render(&utc.with_timezone(&Local), format, secs),
        Zone::Fixed(offset) => {
            let tz = FixedOffset::east_opt(offset)
                .ok_or_else(|| ToolError::InvalidTimestamp(format!("bad offset {offset}")))?;
            render(&utc.with_timezone(&tz), format, secs)
        }
    })
}

fn render<Tz: TimeZone>(dt: &DateTime<Tz>, format: DateFormat, secs: SecondsFormat) -> String
where
    Tz::Offset: fmt::Display,
{
    match format {
        DateFormat::Iso8601 => dt.to_rfc3339_opts(secs, true),
        DateFormat::Rfc2822 => dt.to_rfc2822(),
        DateFormat::Human if secs == SecondsFormat::Millis => {
            dt.format("%Y-%m-%d %H:%M:%S%.3f %:z").to_string()
        }
        DateFormat::Human => dt.format("%Y-%m-%d %H:%M:%S %:z").to_string(),
    }
}

/// Parses a calendar date; values without an offset are read in `zone`.
pub fn date_to_epoch(input: &str, zone: Zone) -> Result<DateToEpoch> {
    let t = input.trim();
    if t.is_empty() {
        return Err(ToolError::InvalidTimestamp("empty input".into()));
    }

    let utc = if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        dt.with_timezone(&Utc)
    } else if let Ok(dt) = DateTime::parse_from_rfc2822(t) {
        dt.with_timezone(&Utc)
    } else if let Some(dt) = parse_with_offset(t) {
        dt.with_timezone(&Utc)
    } else {
        let naive = parse_naive(t).ok_or_else(|| {
            log::warn!("unparseable date {t:?}");
            ToolError::InvalidTimestamp(
                "could not parse date; try 2024-01-15, 2024-01-15 14:30:00, or ISO 8601".into(),
            )
        })?;
        localize(naive, zone)?
    };

    Ok(DateToEpoch {
        seconds: utc.timestamp(),
        millis: utc.timestamp_millis(),
        utc,
    })
}

fn parse_with_offset(t: &str) -> Option<DateTime<FixedOffset>> {
    OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|f| DateTime::parse_from_str(t, f).ok())
}

fn parse_naive(t: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(t, f).ok())
        .or_else(|| {
            NAIVE_DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(t, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn localize(naive: NaiveDateTime, zone: Zone) -> Result<DateTime<Utc>> {
    let missing = || ToolError::InvalidTimestamp(format!("{naive} does not exist in {}", zone.label()));
    match zone {
        Zone::Utc => Ok(Utc.from_utc_datetime(&naive)),
        Zone::Local => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(missing),
        Zone::Fixed(offset) => FixedOffset::east_opt(offset)
            .and_then(|tz| tz.from_local_datetime(&naive).single())
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(missing),
    }
}

/// Current time as (seconds, milliseconds).
pub fn now_epoch() -> (i64, i64) {
    let now = Utc::now();
    (now.timestamp(), now.timestamp_millis())
}

/// `YYYY-MM-DD HH:MM:SS UTC` for an epoch-seconds value, if representable.
pub fn format_utc_seconds(secs: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso(input: &str, hint: UnitHint) -> String {
        epoch_to_date(input, hint, Zone::Utc, DateFormat::Iso8601)
            .unwrap()
            .formatted
    }

    #[test]
    fn seconds_to_iso() {
        assert_eq!(iso("1700000000", UnitHint::Seconds), "2023-11-14T22:13:20Z");
        assert_eq!(iso("1700000000", UnitHint::Auto), "2023-11-14T22:13:20Z");
        assert_eq!(iso("0", UnitHint::Auto), "1970-01-01T00:00:00Z");
        assert_eq!(iso("-86400", UnitHint::Auto), "1969-12-31T00:00:00Z");
    }

    #[test]
    fn auto_detects_milliseconds() {
        let r = epoch_to_date("1700000000123", UnitHint::Auto, Zone::Utc, DateFormat::Iso8601).unwrap();
        assert_eq!(r.unit, EpochUnit::Milliseconds);
        assert_eq!(r.formatted, "2023-11-14T22:13:20.123Z");
        assert_eq!(iso("1700000000000", UnitHint::Milliseconds), "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn fractional_seconds_keep_millis() {
        assert_eq!(iso("1700000000.5", UnitHint::Seconds), "2023-11-14T22:13:20.500Z");
    }

    #[test]
    fn zone_and_format_selection() {
        let plus = Zone::parse("+05:30").unwrap();
        let r = epoch_to_date("1700000000", UnitHint::Seconds, plus, DateFormat::Iso8601).unwrap();
        assert_eq!(r.formatted, "2023-11-15T03:43:20+05:30");
        let r = epoch_to_date("1700000000", UnitHint::Seconds, Zone::Utc, DateFormat::Rfc2822).unwrap();
        assert_eq!(r.formatted, "Tue, 14 Nov 2023 22:13:20 +0000");
        let r = epoch_to_date("1700000000", UnitHint::Seconds, Zone::Fixed(-8 * 3600), DateFormat::Human)
            .unwrap();
        assert_eq!(r.formatted, "2023-11-14 14:13:20 -08:00");
    }

    #[test]
    fn rejects_bad_epochs() {
        for bad in ["", "abc", "12a", "NaN", "inf"] {
            let err = epoch_to_date(bad, UnitHint::Auto, Zone::Utc, DateFormat::Iso8601).unwrap_err();
            assert_eq!(err.kind(), "InvalidTimestamp", "{bad:?}");
        }
        assert!(epoch_to_date("99999999999999", UnitHint::Milliseconds, Zone::Utc, DateFormat::Iso8601).is_err());
        assert!(epoch_to_date("1e300", UnitHint::Seconds, Zone::Utc, DateFormat::Iso8601).is_err());
    }

    #[test]
    fn parses_dates() {
        let cases = [
            ("2023-11-14T22:13:20Z", 1_700_000_000),
            ("2023-11-14T23:13:20+01:00", 1_700_000_000),
            ("2023-11-14 22:13:20", 1_700_000_000),
            ("2023/11/14 22:13:20", 1_700_000_000),
            ("14/11/2023 22:13:20", 1_700_000_000),
            ("14-11-2023 22:13:20", 1_700_000_000),
            ("November 14, 2023 22:13:20", 1_700_000_000),
            ("2023-11-14", 1_699_920_000),
            ("Tue, 14 Nov 2023 22:13:20 +0000", 1_700_000_000),
        ];
        for (input, secs) in cases {
            let r = date_to_epoch(input, Zone::Utc).unwrap();
            assert_eq!(r.seconds, secs, "{input}");
            assert_eq!(r.millis, secs * 1000, "{input}");
        }
    }

    #[test]
    fn naive_dates_use_selected_zone() {
        let r = date_to_epoch("2023-11-15 03:43:20", Zone::parse("+0530").unwrap()).unwrap();
        assert_eq!(r.seconds, 1_700_000_000);
    }

    #[test]
    fn round_trips_at_unit_precision() {
        let zones = [Zone::Utc, Zone::Local, Zone::Fixed(-8 * 3600), Zone::Fixed(19_800)];
        let formats = [DateFormat::Iso8601, DateFormat::Rfc2822, DateFormat::Human];
        let inputs = [
            ("1700000000", UnitHint::Seconds),
            ("1700000000123", UnitHint::Milliseconds),
            ("-86400", UnitHint::Auto),
        ];
        for zone in zones {
            for format in formats {
                for (input, hint) in inputs {
                    let there = epoch_to_date(input, hint, zone, format).unwrap();
                    let back = date_to_epoch(&there.formatted, zone)
                        .unwrap_or_else(|e| panic!("{format:?} {zone:?} {:?}: {e}", there.formatted));
                    let expected = match format {
                        DateFormat::Rfc2822 => there.millis.div_euclid(1000) * 1000,
                        _ => there.millis,
                    };
                    assert_eq!(back.millis, expected, "{format:?} {zone:?} {:?}", there.formatted);
                }
            }
        }
    }

    #[test]
    fn parses_human_output_with_offset() {
        let r = date_to_epoch("2023-11-14 14:13:20 -08:00", Zone::Utc).unwrap();
        assert_eq!(r.seconds, 1_700_000_000);
        let r = date_to_epoch("2023-11-14 22:13:20.123 +00:00", Zone::Fixed(3600)).unwrap();
        assert_eq!(r.millis, 1_700_000_000_123);
    }

    #[test]
    fn rejects_bad_dates() {
        assert!(matches!(date_to_epoch("yesterday", Zone::Utc), Err(ToolError::InvalidTimestamp(_))));
        assert!(matches!(date_to_epoch("2023-02-30", Zone::Utc), Err(ToolError::InvalidTimestamp(_))));
    }

    #[test]
    fn zone_parsing() {
        assert_eq!(Zone::parse("utc").unwrap(), Zone::Utc);
        assert_eq!(Zone::parse("Local").unwrap(), Zone::Local);
        assert_eq!(Zone::parse("-0800").unwrap(), Zone::Fixed(-28_800));
        assert_eq!(Zone::parse("+9").unwrap(), Zone::Fixed(32_400));
        assert_eq!(Zone::Fixed(19_800).label(), "+05:30");
        assert!(Zone::parse("Mars/Olympus").is_err());
        assert!(Zone::parse("+25:00").is_err());
    }

    #[test]
    fn report_lists_formats() {
        let r = epoch_to_date("1700000000", UnitHint::Auto, Zone::Utc, DateFormat::Iso8601).unwrap();
        let text = r.report("1700000000");
        assert!(text.starts_with("Input: 1700000000 (seconds)"));
        assert!(text.contains("UTC: 2023-11-14 22:13:20 UTC"));
        assert!(text.contains("Tuesday, November 14, 2023"));
        assert_eq!(format_utc_seconds(0).unwrap(), "1970-01-01 00:00:00 UTC");
    }
}
