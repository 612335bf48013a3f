use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// Calendar day of a landing as used for grouping.
///
/// Unparseable input is kept verbatim (trimmed) so that rows carrying the same malformed
/// value still land in the same reporting unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LandingDay {
    Day(NaiveDate),
    Unparsed(String),
    Missing,
}

impl LandingDay {
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return LandingDay::Missing;
        };

        match parse_day(value) {
            Some(day) => LandingDay::Day(day),
            None => LandingDay::Unparsed(value.to_string()),
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            LandingDay::Day(day) => Some(*day),
            _ => None,
        }
    }
}

impl Serialize for LandingDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LandingDay::Day(day) => serializer.collect_str(&day.format("%Y-%m-%d")),
            LandingDay::Unparsed(raw) => serializer.serialize_str(raw),
            LandingDay::Missing => serializer.serialize_none(),
        }
    }
}

/// Truncates an RFC 3339 timestamp, a naive timestamp or a `YYYY-MM-DD` date to its day.
/// Offsets are normalised to UTC first.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

pub(crate) fn parse_optional_day(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(parse_day)
}
