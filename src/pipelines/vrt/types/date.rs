/*! Dates with the null-date encoding.

Missing dates are written as `0000-00-00`, `0000-00` and `0000`.
A date that is present but unparsable is an error under [DatePolicy::Strict]
and a null date under [DatePolicy::Lenient].
!*/
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::Error;

pub const NULL_DATE: &str = "0000-00-00";
pub const NULL_YEARMONTH: &str = "0000-00";
pub const NULL_YEAR: &str = "0000";

/// What to do with unparsable dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePolicy {
    #[default]
    Strict,
    Lenient,
}

/// `date`, `yearmonth` and `year` attribute values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParts {
    date: String,
    yearmonth: String,
    year: String,
}

impl DateParts {
    pub fn null() -> Self {
        Self {
            date: NULL_DATE.to_string(),
            yearmonth: NULL_YEARMONTH.to_string(),
            year: NULL_YEAR.to_string(),
        }
    }

    pub fn from_date(d: NaiveDate) -> Self {
        Self {
            date: d.format("%Y-%m-%d").to_string(),
            yearmonth: d.format("%Y-%m").to_string(),
            year: d.format("%Y").to_string(),
        }
    }

    /// Parse a `YYYY-MM-DD` date.
    pub fn parse_date(raw: Option<&str>, policy: DatePolicy) -> Result<Self, Error> {
        Self::parse_with(raw, policy, |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }

    /// Parse an ISO-8601 timestamp.
    ///
    /// Accepts RFC 3339 timestamps, naive date-times separated by `T` or a space
    /// (with optional fractional seconds) and plain dates.
    pub fn parse_timestamp(raw: Option<&str>, policy: DatePolicy) -> Result<Self, Error> {
        Self::parse_with(raw, policy, |s| {
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.date_naive())
                .ok()
                .or_else(|| {
                    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
                        .iter()
                        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                        .map(|dt| dt.date())
                })
                .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        })
    }

    fn parse_with<F>(raw: Option<&str>, policy: DatePolicy, parse: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<NaiveDate>,
    {
        let raw = match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw,
            None => return Ok(Self::null()),
        };

        match (parse(raw), policy) {
            (Some(d), _) => Ok(Self::from_date(d)),
            (None, DatePolicy::Lenient) => Ok(Self::null()),
            (None, DatePolicy::Strict) => Err(Error::MalformedDate(raw.to_string())),
        }
    }

    pub fn is_null(&self) -> bool {
        self.date == NULL_DATE
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn yearmonth(&self) -> &str {
        &self.yearmonth
    }

    pub fn year(&self) -> &str {
        &self.year
    }
}
