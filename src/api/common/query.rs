//
//  bitly-cli
//  api/common/query.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Query string encoding for optional filters
//!
//! Filters hold every field as an `Option`. A field contributes a query
//! pair only when it is `Some`, so zero values (`size=0`, `page=0`) can be
//! requested explicitly and a default filter renders an empty query.
//!
//! ```rust
//! use bitly_cli::api::common::{MetricsQuery, TimeUnit};
//!
//! let query = MetricsQuery::new().unit(TimeUnit::Day).units(-1).size(0);
//! assert_eq!(query.to_query().encode(), "unit=day&units=-1&size=0");
//! assert!(MetricsQuery::default().to_query().is_empty());
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Ordered query pairs.
///
/// Keys may repeat; pairs are encoded in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one pair.
    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds a pair only when `value` is set.
    pub fn push_opt<T: ToString>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Adds one pair per element, keeping the caller's order.
    pub fn push_each<I, T>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        for value in values {
            self.push(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns every value recorded for `key`, in order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Form-urlencodes the pairs (`a=1&b=x+y`).
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish()
    }
}

/// The time unit Bitly aggregates metrics by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minute" => Ok(Self::Minute),
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(format!(
                "invalid time unit '{}', expected one of: minute, hour, day, week, month",
                other
            )),
        }
    }
}

/// The unit/window/size filter accepted by every metrics endpoint.
///
/// | Field | Query key | Meaning |
/// |-------|-----------|---------|
/// | `unit` | `unit` | Aggregation unit |
/// | `units` | `units` | Number of units to cover, `-1` for all time |
/// | `unit_reference` | `unit_reference` | ISO-8601 end of the window, defaults to now remotely |
/// | `size` | `size` | Maximum number of rows |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsQuery {
    pub unit: Option<TimeUnit>,
    pub units: Option<i64>,
    pub unit_reference: Option<String>,
    pub size: Option<u32>,
}

impl MetricsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unit(mut self, unit: TimeUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn units(mut self, units: i64) -> Self {
        self.units = Some(units);
        self
    }

    /// Sets the window end from a raw ISO-8601 string.
    pub fn unit_reference(mut self, reference: impl Into<String>) -> Self {
        self.unit_reference = Some(reference.into());
        self
    }

    /// Sets the window end from a timestamp, formatted the way Bitly
    /// expects (`2006-01-02T15:04:05-0700`).
    pub fn unit_reference_at<Tz>(self, at: DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let formatted = at.format("%Y-%m-%dT%H:%M:%S%z").to_string();
        self.unit_reference(formatted)
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        query
            .push_opt("unit", self.unit)
            .push_opt("units", self.units)
            .push_opt("unit_reference", self.unit_reference.as_deref())
            .push_opt("size", self.size);
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_default_metrics_query_is_empty() {
        let query = MetricsQuery::default().to_query();
        assert!(query.is_empty());
        assert_eq!(query.encode(), "");
    }

    #[test]
    fn test_zero_values_are_sent() {
        let query = MetricsQuery::new().units(0).size(0).to_query();
        assert_eq!(query.encode(), "units=0&size=0");
    }

    #[test]
    fn test_one_pair_per_set_field() {
        let query = MetricsQuery::new()
            .unit(TimeUnit::Week)
            .unit_reference("2024-01-01T00:00:00+0000")
            .to_query();
        assert_eq!(query.len(), 2);
        assert_eq!(query.encode(), "unit=week&unit_reference=2024-01-01T00%3A00%3A00%2B0000");
    }

    #[test]
    fn test_unit_reference_at_formats_offset() {
        let at = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 5, 10, 30, 0)
            .unwrap();
        let query = MetricsQuery::new().unit_reference_at(at);
        assert_eq!(query.unit_reference.as_deref(), Some("2024-03-05T10:30:00+0200"));

        let utc = Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).unwrap();
        let query = MetricsQuery::new().unit_reference_at(utc);
        assert_eq!(query.unit_reference.as_deref(), Some("2024-03-05T08:30:00+0000"));
    }

    #[test]
    fn test_push_each_keeps_order() {
        let mut query = Query::new();
        query.push_each("tags", ["zeta", "alpha", "zeta"]);
        assert_eq!(query.get_all("tags"), vec!["zeta", "alpha", "zeta"]);
        assert_eq!(query.encode(), "tags=zeta&tags=alpha&tags=zeta");
    }

    #[test]
    fn test_time_unit_parse() {
        assert_eq!("Day".parse::<TimeUnit>().unwrap(), TimeUnit::Day);
        assert!("fortnight".parse::<TimeUnit>().is_err());
        assert_eq!(TimeUnit::Month.to_string(), "month");
    }
}
