//
//  bitly-cli
//  api/common/metrics.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Metrics records shared by the bitlink, group and organization clients.
//!
//! Bitly reports most metrics as a facet (what was counted), the time window
//! it covers, and an ordered list of rows. Click facets (countries,
//! referrers, referring networks) use `value`/`clicks` rows while shorten
//! counts use `key`/`value` rows, so [`Metrics`] is generic over the row.

use serde::{Deserialize, Serialize};

/// A metrics response: the facet, its window, and the ordered rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics<M> {
    /// ISO-8601 timestamp marking the end of the window.
    pub unit_reference: String,

    /// Rows in the order Bitly returned them.
    pub metrics: Vec<M>,

    /// Number of `unit`s the window covers (`-1` means all time).
    pub units: i64,

    pub unit: String,

    /// The dimension counted, e.g. `countries` or `shorten_counts`.
    pub facet: String,
}

impl<M> Metrics<M> {
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl Metrics<ClickMetric> {
    /// Sum of clicks over every row.
    pub fn total_clicks(&self) -> i64 {
        self.metrics.iter().map(|m| m.clicks).sum()
    }
}

impl Metrics<CountMetric> {
    /// Sum of every row's count.
    pub fn total(&self) -> i64 {
        self.metrics.iter().map(|m| m.value).sum()
    }
}

/// A click facet row, e.g. `{"value": "US", "clicks": 12}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickMetric {
    pub value: String,
    pub clicks: i64,
}

/// A counted row keyed by time bucket, e.g. `{"key": "2024-01-01T00:00:00+0000", "value": 3}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountMetric {
    pub key: String,
    pub value: i64,
}
