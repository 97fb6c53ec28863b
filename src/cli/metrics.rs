//
//  bitly-cli
//  cli/metrics.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Time-window arguments and rendering shared by the metrics commands.

use chrono::{DateTime, FixedOffset};
use clap::Args;
use console::style;

use crate::api::common::{ClickMetric, CountMetric, Metrics, MetricsQuery, TimeUnit};
use crate::output::{format_count, or_dash, print_field, print_header, TableBuilder, TableOutput};

use super::parse_datetime;

/// Window over which metrics are aggregated
#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// Unit to aggregate by (minute, hour, day, week, month)
    #[arg(long, short = 'u')]
    pub unit: Option<TimeUnit>,

    /// Number of units to cover; -1 for all time
    #[arg(long, allow_negative_numbers = true)]
    pub units: Option<i64>,

    /// End of the window (YYYY-MM-DD or RFC 3339); defaults to now
    #[arg(long, value_parser = parse_datetime)]
    pub until: Option<DateTime<FixedOffset>>,

    /// Maximum number of rows
    #[arg(long, short = 's')]
    pub size: Option<u32>,
}

impl WindowArgs {
    pub fn to_query(&self) -> MetricsQuery {
        let mut query = MetricsQuery::new();
        query.unit = self.unit;
        query.units = self.units;
        query.size = self.size;
        match self.until {
            Some(until) => query.unit_reference_at(until),
            None => query,
        }
    }
}

/// One line describing the window a metrics response covers.
pub(crate) fn describe_window(unit: &str, units: i64, unit_reference: &str) -> String {
    let span = match units {
        -1 => "all time".to_string(),
        n if unit.is_empty() => n.to_string(),
        1 => format!("1 {}", unit),
        n => format!("{} {}s", n, unit),
    };
    if unit_reference.is_empty() {
        span
    } else {
        format!("{} until {}", span, unit_reference)
    }
}

impl TableOutput for Metrics<ClickMetric> {
    fn print_table(&self, color: bool) {
        print_header(&format!("Clicks by {}", or_dash(&self.facet)));
        print_field("Window", &describe_window(&self.unit, self.units, &self.unit_reference), color);
        let total = format_count(self.total_clicks());
        if color {
            print_field("Total", &style(total).bold().to_string(), color);
        } else {
            print_field("Total", &total, color);
        }
        println!();

        TableBuilder::new()
            .color(color)
            .headers(["Value", "Clicks"])
            .rows(
                self.metrics
                    .iter()
                    .map(|m| vec![or_dash(&m.value).to_string(), format_count(m.clicks)]),
            )
            .print();
    }
}

impl TableOutput for Metrics<CountMetric> {
    fn print_table(&self, color: bool) {
        print_header(&format!("Counts by {}", or_dash(&self.facet)));
        print_field("Window", &describe_window(&self.unit, self.units, &self.unit_reference), color);
        print_field("Total", &format_count(self.total()), color);
        println!();

        TableBuilder::new()
            .color(color)
            .headers(["Period", "Count"])
            .rows(
                self.metrics
                    .iter()
                    .map(|m| vec![or_dash(&m.key).to_string(), format_count(m.value)]),
            )
            .print();
    }
}
