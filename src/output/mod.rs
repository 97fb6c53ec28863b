//
//  bitly-cli
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Output formatting for the Bitly CLI. Two formats are supported:
//!
//! - **Table format**: human-readable output for interactive terminal use
//! - **JSON format**: the decoded API record, pretty-printed, for scripting
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: the available output formats
//! - [`OutputWriter`]: main entry point for writing formatted output
//! - [`TableOutput`]: implemented by records that know how to draw themselves
//!
//! ## Example
//!
//! ```rust,ignore
//! use bitly_cli::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write(&user)?;
//! writer.write_success("Default group updated");
//! ```

mod table;

pub use table::*;

use std::str::FromStr;

use serde::Serialize;

/// The available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tables and key/value listings, colored when the terminal allows.
    #[default]
    Table,
    /// Pretty-printed JSON of the decoded record.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{}' (expected table or json)", other)),
        }
    }
}

/// Writes records and status messages in one [`OutputFormat`].
///
/// Everything goes to stdout; errors are reported by the caller. Color is detected
/// once at construction and is off when output is piped or `NO_COLOR` is
/// set.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes one record.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", to_json(value)?),
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a slice of records as one JSON array or one table.
    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", to_json(values)?),
            OutputFormat::Table => TableBuilder::new()
                .color(self.color)
                .headers(T::headers().iter().copied())
                .rows(values.iter().map(|v| v.row(self.color)))
                .print(),
        }
        Ok(())
    }

    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    /// Writes a success message. Suppressed in JSON mode so stdout stays
    /// parseable.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        match self.format {
            OutputFormat::Json => {}
            OutputFormat::Table if self.color => {
                println!("{} {}", style("✓").green().bold(), msg)
            }
            OutputFormat::Table => println!("✓ {}", msg),
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// A record that renders itself as a detail view.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// A record that renders as one row of a list table.
pub trait TableRow {
    /// Column titles, in the order [`TableRow::row`] fills them.
    fn headers() -> &'static [&'static str];

    fn row(&self, color: bool) -> Vec<String>;
}

/// Prints a bold header with a dashed underline.
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints `key: value`, dimming the key when color is enabled.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
