//
//  stash-client
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Rendering of command results, either as human-readable tables or as JSON
//! for scripts (`--json`).
//!
//! - [`table`]: table construction using `comfy_table`
//! - [`json`]: JSON serialization using `serde_json`
//!
//! Records implement [`TableOutput`] for detail views and [`TableRow`] for
//! list views; JSON output serializes the record itself.
//!
//! ```rust,ignore
//! use stash_client::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write(&repository)?;
//! writer.write_list(&branches, "No branches found")?;
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

use console::style;
use serde::Serialize;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tables and labelled fields, colored when the terminal supports it.
    #[default]
    Table,

    /// Pretty-printed JSON.
    Json,
}

/// Writes records and status messages in the selected format.
///
/// Status messages go to stderr in JSON mode so stdout stays parseable.
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

    /// Picks JSON when `json` is set, tables otherwise.
    pub fn from_flag(json: bool) -> Self {
        Self::new(if json { OutputFormat::Json } else { OutputFormat::Table })
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a single record.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value)?,
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a list of records as one table, or `empty` when there are none.
    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T], empty: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(&values)?,
            OutputFormat::Table if values.is_empty() => self.write_info(empty),
            OutputFormat::Table => TableBuilder::new()
                .color(self.color)
                .headers(T::HEADERS.iter().copied())
                .rows(values.iter().map(|value| value.row(self.color)))
                .print(),
        }
        Ok(())
    }

    pub fn write_error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    pub fn write_warning(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_info(&self, msg: &str) {
        match self.format {
            OutputFormat::Json => eprintln!("{}", msg),
            OutputFormat::Table => println!("{}", msg),
        }
    }

    /// Reports a completed mutation. In JSON mode prints `{"success": true, "message": ...}`.
    pub fn write_success(&self, msg: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(&serde_json::json!({ "success": true, "message": msg }))?,
            OutputFormat::Table if self.color => println!("{} {}", style("✓").green().bold(), msg),
            OutputFormat::Table => println!("✓ {}", msg),
        }
        Ok(())
    }
}

/// A record rendered as a block of labelled fields.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// A record rendered as one row of a list table.
pub trait TableRow {
    /// Column headers, one per cell returned by [`row`](Self::row).
    const HEADERS: &'static [&'static str];

    fn row(&self, color: bool) -> Vec<String>;
}

/// Prints a bold header line with an underline.
pub fn print_header(text: &str) {
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints `key: value`, dimming the key when color is on.
pub fn print_field(key: &str, value: &str, color: bool) {
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flag() {
        assert_eq!(OutputWriter::from_flag(true).format(), OutputFormat::Json);
        assert_eq!(OutputWriter::from_flag(false).format(), OutputFormat::Table);
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }
}
