//
//  storedesk
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Every command prints through an [`OutputWriter`], in one of two formats:
//!
//! - **Table**: human-readable tables and detail views for the terminal
//! - **JSON**: pretty-printed JSON for scripting (`--json`)
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: the available formats
//! - [`OutputWriter`]: writes values, lists and status messages
//! - [`TableOutput`]: how a single value renders as a detail view
//! - [`TableRow`]: how one item of a list renders as a table row
//!
//! ## Example
//!
//! ```rust,ignore
//! use storedesk::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Table);
//! writer.write_list(&products)?;
//! writer.write_success("Product deleted");
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
    /// Tables and detail views.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// The format selected by the global `--json` flag.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// Writes command results in the selected format.
///
/// Data goes to stdout; errors and warnings go to stderr so that JSON output
/// stays parseable.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a writer, coloring output when the terminal supports it.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    pub fn table() -> Self {
        Self::new(OutputFormat::Table)
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a single value as JSON or as its detail view.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value)?,
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a list as a JSON array or as one table.
    ///
    /// An empty list prints `empty_message` in table mode and `[]` in JSON
    /// mode.
    pub fn write_list<T: Serialize + TableRow>(
        &self,
        values: &[T],
        empty_message: &str,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(&values)?,
            OutputFormat::Table if values.is_empty() => println!("{}", empty_message),
            OutputFormat::Table => {
                TableBuilder::new()
                    .color(self.color)
                    .headers(T::headers().iter().copied())
                    .rows(values.iter().map(|v| v.row(self.color)))
                    .print();
            }
        }
        Ok(())
    }

    /// Writes any serializable value as JSON, whatever the format.
    ///
    /// Used by `sd api`, whose output has no fixed shape.
    pub fn write_raw<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        write_json(value)
    }

    /// Writes an error message to stderr.
    pub fn write_error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    /// Writes a warning message to stderr.
    pub fn write_warning(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    /// Writes a plain informational line. Suppressed in JSON mode.
    pub fn write_info(&self, msg: &str) {
        if self.format == OutputFormat::Table {
            println!("{}", msg);
        }
    }

    /// Writes a success line. Suppressed in JSON mode.
    pub fn write_success(&self, msg: &str) {
        if self.format == OutputFormat::Json {
            return;
        }
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// A value with a human-readable detail view.
pub trait TableOutput {
    /// Prints the value to stdout.
    fn print_table(&self, color: bool);
}

/// A list item that renders as one table row.
pub trait TableRow {
    /// Column headers, in row order.
    fn headers() -> &'static [&'static str];

    /// The cells of this item's row.
    fn row(&self, color: bool) -> Vec<String>;
}

/// Prints a bold header with an underline.
pub fn print_header(text: &str) {
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints a `key: value` line for detail views, padding keys to `width`.
pub fn print_field(key: &str, value: &str, width: usize, color: bool) {
    let label = format!("{:<width$}", format!("{}:", key), width = width + 1);
    if color {
        println!("  {} {}", style(label).dim(), value);
    } else {
        println!("  {} {}", label, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flag() {
        assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Table);
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }
}
