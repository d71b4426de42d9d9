//
//  apim-client
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Rendering for the `apim` command line tool. Every command result can be
//! printed in one of three formats:
//!
//! - **Table format**: Human-readable key/value tables for interactive use
//! - **JSON format**: Pretty-printed JSON for scripting and `jq`
//! - **YAML format**: For feeding results back in as request files
//!
//! ## Architecture
//!
//! - [`table`](TableBuilder): Table formatting utilities using `comfy_table`
//! - [`json`](write_json): JSON serialization using `serde_json`
//! - [`yaml`](write_yaml): YAML serialization using `serde_yaml`
//! - `resources`: [`TableOutput`] implementations for every resource type
//!
//! ## Example
//!
//! ```rust,ignore
//! use apim_client::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write(&api)?;
//! writer.write_success("API deleted");
//! ```

mod json;
mod resources;
mod table;
mod yaml;

pub use json::*;
pub use table::*;
pub use yaml::*;

use serde::Serialize;

/// The available output formats.
///
/// # Notes
///
/// The default is [`OutputFormat::Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Key/value tables with optional color.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Writes command results and status messages in the selected format.
///
/// # Example
///
/// ```rust,ignore
/// use apim_client::output::{OutputFormat, OutputWriter};
///
/// let writer = OutputWriter::new(OutputFormat::Table);
/// writer.write(&application)?;
/// writer.write_success("Application created");
/// ```
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a writer. Color support is detected from the terminal.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Writes a value to stdout using the configured output format.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON or YAML serialization fails.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value)?,
            OutputFormat::Yaml => write_yaml(value)?,
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a list of values.
    ///
    /// JSON and YAML emit a single array; tables print one section per value.
    pub fn write_list<T: Serialize + TableOutput>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(&values)?,
            OutputFormat::Yaml => write_yaml(&values)?,
            OutputFormat::Table => {
                for value in values {
                    value.print_table(self.color);
                }
            }
        }
        Ok(())
    }

    /// Writes a bare value such as an id or URL.
    ///
    /// JSON and YAML wrap it as `{"<key>": "<value>"}`.
    pub fn write_value(&self, key: &str, value: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(&serde_json::json!({ key: value }))?,
            OutputFormat::Yaml => write_yaml(&serde_json::json!({ key: value }))?,
            OutputFormat::Table => println!("{}", value),
        }
        Ok(())
    }

    /// Writes a success message.
    ///
    /// Only shown in table mode.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.format != OutputFormat::Table {
            return;
        }
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// A type that can be rendered as a human-readable table.
///
/// # Example
///
/// ```rust,ignore
/// use apim_client::output::{print_header, TableOutput, TableBuilder};
///
/// impl TableOutput for Application {
///     fn print_table(&self, color: bool) {
///         print_header(&self.name);
///         TableBuilder::new()
///             .color(color)
///             .headers(["Field", "Value"])
///             .row(["ID", self.application_id.as_str()])
///             .print();
///     }
/// }
/// ```
pub trait TableOutput {
    /// Renders the value. `color` says whether styling may be applied.
    fn print_table(&self, color: bool);
}

/// Prints a bold header with a dashed underline.
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints a `key: value` line, dimming the key when color is enabled.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
