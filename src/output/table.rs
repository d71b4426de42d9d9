//
//  apim-client
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! Utilities for rendering resources as terminal tables with `comfy_table`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use apim_client::output::TableBuilder;
//!
//! TableBuilder::new()
//!     .headers(["Field", "Value"])
//!     .row(["ID", "7a2298c4-c905-403f-8fac-38c73301631f"])
//!     .row(["Lifecycle", "PUBLISHED"])
//!     .print();
//! ```

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Creates a table with UTF-8 borders and dynamic width.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// A builder for constructing formatted tables with a fluent API.
///
/// Headers are shown in cyan when color is enabled. Color support is
/// detected from the terminal on creation; use
/// [`color`](TableBuilder::color) to override it.
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    /// Sets whether color output is enabled.
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Sets the table headers.
    ///
    /// # Notes
    ///
    /// Call [`color`](TableBuilder::color) first; header styling is applied
    /// here.
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            let cells: Vec<Cell> = headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect();
            self.table.set_header(cells);
        } else {
            self.table.set_header(headers);
        }
        self
    }

    /// Adds a single row to the table.
    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        self.table.add_row(row);
        self
    }

    /// Adds multiple rows to the table at once.
    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            self = self.row(row);
        }
        self
    }

    /// Prints the table to stdout.
    pub fn print(self) {
        println!("{}", self.table);
    }

    /// Returns the underlying table.
    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a lifecycle or workflow status with semantic colors.
///
/// - **Green**: PUBLISHED, APPROVED, UNBLOCKED, ACTIVE
/// - **Blue**: CREATED, PROTOTYPED
/// - **Yellow**: ON_HOLD, DEPRECATED, TIER_UPDATE_PENDING
/// - **Red**: BLOCKED, PROD_ONLY_BLOCKED, REJECTED, RETIRED
///
/// Matching is case-insensitive. Unknown values are returned unstyled.
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    use console::style;
    match status.to_uppercase().as_str() {
        "PUBLISHED" | "APPROVED" | "UNBLOCKED" | "ACTIVE" => style(status).green().to_string(),
        "CREATED" | "PROTOTYPED" => style(status).blue().to_string(),
        "ON_HOLD" | "DEPRECATED" | "TIER_UPDATE_PENDING" => style(status).yellow().to_string(),
        "BLOCKED" | "PROD_ONLY_BLOCKED" | "REJECTED" | "RETIRED" => {
            style(status).red().to_string()
        }
        _ => status.to_string(),
    }
}

/// Formats a boolean value as `Yes`/`No`.
pub fn format_bool(value: bool, color: bool) -> String {
    if color {
        use console::style;
        if value {
            style("Yes").green().to_string()
        } else {
            style("No").dim().to_string()
        }
    } else if value {
        "Yes".to_string()
    } else {
        "No".to_string()
    }
}

/// Truncates a string to `max_len` characters, ending in "..." when cut.
///
/// If `max_len <= 3` there is no room for the ellipsis and the string is
/// simply cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}
