//! Output formatting utilities for the CLI
//!
//! Tables, colored text and JSON printing shared by the command handlers.

use crate::OutputFormat;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, presets};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Style configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputStyle {
    /// Whether to use colors in output
    pub use_color: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            // Check if NO_COLOR env var is set
            use_color: std::env::var("NO_COLOR").is_err(),
        }
    }
}

impl OutputStyle {
    /// Create a new output style
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors in output
    #[must_use]
    pub fn no_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

/// Format a success message
pub fn format_success(text: &str, style: &OutputStyle) -> String {
    if style.use_color {
        text.green().to_string()
    } else {
        text.to_string()
    }
}

/// Format a warning message
pub fn format_warning(text: &str, style: &OutputStyle) -> String {
    if style.use_color {
        text.yellow().to_string()
    } else {
        text.to_string()
    }
}

/// Format an error message
pub fn format_error(text: &str, style: &OutputStyle) -> String {
    if style.use_color {
        text.red().to_string()
    } else {
        text.to_string()
    }
}

/// Format a key-value pair
pub fn format_key_value(key: &str, value: &str, style: &OutputStyle) -> String {
    if style.use_color {
        format!("{}: {}", key.cyan(), value)
    } else {
        format!("{key}: {value}")
    }
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table
}

/// Style a table header cell
pub fn header_cell(text: &str, style: &OutputStyle) -> Cell {
    let cell = Cell::new(text).add_attribute(Attribute::Bold);
    if style.use_color {
        cell.fg(Color::Cyan).set_alignment(CellAlignment::Left)
    } else {
        cell.set_alignment(CellAlignment::Left)
    }
}

/// Style a regular cell
pub fn regular_cell(text: &str) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Left)
}

/// Style a numeric cell (right-aligned)
pub fn numeric_cell(text: &str) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Print a section header
pub fn print_section_header(title: &str, style: &OutputStyle) {
    if style.use_color {
        println!("\n{}", title.bold().bright_blue());
        println!("{}", "═".repeat(title.chars().count()).bright_blue());
    } else {
        println!("\n{title}");
        println!("{}", "=".repeat(title.chars().count()));
    }
}

/// Format a count badge (e.g., "(42 items)")
pub fn format_count_badge(count: usize, item_name: &str, style: &OutputStyle) -> String {
    let text = if count == 1 {
        format!("({count} {item_name})")
    } else {
        format!("({count} {item_name}s)")
    };

    if style.use_color {
        text.dimmed().to_string()
    } else {
        text
    }
}

/// Print `value` as JSON when a JSON format is selected.
///
/// Returns `false` for text formats so the caller can fall through to its
/// human-readable rendering.
pub fn print_json<T: Serialize>(value: &T, format: OutputFormat) -> serde_json::Result<bool> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Text => return Ok(false),
    };
    println!("{output}");
    Ok(true)
}
