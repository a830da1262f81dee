//! Rendering of diff records and directory diffs.
//!
//! Everything here is driven by an explicit [`RenderOptions`]; nothing reads
//! the environment or the terminal.

use std::fmt::Write;

use colored::{Color, Colorize};
use serde::Serialize;
use yiff_diff::{DiffRecord, DiffStatus, DiffSummary, Node, Variables};
use yiff_vcs::DirDiff;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned `name:  default  →  value` listing, colored when enabled
    Shell,
    /// Plain aligned columns with unquoted values
    Columns,
    Yaml,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub color: bool,
}

/// The references and directory a directory diff was taken over.
#[derive(Clone, Copy, Debug)]
pub struct RefRange<'a> {
    pub dir: &'a str,
    pub from: &'a str,
    pub to: &'a str,
}

#[derive(Serialize)]
struct Files<'a> {
    files: &'a DirDiff,
}

/// Render a variable-level diff.
pub fn render_records(records: &[DiffRecord], options: &RenderOptions) -> anyhow::Result<String> {
    match options.format {
        OutputFormat::Shell => Ok(shell_listing(records, options.color, "")),
        OutputFormat::Columns => Ok(column_listing(records, "")),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&Variables::new(records))?),
        OutputFormat::Json => Ok(to_json(&Variables::new(records))?),
    }
}

/// Render a directory diff between two references.
pub fn render_dir_diff(
    result: &DirDiff,
    range: &RefRange<'_>,
    options: &RenderOptions,
) -> anyhow::Result<String> {
    let listing = |records: &[DiffRecord]| match options.format {
        OutputFormat::Columns => column_listing(records, "    "),
        _ => shell_listing(records, options.color, "    "),
    };

    match options.format {
        OutputFormat::Yaml => return Ok(serde_yaml::to_string(&Files { files: result })?),
        OutputFormat::Json => return Ok(to_json(&Files { files: result })?),
        OutputFormat::Shell | OutputFormat::Columns => {}
    }

    let mut out = String::new();
    if result.is_empty() && result.skipped.is_empty() {
        out.push_str("No differences found.\n");
        return Ok(out);
    }

    writeln!(
        out,
        "YAML diff summary for {} between {} and {}:",
        range.dir, range.from, range.to
    )?;

    if !result.changed.is_empty() {
        writeln!(out, "\n{}", heading("Changed files:", options.color))?;
        for file in &result.changed {
            let summary = DiffSummary::from_records(&file.variables);
            writeln!(out, "  {} ({summary})", file.file)?;
            out.push_str(&listing(&file.variables));
        }
    }
    if !result.added.is_empty() {
        writeln!(out, "\n{}", heading("Added files:", options.color))?;
        for file in &result.added {
            writeln!(out, "  {file}")?;
        }
    }
    if !result.removed.is_empty() {
        writeln!(out, "\n{}", heading("Removed files:", options.color))?;
        for file in &result.removed {
            writeln!(out, "  {file}")?;
        }
    }
    if !result.skipped.is_empty() {
        writeln!(out, "\n{}", heading("Skipped files:", options.color))?;
        for skipped in &result.skipped {
            writeln!(out, "  {} ({})", skipped.file, skipped.reason)?;
        }
    }

    Ok(out)
}

fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

fn heading(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn status_color(status: DiffStatus) -> Color {
    match status {
        DiffStatus::Changed => Color::Yellow,
        DiffStatus::Added => Color::Green,
        DiffStatus::Removed => Color::Red,
    }
}

/// Strings in curly quotes, absent or null as `null`.
fn shell_value(node: Option<&Node>) -> String {
    match node {
        None => "null".to_string(),
        Some(Node::String(s)) => format!("“{s}”"),
        Some(other) => other.to_string(),
    }
}

/// Strings unquoted, absent or null as empty.
fn plain_value(node: Option<&Node>) -> String {
    match node {
        None | Some(Node::Null) => String::new(),
        Some(other) => other.to_string(),
    }
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn padding(text: &str, column: usize) -> String {
    " ".repeat(column.saturating_sub(width(text)))
}

struct Row {
    label: String,
    left: String,
    right: String,
    status: DiffStatus,
}

fn rows(records: &[DiffRecord], value: fn(Option<&Node>) -> String) -> Vec<Row> {
    records
        .iter()
        .map(|r| Row {
            label: format!("{}:", r.name()),
            left: value(r.default()),
            right: value(r.value()),
            status: r.status(),
        })
        .collect()
}

fn column_widths(rows: &[Row]) -> (usize, usize) {
    rows.iter().fold((0, 0), |(label, left), row| {
        (label.max(width(&row.label)), left.max(width(&row.left)))
    })
}

// Widths are measured on the uncolored text so styling never shifts columns.
fn shell_listing(records: &[DiffRecord], color: bool, indent: &str) -> String {
    let rows = rows(records, shell_value);
    let (label_width, left_width) = column_widths(&rows);

    let mut out = String::new();
    for row in &rows {
        let label_pad = padding(&row.label, label_width);
        let left_pad = padding(&row.left, left_width);
        let (label, right) = if color {
            (
                row.label.bold().to_string(),
                row.right.color(status_color(row.status)).bold().to_string(),
            )
        } else {
            (row.label.clone(), row.right.clone())
        };
        out.push_str(&format!(
            "{indent}{label}{label_pad}  {}{left_pad}  →  {right}\n",
            row.left
        ));
    }
    out
}

fn column_listing(records: &[DiffRecord], indent: &str) -> String {
    let rows = rows(records, plain_value);
    let (label_width, left_width) = column_widths(&rows);

    let mut out = String::new();
    for row in &rows {
        let line = format!(
            "{indent}{}{}  {}{}  ->  {}",
            row.label,
            padding(&row.label, label_width),
            row.left,
            padding(&row.left, left_width),
            row.right
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
