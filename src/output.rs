//! Output formatting and persistence for dashboards.
//!
//! Supports pretty-printing, JSON serialization, terminal tables and CSV
//! export of the individual summary tables.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use tracing::{debug, info};

use crate::analyzers::types::{
    DayTypeSummary, HourTypeSummary, MonthlySummary, Segment, SegmentStats,
};
use crate::dashboard::Dashboard;

const BAR_WIDTH: usize = 40;

/// Logs the dashboard using Rust's debug pretty-print format.
pub fn print_pretty(dashboard: &Dashboard) {
    debug!("{:#?}", dashboard);
}

/// Logs the dashboard as pretty-printed JSON.
pub fn print_json(dashboard: &Dashboard) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(dashboard)?);
    Ok(())
}

/// Formats a count with comma thousands separators, e.g. `1,234,567`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Rounds to the nearest whole rental before formatting.
pub fn format_mean(value: f64) -> String {
    format_count(value.round() as u64)
}

/// Text bar proportional to `value / max`.
fn bar(value: u64, max: u64) -> String {
    if max == 0 {
        return String::new();
    }
    let width = ((value as f64 / max as f64) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(width)
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Total Rental")]
    total: String,
    #[tabled(rename = "Highest Rental")]
    max: String,
    #[tabled(rename = "Lowest Rental")]
    min: String,
    #[tabled(rename = "Average Rental")]
    mean: String,
}

fn or_no_data<T>(value: Option<T>, format: impl Fn(T) -> String) -> String {
    value.map(format).unwrap_or_else(|| "no data".to_string())
}

impl MetricRow {
    fn from_stats(stats: &SegmentStats) -> Self {
        MetricRow {
            total: or_no_data(stats.total, format_count),
            max: or_no_data(stats.max, format_count),
            min: or_no_data(stats.min, format_count),
            mean: or_no_data(stats.mean, format_mean),
        }
    }
}

#[derive(Tabled)]
struct ChartRow {
    #[tabled(rename = "")]
    label: String,
    #[tabled(rename = "Rentals")]
    count: String,
    #[tabled(rename = "")]
    bar: String,
}

fn chart_rows(entries: impl IntoIterator<Item = (String, u64)>) -> Vec<ChartRow> {
    let entries: Vec<(String, u64)> = entries.into_iter().collect();
    let max = entries.iter().map(|(_, count)| *count).max().unwrap_or(0);

    entries
        .into_iter()
        .map(|(label, count)| ChartRow {
            label,
            bar: bar(count, max),
            count: format_count(count),
        })
        .collect()
}

fn styled<T: Tabled>(rows: Vec<T>, color: bool) -> String {
    let mut table = Table::new(rows);
    table.with(Style::modern());
    if color {
        table.with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    }
    table.to_string()
}

/// Wraps `text` in the given ANSI SGR code, or returns it unchanged when
/// colour is off.
fn paint(text: &str, sgr: &str, color: bool) -> String {
    if color {
        format!("\x1b[{sgr}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn section(out: &mut String, title: &str, body: &str, color: bool) {
    out.push_str(&format!("\n{}\n{body}\n", paint(title, "1;36", color)));
}

/// Renders the dashboard as terminal tables with proportional text bars.
///
/// Day-type charts are limited to the `top` highest rows. ANSI colour is only
/// emitted when `color` is set, which callers tie to stdout being a terminal.
pub fn render_dashboard(dashboard: &Dashboard, top: usize, color: bool) -> String {
    let year = dashboard.year;
    let title = format!("Bike Rental Dashboard {year}");
    let mut out = format!("{}\n", paint(&title, "1", color));

    if dashboard.is_empty() {
        out.push_str(&format!("\nNo rentals recorded in {year}.\n"));
    }

    for segment in Segment::ALL {
        let view = dashboard.segment(segment);
        section(
            &mut out,
            &format!("Number of Rental by {} User in {year}", segment.label()),
            &styled(vec![MetricRow::from_stats(&view.stats)], color),
            color,
        );
    }

    for segment in Segment::ALL {
        let rows = chart_rows(
            dashboard
                .monthly
                .iter()
                .map(|m| (m.month_name.clone(), segment.count(m))),
        );
        section(
            &mut out,
            &format!("Monthly Rental in {year}, by {} User", segment.label()),
            &styled(rows, color),
            color,
        );
    }

    for segment in Segment::ALL {
        let rows = chart_rows(
            dashboard
                .segment(segment)
                .day_types
                .iter()
                .take(top)
                .map(|d| (d.day_type.clone(), d.count)),
        );
        section(
            &mut out,
            &format!(
                "Highest Rental per Day Type in {year}, by {} User",
                segment.label()
            ),
            &styled(rows, color),
            color,
        );
    }

    for segment in Segment::ALL {
        let rows = chart_rows(
            dashboard
                .segment(segment)
                .hour_types
                .iter()
                .map(|h| (h.hour_type.clone(), h.count)),
        );
        section(
            &mut out,
            &format!(
                "Highest Rental per Hour Type in {year}, by {} User",
                segment.label()
            ),
            &styled(rows, color),
            color,
        );
    }

    out
}

/// Writes `headers` followed by `rows` to a new CSV file at `path`.
///
/// The header row is written even when `rows` is empty.
pub fn write_csv<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV");

    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Exports each summary table to CSV and the whole dashboard to JSON inside
/// `dir`, creating it if needed. Returns the paths written.
pub fn export_dashboard(dashboard: &Dashboard, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let mut written = Vec::new();

    let path = dir.join("monthly.csv");
    write_csv(&path, &MonthlySummary::COLUMNS, &dashboard.monthly)?;
    written.push(path);

    for segment in Segment::ALL {
        let view = dashboard.segment(segment);

        let path = dir.join(format!("day_type_{segment}.csv"));
        write_csv(&path, &DayTypeSummary::COLUMNS, &view.day_types)?;
        written.push(path);

        let path = dir.join(format!("hour_type_{segment}.csv"));
        write_csv(&path, &HourTypeSummary::COLUMNS, &view.hour_types)?;
        written.push(path);
    }

    let path = dir.join("dashboard.json");
    fs::write(&path, serde_json::to_vec_pretty(dashboard)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    written.push(path);

    info!(dir = %dir.display(), files = written.len(), "Dashboard exported");
    Ok(written)
}
