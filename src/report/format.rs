//! Console text for the reporters and the trip preview.
//!
//! All formatting lives here so the statistics code stays free of wording and
//! layout, and output changes stay localized.

use std::time::Duration;

use crate::domain::{FilterSelection, OptionalColumn, TripTable, month_display};

use super::{Attribute, BirthYearStats, DurationStats, StationStats, TimeStats, UserStats};

/// Rule printed after each section.
pub const SEPARATOR: &str = "----------------------------------------";

/// Printed instead of aggregates when the filters leave no rows.
pub const NO_DATA: &str = "No trips match these filters.";

/// Printed when trips match but a user column is empty for all of them.
pub const NO_VALUES: &str = "no values recorded for these trips";

/// Widest cell shown in the preview table.
const PREVIEW_CELL_WIDTH: usize = 28;

pub fn format_load_summary(table: &TripTable, selection: &FilterSelection) -> String {
    let mut out = format!(
        "Loaded {} of {} trips for {} (month: {}, day: {}).",
        table.len(),
        table.rows_loaded,
        table.city.display_name(),
        selection.month.label(),
        selection.day.label(),
    );
    if !table.row_errors.is_empty() {
        out.push_str(&format!(
            "\nSkipped {} malformed row(s) in {}.",
            table.row_errors.len(),
            table.source.display()
        ));
    }
    out
}

pub fn format_time_stats(stats: Option<&TimeStats>) -> String {
    let Some(stats) = stats else {
        return NO_DATA.to_string();
    };

    let mut out = String::new();
    out.push_str(&format!(
        "The most common month for those filters is {}\n",
        month_display(stats.month.value)
    ));
    out.push_str(&format!("The most common day for those filters is {}\n", stats.day.value));
    out.push_str(&format!(
        "The most common start time for those filters is {}\n",
        stats.start_time.value
    ));
    out.push_str(&format!(
        "The most common start hour for those filters is {:02}:00",
        stats.start_hour.value
    ));
    out
}

pub fn format_station_stats(stats: Option<&StationStats>) -> String {
    let Some(stats) = stats else {
        return NO_DATA.to_string();
    };

    let (from, to) = &stats.trip.value;
    let mut out = String::new();
    out.push_str(&format!(
        "The most common start station for those filters is {}\n",
        stats.start_station.value
    ));
    out.push_str(&format!(
        "The most common end station for those filters is {}\n",
        stats.end_station.value
    ));
    out.push_str(&format!(
        "The most common trip for those filters is {from} -> {to} with a count of {}",
        stats.trip.count
    ));
    out
}

pub fn format_duration_stats(stats: Option<&DurationStats>) -> String {
    let Some(stats) = stats else {
        return NO_DATA.to_string();
    };

    format!(
        "The total travel time for these filters is {} seconds ({})\n\
         The average travel time for these filters is {} seconds ({})",
        fmt_seconds(stats.total),
        fmt_span(stats.total),
        fmt_seconds(stats.mean),
        fmt_span(stats.mean),
    )
}

pub fn format_user_stats(stats: &UserStats) -> String {
    let mut sections = vec![
        format_categories(OptionalColumn::UserType, "user types", &stats.user_types),
        format_categories(OptionalColumn::Gender, "gender", &stats.genders),
    ];

    let birth_year = OptionalColumn::BirthYear.header();
    sections.push(match &stats.birth_years {
        Attribute::Unavailable => format!("{birth_year} is not available for this city"),
        Attribute::NoData => format!("{birth_year}: {NO_DATA}"),
        Attribute::Blank => format!("{birth_year}: {NO_VALUES}"),
        Attribute::Available(years) => format_birth_years(years),
    });

    sections.join("\n")
}

fn format_categories(
    column: OptionalColumn,
    noun: &str,
    counts: &Attribute<Vec<(String, usize)>>,
) -> String {
    let column = column.header();
    let counts = match counts {
        Attribute::Unavailable => return format!("{column} is not available for this city"),
        Attribute::NoData => return format!("{column}: {NO_DATA}"),
        Attribute::Blank => return format!("{column}: {NO_VALUES}"),
        Attribute::Available(counts) => counts,
    };

    let width = counts.iter().map(|(c, _)| c.chars().count()).max().unwrap_or(0);
    let mut out = format!("Counts of {noun}:");
    for (category, n) in counts {
        out.push_str(&format!("\n  {category:<width$}  {n}"));
    }
    out
}

fn format_birth_years(years: &BirthYearStats) -> String {
    format!(
        "Most recent year of birth: {}\nEarliest year of birth: {}\nMost common year of birth: {}",
        years.most_recent, years.earliest, years.most_common.value
    )
}

pub fn format_elapsed(elapsed: Duration) -> String {
    format!("This took {:.6} seconds.", elapsed.as_secs_f64())
}

/// Render the first `rows` trips as an aligned text table.
pub fn format_preview(table: &TripTable, rows: usize) -> String {
    if table.is_empty() {
        return NO_DATA.to_string();
    }

    let columns = table.columns;
    let mut header = vec!["#", "Start Time"];
    if columns.end_time {
        header.push("End Time");
    }
    header.extend(["Trip Duration", "Start Station", "End Station"]);
    if columns.user_type {
        header.push("User Type");
    }
    if columns.gender {
        header.push("Gender");
    }
    if columns.birth_year {
        header.push("Birth Year");
    }
    header.extend(["month", "day_of_week"]);

    let body: Vec<Vec<String>> = table
        .trips
        .iter()
        .take(rows)
        .map(|t| {
            let mut row = vec![t.index.to_string(), t.start_time.to_string()];
            if columns.end_time {
                row.push(t.end_time.map(|e| e.to_string()).unwrap_or_default());
            }
            row.extend([
                fmt_seconds(t.trip_duration),
                t.start_station.clone(),
                t.end_station.clone(),
            ]);
            if columns.user_type {
                row.push(t.user_type.clone().unwrap_or_default());
            }
            if columns.gender {
                row.push(t.gender.clone().unwrap_or_default());
            }
            if columns.birth_year {
                row.push(t.birth_year.map(|y| y.to_string()).unwrap_or_default());
            }
            row.push(t.month.to_string());
            row.push(t.day_name().to_string());
            row
        })
        .collect();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            body.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
                .min(PREVIEW_CELL_WIDTH)
        })
        .collect();

    let mut out = format!("Showing {} of {} trips:\n", body.len(), table.len());
    let header_cells: Vec<String> = header.iter().map(|h| h.to_string()).collect();
    out.push_str(&format_row(&header_cells, &widths));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format_row(&rule, &widths));
    for row in &body {
        out.push('\n');
        out.push_str(&format_row(row, &widths));
    }
    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let parts: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<w$}", truncate(cell, *w), w = *w))
        .collect();
    parts.join("  ").trim_end().to_string()
}

/// Seconds without a fractional part when there is none.
fn fmt_seconds(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

/// Human-readable span such as `1d 02h 03m 04s`.
fn fmt_span(seconds: f64) -> String {
    let Some(span) = chrono::Duration::try_milliseconds((seconds.abs() * 1000.0).round() as i64) else {
        return "-".to_string();
    };
    let sign = if seconds < 0.0 { "-" } else { "" };

    let days = span.num_days();
    let hours = span.num_hours() % 24;
    let minutes = span.num_minutes() % 60;
    let secs = span.num_seconds() % 60;
    if days > 0 {
        format!("{sign}{days}d {hours:02}h {minutes:02}m {secs:02}s")
    } else {
        format!("{sign}{hours:02}h {minutes:02}m {secs:02}s")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
