//! Immutable run configuration.
//!
//! Built once at startup and handed to the prompt loop and the loader. The
//! allow-listed answers for each prompt live here rather than in globals so
//! tests can construct their own.

use std::path::PathBuf;

use chrono::{Month, Weekday};

use crate::domain::{City, DayFilter, Filter, MonthFilter, weekday_name};

/// Default number of rows printed by the trip preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Months that the datasets cover and the month prompt accepts.
pub const FILTER_MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

pub const FILTER_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Allow-list for a single prompt: normalized answer text → value.
#[derive(Debug, Clone)]
pub struct Vocabulary<T> {
    subject: &'static str,
    entries: Vec<(String, T)>,
}

impl<T: Copy> Vocabulary<T> {
    pub fn new(subject: &'static str, entries: Vec<(String, T)>) -> Self {
        Self { subject, entries }
    }

    /// What the prompt asks for ("city", "month", ...), used in messages.
    pub fn subject(&self) -> &'static str {
        self.subject
    }

    /// Look up an already-normalized answer.
    pub fn lookup(&self, answer: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(label, _)| label == answer)
            .map(|(_, value)| *value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn city_vocabulary() -> Vocabulary<City> {
    Vocabulary::new(
        "city",
        City::ALL
            .iter()
            .map(|city| (city.name().to_string(), *city))
            .collect(),
    )
}

pub fn month_vocabulary() -> Vocabulary<MonthFilter> {
    let mut entries: Vec<(String, MonthFilter)> = FILTER_MONTHS
        .iter()
        .map(|m| (m.name().to_ascii_lowercase(), Filter::Only(*m)))
        .collect();
    entries.push(("all".to_string(), Filter::All));
    Vocabulary::new("month", entries)
}

pub fn day_vocabulary() -> Vocabulary<DayFilter> {
    let mut entries: Vec<(String, DayFilter)> = FILTER_DAYS
        .iter()
        .map(|d| (weekday_name(*d).to_ascii_lowercase(), Filter::Only(*d)))
        .collect();
    entries.push(("all".to_string(), Filter::All));
    Vocabulary::new("day of week", entries)
}

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Directory containing the per-city CSV files.
    pub data_dir: PathBuf,
    pub preview_rows: usize,
    pub cities: Vocabulary<City>,
    pub months: Vocabulary<MonthFilter>,
    pub days: Vocabulary<DayFilter>,
}

impl ExplorerConfig {
    pub fn new(data_dir: impl Into<PathBuf>, preview_rows: usize) -> Self {
        Self {
            data_dir: data_dir.into(),
            preview_rows,
            cities: city_vocabulary(),
            months: month_vocabulary(),
            days: day_vocabulary(),
        }
    }

    pub fn city_path(&self, city: City) -> PathBuf {
        self.data_dir.join(city.file_name())
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self::new(".", DEFAULT_PREVIEW_ROWS)
    }
}
