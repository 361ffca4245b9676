//! Descriptive statistics over a filtered trip table.
//!
//! Each reporter is a pure function of the table; formatting lives in
//! `format` so the numbers can be tested without matching console text.
//! Every function returns "no data" (`None` / `Attribute::NoData`) for an
//! empty table instead of aggregating.

use chrono::{NaiveDateTime, Timelike};

use crate::domain::{OptionalColumn, TripRecord, TripTable};

pub mod aggregate;
pub mod format;

pub use format::*;

use aggregate::{mode, value_counts};

/// Label used for empty cells in category counts.
pub const MISSING_CATEGORY: &str = "(missing)";

/// A most-frequent value and how many rows carried it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frequent<T> {
    pub value: T,
    pub count: usize,
}

impl<T> Frequent<T> {
    fn from_pair((value, count): (T, usize)) -> Self {
        Self { value, count }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    /// Month number, 1 = January.
    pub month: Frequent<u32>,
    pub day: Frequent<&'static str>,
    pub start_time: Frequent<NaiveDateTime>,
    pub start_hour: Frequent<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: Frequent<String>,
    pub end_station: Frequent<String>,
    /// Most frequent `(start station, end station)` pair.
    pub trip: Frequent<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub trips: usize,
    /// Seconds.
    pub total: f64,
    /// Seconds.
    pub mean: f64,
}

/// Result for one optional user attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute<T> {
    /// The city's file has no such column.
    Unavailable,
    /// No trips match the filters.
    NoData,
    /// Trips match, but every one of them leaves the column empty.
    Blank,
    Available(T),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthYearStats {
    pub most_recent: i32,
    pub earliest: i32,
    pub most_common: Frequent<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    /// Rows per category, most frequent first.
    pub user_types: Attribute<Vec<(String, usize)>>,
    pub genders: Attribute<Vec<(String, usize)>>,
    pub birth_years: Attribute<BirthYearStats>,
}

/// Busiest month, weekday, start instant and start hour.
pub fn compute_time_stats(table: &TripTable) -> Option<TimeStats> {
    let trips = &table.trips;
    Some(TimeStats {
        month: Frequent::from_pair(mode(trips.iter().map(|t| t.month))?),
        day: Frequent::from_pair(mode(trips.iter().map(TripRecord::day_name))?),
        start_time: Frequent::from_pair(mode(trips.iter().map(|t| t.start_time))?),
        start_hour: Frequent::from_pair(mode(trips.iter().map(|t| t.start_time.hour()))?),
    })
}

/// Most used start station, end station and station pair.
pub fn compute_station_stats(table: &TripTable) -> Option<StationStats> {
    let trips = &table.trips;
    let start = mode(trips.iter().map(|t| t.start_station.as_str()))?;
    let end = mode(trips.iter().map(|t| t.end_station.as_str()))?;
    let ((from, to), count) = mode(
        trips
            .iter()
            .map(|t| (t.start_station.as_str(), t.end_station.as_str())),
    )?;

    Some(StationStats {
        start_station: Frequent {
            value: start.0.to_string(),
            count: start.1,
        },
        end_station: Frequent {
            value: end.0.to_string(),
            count: end.1,
        },
        trip: Frequent {
            value: (from.to_string(), to.to_string()),
            count,
        },
    })
}

/// Total and mean trip duration.
pub fn compute_duration_stats(table: &TripTable) -> Option<DurationStats> {
    if table.is_empty() {
        return None;
    }
    let total: f64 = table.trips.iter().map(|t| t.trip_duration).sum();
    let trips = table.len();
    Some(DurationStats {
        trips,
        total,
        mean: total / trips as f64,
    })
}

/// User type and gender breakdowns plus birth-year extremes.
pub fn compute_user_stats(table: &TripTable) -> UserStats {
    UserStats {
        user_types: category_counts(table, OptionalColumn::UserType, |t| t.user_type.as_deref()),
        genders: category_counts(table, OptionalColumn::Gender, |t| t.gender.as_deref()),
        birth_years: birth_year_stats(table),
    }
}

fn category_counts<F>(table: &TripTable, column: OptionalColumn, value: F) -> Attribute<Vec<(String, usize)>>
where
    F: Fn(&TripRecord) -> Option<&str>,
{
    if !table.has_column(column) {
        return Attribute::Unavailable;
    }
    if table.is_empty() {
        return Attribute::NoData;
    }

    // Empty cells are counted too, so the counts add up to the row count.
    let counts = value_counts(table.trips.iter().map(value))
        .into_iter()
        .map(|(category, n)| (category.unwrap_or(MISSING_CATEGORY).to_string(), n))
        .collect();
    Attribute::Available(counts)
}

fn birth_year_stats(table: &TripTable) -> Attribute<BirthYearStats> {
    if !table.has_column(OptionalColumn::BirthYear) {
        return Attribute::Unavailable;
    }

    if table.is_empty() {
        return Attribute::NoData;
    }

    let years: Vec<i32> = table.trips.iter().filter_map(|t| t.birth_year).collect();
    let (Some(most_recent), Some(earliest), Some(most_common)) = (
        years.iter().copied().max(),
        years.iter().copied().min(),
        mode(years.iter().copied()),
    ) else {
        return Attribute::Blank;
    };

    Attribute::Available(BirthYearStats {
        most_recent,
        earliest,
        most_common: Frequent::from_pair(most_common),
    })
}
