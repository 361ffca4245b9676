//! Trip rows and the in-memory table the reporters read.

use std::path::PathBuf;

use chrono::{NaiveDateTime, Weekday};

use super::types::{City, weekday_name};

/// One parsed trip, plus the calendar fields derived from its start time.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// 0-based position of the row in the source file.
    pub index: usize,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    /// Trip duration in seconds.
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    /// Month of `start_time`, 1 = January.
    pub month: u32,
    pub day_of_week: Weekday,
}

impl TripRecord {
    pub fn day_name(&self) -> &'static str {
        weekday_name(self.day_of_week)
    }
}

/// Columns that only some cities publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionalColumn {
    UserType,
    Gender,
    BirthYear,
}

impl OptionalColumn {
    /// Header name as published in the city CSVs.
    pub fn header(self) -> &'static str {
        match self {
            OptionalColumn::UserType => "User Type",
            OptionalColumn::Gender => "Gender",
            OptionalColumn::BirthYear => "Birth Year",
        }
    }
}

/// Which optional columns the source file carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnSet {
    pub end_time: bool,
    pub user_type: bool,
    pub gender: bool,
    pub birth_year: bool,
}

impl ColumnSet {
    pub fn has(&self, column: OptionalColumn) -> bool {
        match column {
            OptionalColumn::UserType => self.user_type,
            OptionalColumn::Gender => self.gender,
            OptionalColumn::BirthYear => self.birth_year,
        }
    }
}

/// A row that was skipped during load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based line number in the CSV (header is line 1).
    pub line: usize,
    pub message: String,
}

/// Trips for one city after month/day filtering.
#[derive(Debug, Clone)]
pub struct TripTable {
    pub city: City,
    pub source: PathBuf,
    pub columns: ColumnSet,
    pub trips: Vec<TripRecord>,
    /// Data rows found in the file.
    pub rows_read: usize,
    /// Rows that parsed, before any filtering.
    pub rows_loaded: usize,
    pub row_errors: Vec<RowError>,
}

impl TripTable {
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn has_column(&self, column: OptionalColumn) -> bool {
        self.columns.has(column)
    }
}
