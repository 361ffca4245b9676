//! Shared domain types.
//!
//! These are the values the prompt loop produces and the loader consumes:
//!
//! - which city to analyze (`City`)
//! - optional month / weekday restrictions (`Filter`)
//! - the validated triple handed to the loader (`FilterSelection`)

use std::fmt;

use chrono::{Month, Weekday};

/// One of the three cities with a trip-history dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case name accepted at the city prompt.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// CSV file holding this city's trips, relative to the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A restriction on one derived column: either everything or a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }
}

pub type MonthFilter = Filter<Month>;
pub type DayFilter = Filter<Weekday>;

impl MonthFilter {
    /// Month number (1 = January) this filter keeps, or `None` for "all".
    pub fn month_number(&self) -> Option<u32> {
        match self {
            Filter::All => None,
            Filter::Only(month) => Some(month.number_from_month()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Filter::All => "all".to_string(),
            Filter::Only(month) => month.name().to_ascii_lowercase(),
        }
    }
}

impl DayFilter {
    pub fn label(&self) -> String {
        match self {
            Filter::All => "all".to_string(),
            Filter::Only(day) => weekday_name(*day).to_ascii_lowercase(),
        }
    }
}

/// Validated answers to the three prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

/// Full English weekday name ("Monday" .. "Sunday").
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Full English month name for a 1-based month number.
///
/// Out-of-range numbers are rendered as the bare number.
pub fn month_display(number: u32) -> String {
    u8::try_from(number)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| number.to_string())
}
