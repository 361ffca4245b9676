//! CSV ingest and month/day filtering.
//!
//! This module turns a city's trip CSV into a `TripTable`:
//! - **Strict schema** for required columns (missing → data unavailable, exit code 3)
//! - **Optional columns** (`User Type`, `Gender`, `Birth Year`) are recorded, never required
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Derived calendar fields** computed once per row at load time

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDateTime};
use csv::StringRecord;

use crate::config::ExplorerConfig;
use crate::domain::{
    City, ColumnSet, DayFilter, FilterSelection, MonthFilter, RowError, TripRecord, TripTable,
};
use crate::error::AppError;

const START_TIME: &str = "start time";
const END_TIME: &str = "end time";
const TRIP_DURATION: &str = "trip duration";
const START_STATION: &str = "start station";
const END_STATION: &str = "end station";
const USER_TYPE: &str = "user type";
const GENDER: &str = "gender";
const BIRTH_YEAR: &str = "birth year";

/// Load the selected city's trips and apply the month/day filters.
pub fn load_trips(config: &ExplorerConfig, selection: &FilterSelection) -> Result<TripTable, AppError> {
    let path = config.city_path(selection.city);
    let file = File::open(&path).map_err(|e| {
        AppError::data_unavailable(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;

    let mut table = read_trips(file, selection.city, &path)?;
    apply_filters(&mut table, selection.month, selection.day);

    log::info!(
        "loaded {}: rows_read={} rows_loaded={} rows_kept={} skipped={}",
        path.display(),
        table.rows_read,
        table.rows_loaded,
        table.len(),
        table.row_errors.len()
    );
    Ok(table)
}

/// Parse a complete, unfiltered trip table from CSV text.
pub fn read_trips<R: Read>(input: R, city: City, source: &Path) -> Result<TripTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| {
            AppError::data_unavailable(format!(
                "Failed to read CSV headers from '{}': {e}",
                source.display()
            ))
        })?
        .clone();

    let columns = resolve_columns(&build_header_map(&headers), source)?;

    let mut trips = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line: source_line(e.position(), idx),
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let line = source_line(record.position(), idx);
        match parse_row(&record, &columns, idx, line) {
            Ok(trip) => trips.push(trip),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    for err in row_errors.iter().take(5) {
        log::warn!("{}: skipped line {}: {}", source.display(), err.line, err.message);
    }

    if trips.is_empty() && !row_errors.is_empty() {
        let first = &row_errors[0];
        return Err(AppError::data_unavailable(format!(
            "None of the {rows_read} rows in '{}' could be parsed (line {}: {}).",
            source.display(),
            first.line,
            first.message
        )));
    }

    let rows_loaded = trips.len();
    Ok(TripTable {
        city,
        source: source.to_path_buf(),
        columns: columns.present(),
        trips,
        rows_read,
        rows_loaded,
        row_errors,
    })
}

/// Keep only rows whose derived month/weekday match the filters.
pub fn apply_filters(table: &mut TripTable, month: MonthFilter, day: DayFilter) {
    if let Some(number) = month.month_number() {
        table.trips.retain(|t| t.month == number);
    }
    if !day.is_all() {
        table.trips.retain(|t| day.matches(&t.day_of_week));
    }
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    start_time: usize,
    trip_duration: usize,
    start_station: usize,
    end_station: usize,
    end_time: Option<usize>,
    user_type: Option<usize>,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl Columns {
    fn present(&self) -> ColumnSet {
        ColumnSet {
            end_time: self.end_time.is_some(),
            user_type: self.user_type.is_some(),
            gender: self.gender.is_some(),
            birth_year: self.birth_year.is_some(),
        }
    }
}

/// 1-based line where a record starts. Quoted fields may span lines, so the
/// reader's position is preferred over counting records.
fn source_line(position: Option<&csv::Position>, idx: usize) -> usize {
    position
        .and_then(|p| usize::try_from(p.line()).ok())
        .unwrap_or(idx + 2)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins on duplicate headers.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_columns(header_map: &HashMap<String, usize>, source: &Path) -> Result<Columns, AppError> {
    let required = |name: &str| {
        header_map.get(name).copied().ok_or_else(|| {
            AppError::data_unavailable(format!(
                "'{}' is missing required column `{}`.",
                source.display(),
                title_case(name)
            ))
        })
    };

    Ok(Columns {
        start_time: required(START_TIME)?,
        trip_duration: required(TRIP_DURATION)?,
        start_station: required(START_STATION)?,
        end_station: required(END_STATION)?,
        end_time: header_map.get(END_TIME).copied(),
        user_type: header_map.get(USER_TYPE).copied(),
        gender: header_map.get(GENDER).copied(),
        birth_year: header_map.get(BIRTH_YEAR).copied(),
    })
}

fn parse_row(
    record: &StringRecord,
    columns: &Columns,
    index: usize,
    line: usize,
) -> Result<TripRecord, String> {
    let start_time = parse_timestamp(get_required(record, columns.start_time, START_TIME)?)?;

    let raw_duration = get_required(record, columns.trip_duration, TRIP_DURATION)?;
    let trip_duration = parse_f64(raw_duration)
        .filter(|v| *v >= 0.0)
        .ok_or_else(|| format!("Invalid `Trip Duration` value '{raw_duration}'."))?;

    let start_station = get_required(record, columns.start_station, START_STATION)?.to_string();
    let end_station = get_required(record, columns.end_station, END_STATION)?.to_string();

    let user_type = get_optional(record, columns.user_type).map(str::to_string);
    let gender = get_optional(record, columns.gender).map(str::to_string);

    // A bad optional cell only blanks that cell; the trip still counts.
    let end_time = get_optional(record, columns.end_time)
        .and_then(|raw| lenient(parse_timestamp(raw), line, END_TIME));
    let birth_year = get_optional(record, columns.birth_year)
        .and_then(|raw| lenient(parse_year(raw), line, BIRTH_YEAR));

    Ok(TripRecord {
        index,
        month: start_time.month(),
        day_of_week: start_time.weekday(),
        start_time,
        end_time,
        trip_duration,
        start_station,
        end_station,
        user_type,
        gender,
        birth_year,
    })
}

fn lenient<T>(parsed: Result<T, String>, line: usize, column: &str) -> Option<T> {
    match parsed {
        Ok(v) => Some(v),
        Err(message) => {
            log::warn!("line {line}: ignoring `{}` cell: {message}", title_case(column));
            None
        }
    }
}

fn get_required<'a>(record: &'a StringRecord, idx: usize, name: &str) -> Result<&'a str, String> {
    record
        .get(idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{}`", title_case(name)))
}

fn get_optional(record: &StringRecord, idx: Option<usize>) -> Option<&str> {
    record.get(idx?).filter(|s| !s.is_empty())
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    // The published datasets use `YYYY-MM-DD HH:MM:SS`; the other formats cover
    // files that went through a spreadsheet on the way.
    const FMTS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%m/%d/%Y %H:%M",
    ];
    for fmt in FMTS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ts);
        }
    }
    Err(format!(
        "Invalid timestamp '{s}'. Expected YYYY-MM-DD HH:MM:SS, YYYY-MM-DDTHH:MM:SS, YYYY-MM-DD HH:MM or MM/DD/YYYY HH:MM."
    ))
}

fn parse_f64(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

fn parse_year(s: &str) -> Result<i32, String> {
    // Years with missing cells elsewhere in the column are exported as floats (`1992.0`).
    let v = parse_f64(s).ok_or_else(|| format!("Invalid `Birth Year` value '{s}'."))?;
    if v.fract() != 0.0 || v < f64::from(i32::MIN) || v > f64::from(i32::MAX) {
        return Err(format!("Invalid `Birth Year` value '{s}'."));
    }
    Ok(v as i32)
}

fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::{Month, NaiveDate, Weekday};

    use super::*;
    use crate::domain::Filter;
    use crate::testutil::{CHICAGO_CSV, WASHINGTON_CSV, memory_source, table_from};

    #[test]
    fn parses_rows_and_derives_calendar_fields() {
        let table = table_from(CHICAGO_CSV, City::Chicago);
        assert_eq!(table.rows_read, 6);
        assert_eq!(table.rows_loaded, 6);
        assert_eq!(table.len(), 6);
        assert!(table.row_errors.is_empty());

        let first = &table.trips[0];
        assert_eq!(first.index, 0);
        assert_eq!(
            first.start_time,
            NaiveDate::from_ymd_opt(2017, 6, 23).unwrap().and_hms_opt(15, 9, 32).unwrap()
        );
        assert_eq!(first.month, 6);
        assert_eq!(first.day_of_week, Weekday::Fri);
        assert_eq!(first.day_name(), "Friday");
        assert_eq!(first.birth_year, Some(1992));
        assert!(first.end_time.is_some());

        let blank = &table.trips[2];
        assert_eq!(blank.gender, None);
        assert_eq!(blank.birth_year, None);
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let table = table_from(WASHINGTON_CSV, City::Washington);
        assert!(!table.columns.user_type);
        assert!(!table.columns.gender);
        assert!(!table.columns.birth_year);
        assert!(table.trips.iter().all(|t| t.user_type.is_none()));
        assert!((table.trips[1].trip_duration - 1216.25).abs() < 1e-12);
    }

    #[test]
    fn all_filters_keep_every_row() {
        let mut table = table_from(CHICAGO_CSV, City::Chicago);
        apply_filters(&mut table, Filter::All, Filter::All);
        assert_eq!(table.len(), table.rows_loaded);
    }

    #[test]
    fn month_filter_keeps_matching_subset() {
        let full = table_from(CHICAGO_CSV, City::Chicago);
        let mut table = full.clone();
        apply_filters(&mut table, Filter::Only(Month::June), Filter::All);

        assert_eq!(table.len(), 4);
        assert!(table.trips.iter().all(|t| t.month == 6));
        assert!(table.trips.iter().all(|t| full.trips.contains(t)));
        // Source order is preserved.
        let indices: Vec<usize> = table.trips.iter().map(|t| t.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 5]);
    }

    #[test]
    fn month_and_day_filters_combine() {
        let mut table = table_from(CHICAGO_CSV, City::Chicago);
        apply_filters(&mut table, Filter::Only(Month::June), Filter::Only(Weekday::Mon));
        assert_eq!(table.len(), 1);
        assert_eq!(table.trips[0].day_of_week, Weekday::Mon);
        assert_eq!(table.trips[0].month, 6);
    }

    #[test]
    fn filters_can_empty_the_table() {
        let mut table = table_from(CHICAGO_CSV, City::Chicago);
        apply_filters(&mut table, Filter::All, Filter::Only(Weekday::Tue));
        assert!(table.is_empty());
        assert_eq!(table.rows_loaded, 6);
    }

    #[test]
    fn missing_required_column_is_data_unavailable() {
        let csv = "Start Time,Start Station,End Station\n2017-01-01 00:00:00,A,B\n";
        let err = read_trips(Cursor::new(csv), City::Chicago, &memory_source(City::Chicago))
            .unwrap_err();
        assert!(err.is_data_unavailable());
        assert!(err.to_string().contains("Trip Duration"));
    }

    #[test]
    fn bad_rows_are_skipped_and_reported() {
        let csv = "Start Time,Trip Duration,Start Station,End Station\n\
                   2017-01-02 08:00:00,300,A,B\n\
                   not a date,300,A,B\n\
                   2017-01-03 08:00:00,abc,A,B\n\
                   2017-01-04 08:00:00,120,,B\n";
        let table = read_trips(Cursor::new(csv), City::Chicago, &memory_source(City::Chicago))
            .unwrap();
        assert_eq!(table.rows_read, 4);
        assert_eq!(table.rows_loaded, 1);
        let lines: Vec<usize> = table.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
    }

    #[test]
    fn bad_optional_cells_keep_the_trip() {
        let csv = "Start Time,End Time,Trip Duration,Start Station,End Station,Birth Year\n\
                   2017-01-02 08:00:00,2017-01-02 08:05:00,300,A,B,1980\n\
                   2017-01-03 08:00:00,garbage,300,A,B,1981\n\
                   2017-01-04 08:00:00,2017-01-04 08:02:00,120,A,B,unknown\n";
        let table = read_trips(Cursor::new(csv), City::Chicago, &memory_source(City::Chicago))
            .unwrap();
        assert_eq!(table.rows_read, 3);
        assert_eq!(table.rows_loaded, 3);
        assert!(table.row_errors.is_empty());
        assert_eq!(table.trips[1].end_time, None);
        assert_eq!(table.trips[1].birth_year, Some(1981));
        assert_eq!(table.trips[2].birth_year, None);
        assert!(table.trips[2].end_time.is_some());
    }

    #[test]
    fn negative_duration_is_a_bad_row() {
        let csv = "Start Time,Trip Duration,Start Station,End Station\n\
                   2017-01-02 08:00:00,300,A,B\n\
                   2017-01-03 08:00:00,-42,A,B\n";
        let table = read_trips(Cursor::new(csv), City::Chicago, &memory_source(City::Chicago))
            .unwrap();
        assert_eq!(table.rows_loaded, 1);
        assert_eq!(table.row_errors.len(), 1);
        assert_eq!(table.row_errors[0].line, 3);
    }

    #[test]
    fn row_errors_report_the_line_a_record_starts_on() {
        let csv = "Start Time,Trip Duration,Start Station,End Station\n\
                   2017-01-02 08:00:00,300,\"Canal St\n& Adams St\",B\n\
                   not a date,300,A,B\n";
        let table = read_trips(Cursor::new(csv), City::Chicago, &memory_source(City::Chicago))
            .unwrap();
        assert_eq!(table.rows_loaded, 1);
        assert_eq!(table.row_errors[0].line, 4);
    }

    #[test]
    fn unparseable_file_is_data_unavailable() {
        let csv = "Start Time,Trip Duration,Start Station,End Station\nyesterday,1,A,B\n";
        let err = read_trips(Cursor::new(csv), City::Chicago, &memory_source(City::Chicago))
            .unwrap_err();
        assert!(err.is_data_unavailable());
    }

    #[test]
    fn header_only_file_is_an_empty_table() {
        let csv = "Start Time,Trip Duration,Start Station,End Station\n";
        let table = read_trips(Cursor::new(csv), City::Chicago, &memory_source(City::Chicago))
            .unwrap();
        assert!(table.is_empty());
        assert_eq!(table.rows_read, 0);
    }

    #[test]
    fn headers_match_case_insensitively_and_ignore_bom() {
        let csv = "\u{feff}start time,TRIP DURATION,Start Station,End Station\n2017-02-28 23:59,60,A,B\n";
        let table = read_trips(Cursor::new(csv), City::Chicago, &memory_source(City::Chicago))
            .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.trips[0].day_of_week, Weekday::Tue);
    }

    #[test]
    fn load_trips_reads_city_file_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("chicago.csv"), CHICAGO_CSV).unwrap();
        let config = ExplorerConfig::new(dir.path(), 5);
        let selection = FilterSelection {
            city: City::Chicago,
            month: Filter::Only(Month::June),
            day: Filter::All,
        };

        let table = load_trips(&config, &selection).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.source, dir.path().join("chicago.csv"));
    }

    #[test]
    fn missing_city_file_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExplorerConfig::new(dir.path(), 5);
        let selection = FilterSelection {
            city: City::NewYorkCity,
            month: Filter::All,
            day: Filter::All,
        };

        let err = load_trips(&config, &selection).unwrap_err();
        assert!(err.is_data_unavailable());
        assert!(err.to_string().contains("new_york_city.csv"));
    }

    #[test]
    fn parse_year_accepts_float_text() {
        assert_eq!(parse_year("1992.0"), Ok(1992));
        assert_eq!(parse_year("1970"), Ok(1970));
        assert!(parse_year("1992.5").is_err());
    }
}
