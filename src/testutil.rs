//! Small city CSVs shared by unit tests.

use std::io::Cursor;
use std::path::PathBuf;

use crate::domain::{City, TripTable};
use crate::io::ingest::read_trips;

/// Six Chicago trips: four in June, one in May, one in January.
///
/// Row 2 has blank `Gender` and `Birth Year` cells.
pub const CHICAGO_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Canal St & Adams St,Clinton St & Washington Blvd,Subscriber,Male,1992.0
955915,2017-06-23 15:09:32,2017-06-23 15:19:32,600,Canal St & Adams St,Clinton St & Washington Blvd,Subscriber,Female,1985.0
9031,2017-06-24 08:00:00,2017-06-24 08:20:00,1200,Clinton St & Washington Blvd,Streeter Dr & Grand Ave,Customer,,
304487,2017-05-01 17:30:00,2017-05-01 17:38:00,480,Streeter Dr & Grand Ave,Canal St & Adams St,Subscriber,Male,1992.0
45207,2017-01-01 00:07:57,2017-01-01 00:22:57,900,Canal St & Adams St,Streeter Dr & Grand Ave,Customer,Female,1970.0
1473887,2017-06-05 09:15:00,2017-06-05 09:20:00,300,Clinton St & Washington Blvd,Canal St & Adams St,Subscriber,Male,2001.0
";

/// Washington publishes no user columns.
pub const WASHINGTON_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW
482740,2017-03-11 10:40:00,2017-03-11 10:46:00,1216.25,Lincoln Memorial,Jefferson Memorial
";

pub fn memory_source(city: City) -> PathBuf {
    PathBuf::from(format!("<memory>/{}", city.file_name()))
}

/// Parse fixture text into an unfiltered table.
pub fn table_from(csv: &str, city: City) -> TripTable {
    read_trips(Cursor::new(csv.as_bytes()), city, &memory_source(city)).unwrap()
}
