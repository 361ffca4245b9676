//! Domain types used throughout the explorer.
//!
//! This module defines:
//!
//! - the city catalogue (`City`)
//! - month/day restrictions (`Filter`, `MonthFilter`, `DayFilter`)
//! - the validated prompt answers (`FilterSelection`)
//! - parsed trips and the filtered table (`TripRecord`, `TripTable`)

pub mod trips;
pub mod types;

pub use trips::*;
pub use types::*;
