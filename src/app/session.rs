//! The interactive session loop shared by the binary and the tests.
//!
//! One cycle: prompts -> load -> four reports -> optional preview -> restart?

use std::io::{BufRead, Write};
use std::time::Instant;

use crate::cli::{Prompter, collect_filters};
use crate::config::ExplorerConfig;
use crate::domain::TripTable;
use crate::error::AppError;
use crate::io::ingest::load_trips;
use crate::report::{
    SEPARATOR, compute_duration_stats, compute_station_stats, compute_time_stats, compute_user_stats,
    format_duration_stats, format_elapsed, format_load_summary, format_preview, format_station_stats,
    format_time_stats, format_user_stats,
};

/// Run sessions until the user declines to restart.
pub fn run_sessions<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &ExplorerConfig,
) -> Result<(), AppError> {
    loop {
        run_once(prompter, config)?;
        if !prompter.confirm("\nWould you like to restart? Enter yes or no.")? {
            return Ok(());
        }
    }
}

/// One full cycle, without the restart question.
///
/// An unavailable city dataset is reported to the user and ends the cycle
/// early; every other error is returned.
pub fn run_once<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &ExplorerConfig,
) -> Result<(), AppError> {
    let selection = collect_filters(prompter, config)?;

    let table = match load_trips(config, &selection) {
        Ok(table) => table,
        Err(err) if err.is_data_unavailable() => {
            log::error!("{err}");
            prompter.say(&format!(
                "Data for {} is unavailable: {err}",
                selection.city.display_name()
            ))?;
            return Ok(());
        }
        Err(err) => return Err(err),
    };

    prompter.say(&format_load_summary(&table, &selection))?;
    report_all(prompter, &table)?;

    if prompter.confirm("Would you like to see individual trip data? Enter yes or no.")? {
        prompter.say(&format_preview(&table, config.preview_rows))?;
    }
    Ok(())
}

/// Print the four report sections in their fixed order.
pub fn report_all<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    table: &TripTable,
) -> Result<(), AppError> {
    section(prompter, "Calculating The Most Frequent Times of Travel...", || {
        format_time_stats(compute_time_stats(table).as_ref())
    })?;
    section(prompter, "Calculating The Most Popular Stations and Trip...", || {
        format_station_stats(compute_station_stats(table).as_ref())
    })?;
    section(prompter, "Calculating Trip Duration...", || {
        format_duration_stats(compute_duration_stats(table).as_ref())
    })?;
    section(prompter, "Calculating User Stats...", || {
        format_user_stats(&compute_user_stats(table))
    })
}

fn section<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    title: &str,
    body: impl FnOnce() -> String,
) -> Result<(), AppError> {
    prompter.say(&format!("\n{title}\n"))?;

    let started = Instant::now();
    let text = body();
    let elapsed = started.elapsed();

    prompter.say(&text)?;
    prompter.say(&format!("\n{}", format_elapsed(elapsed)))?;
    prompter.say(SEPARATOR)
}
