//! The three filter prompts (city, month, day of week).

use std::io::{BufRead, Write};

use crate::cli::prompt::Prompter;
use crate::config::{ExplorerConfig, Vocabulary};
use crate::domain::FilterSelection;
use crate::error::AppError;
use crate::report::format::SEPARATOR;

/// Ask for city, month and day until each answer is allow-listed.
pub fn collect_filters<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &ExplorerConfig,
) -> Result<FilterSelection, AppError> {
    prompter.say("Hello! Let's explore some US bikeshare data!")?;

    let city = prompter.choose(
        &format!(
            "Which city do you want to filter by? ({}):",
            list_choices(&config.cities, false)
        ),
        "Please enter one of the three cities in the specified format:",
        &config.cities,
    )?;
    prompter.say(&format!("Filtering for {city} data"))?;

    let month = prompter.choose(
        &format!(
            "Which month do you want to filter by? ({})\ntype all for no filters",
            list_choices(&config.months, true)
        ),
        "Please enter a valid month:",
        &config.months,
    )?;

    let day = prompter.choose(
        &format!(
            "Which day do you want to filter by? ({})\ntype all for no filters",
            list_choices(&config.days, true)
        ),
        "Please enter a valid day of week:",
        &config.days,
    )?;

    prompter.say(&format!("Filtering for {} month data", month.label()))?;
    prompter.say(&format!("Filtering for {} day data", day.label()))?;
    prompter.say(SEPARATOR)?;

    let selection = FilterSelection { city, month, day };
    log::debug!("filters selected: {selection:?}");
    Ok(selection)
}

fn list_choices<T: Copy>(vocabulary: &Vocabulary<T>, skip_all: bool) -> String {
    vocabulary
        .labels()
        .filter(|label| !(skip_all && *label == "all"))
        .collect::<Vec<_>>()
        .join(", ")
}
