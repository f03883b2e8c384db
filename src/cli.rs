use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::almanac::Almanac;
use crate::calendar::DAYS_PER_WEEK;
use crate::models::PlanField;
use crate::planner::Planner;
use crate::storage::StorageError;
use crate::utils::parse_date;

#[derive(Parser)]
#[command(name = "planbook")]
#[command(about = "Month planner with lunar and holiday annotations")]
#[command(version)]
pub struct Cli {
    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the month grid with events, summaries and holiday marks
    Month {
        /// Year to show (defaults to the current year)
        year: Option<i32>,
        /// Month to show, 1-12 (defaults to the current month)
        month: Option<u32>,
    },
    /// Add an event on a date
    AddEvent {
        /// Event date (YYYY-MM-DD)
        date: String,
        /// Event title
        title: String,
        /// Free-text time, e.g. "09:00"
        #[arg(long)]
        time: Option<String>,
    },
    /// List the events on a date
    ListEvents {
        /// Event date (YYYY-MM-DD)
        date: String,
    },
    /// Edit an event's title, time and completion; the date never changes
    EditEvent {
        /// Event id
        id: String,
        /// New title
        title: String,
        /// Free-text time, e.g. "09:00"
        #[arg(long)]
        time: Option<String>,
        /// Mark the event completed
        #[arg(long)]
        completed: bool,
    },
    /// Flip an event's completion state
    ToggleEvent {
        /// Event id
        id: String,
    },
    /// Delete an event
    DeleteEvent {
        /// Event id
        id: String,
    },
    /// Set the free-text summary for one week row of a month
    SetSummary {
        year: i32,
        /// Month, 1-12
        month: u32,
        /// Week row within the month grid, starting at 0
        week: u32,
        /// Summary content
        content: String,
    },
    /// Show the four-category plan for a year
    Plan {
        /// Year to show (defaults to the current year)
        year: Option<i32>,
    },
    /// Set one field of a year's plan
    SetPlan {
        year: i32,
        /// One of: goals, work, life, other
        field: String,
        /// Field content
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("Month out of range (expected 1-12): {0}")]
    MonthOutOfRange(u32),
    #[error("{0}")]
    UnknownPlanField(String),
}

fn check_month(month: u32) -> Result<u32, CliError> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(CliError::MonthOutOfRange(month))
    }
}

/// Handle the month command: print the cursor month's grid
pub fn handle_month(
    planner: &mut Planner,
    almanac: &dyn Almanac,
    year: Option<i32>,
    month: Option<u32>,
    today: chrono::NaiveDate,
) -> Result<(), CliError> {
    let year = year.unwrap_or_else(|| planner.year());
    let month = check_month(month.unwrap_or_else(|| planner.month()))?;
    planner.set_yearly_view(false);
    planner.set_month(year, month)?;

    let Some(view) = planner.month_view(almanac, today) else {
        return Err(CliError::MonthOutOfRange(month));
    };

    println!("{:^width$}", format!("{}-{:02}", view.year, view.month), width = DAYS_PER_WEEK * 4);
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");
    for week in &view.weeks {
        let mut line = String::new();
        for cell in &week.days {
            match cell.day {
                Some(day) if cell.is_today => line.push_str(&format!("[{:>2}]", day)),
                Some(day) => line.push_str(&format!(" {:>2} ", day)),
                None => line.push_str("    "),
            }
        }
        println!("{}", line.trim_end());
        if !week.summary.is_empty() {
            println!("  week {}: {}", week.index, week.summary);
        }
    }

    // Footnotes for annotated days
    for cell in view.weeks.iter().flat_map(|w| w.days.iter()) {
        let (Some(day), Some(holiday)) = (cell.day, cell.holiday.as_ref()) else {
            continue;
        };
        let kind = if holiday.workday { "workday" } else { "holiday" };
        println!("  {:>2} · {} ({})", day, holiday.name, kind);
    }

    Ok(())
}

/// Handle the add-event command
pub fn handle_add_event(
    planner: &mut Planner,
    date: String,
    title: String,
    time: Option<String>,
) -> Result<(), CliError> {
    parse_date(&date)
        .map_err(|e| CliError::DateParseError(format!("Invalid date format '{}': {}", date, e)))?;

    match planner.add_event(&date, &title, time)? {
        Some(event) => println!("Event created successfully (ID: {})", event.id),
        None => println!("Event not created: title must not be empty"),
    }

    Ok(())
}

/// Handle the list-events command
pub fn handle_list_events(planner: &Planner, date: String) -> Result<(), CliError> {
    let events = planner.events_on(&date);
    if events.is_empty() {
        println!("No events on {}", date);
        return Ok(());
    }

    for event in events {
        let mark = if event.completed { "x" } else { " " };
        match &event.time {
            Some(time) => println!("[{}] {} {} (ID: {})", mark, time, event.title, event.id),
            None => println!("[{}] {} (ID: {})", mark, event.title, event.id),
        }
    }

    Ok(())
}

/// Handle the edit-event command
pub fn handle_edit_event(
    planner: &mut Planner,
    id: String,
    title: String,
    time: Option<String>,
    completed: bool,
) -> Result<(), CliError> {
    match planner.edit_event(&id, &title, time, completed)? {
        Some(event) => println!("Event updated successfully (ID: {})", event.id),
        None => println!("Event not updated: unknown id or empty title"),
    }

    Ok(())
}

/// Handle the toggle-event command
pub fn handle_toggle_event(planner: &mut Planner, id: String) -> Result<(), CliError> {
    planner.toggle_event(&id)?;
    println!("Event completion toggled (ID: {})", id);
    Ok(())
}

/// Handle the delete-event command
pub fn handle_delete_event(planner: &mut Planner, id: String) -> Result<(), CliError> {
    planner.delete_event(&id)?;
    println!("Event deleted (ID: {})", id);
    Ok(())
}

/// Handle the set-summary command
pub fn handle_set_summary(
    planner: &mut Planner,
    year: i32,
    month: u32,
    week: u32,
    content: String,
) -> Result<(), CliError> {
    check_month(month)?;
    planner.set_summary(year, month, week, &content)?;
    println!("Summary saved for {}-{:02} week {}", year, month, week);
    Ok(())
}

/// Handle the plan command: print a year's four-category plan
pub fn handle_plan(planner: &mut Planner, year: Option<i32>) -> Result<(), CliError> {
    let year = year.unwrap_or_else(|| planner.year());
    planner.set_yearly_view(true);
    planner.set_month(year, planner.month())?;

    let plan = planner.plan();
    println!("Plan for {}", plan.year);
    for field in PlanField::ALL {
        let value = plan.field(field);
        if value.is_empty() {
            println!("  {:>5}: -", field.name());
        } else {
            println!("  {:>5}: {}", field.name(), value);
        }
    }

    Ok(())
}

/// Handle the set-plan command
pub fn handle_set_plan(
    planner: &mut Planner,
    year: i32,
    field: String,
    value: String,
) -> Result<(), CliError> {
    let field: PlanField = field.parse().map_err(CliError::UnknownPlanField)?;
    planner.set_month(year, planner.month())?;
    planner.set_plan_field(field, &value)?;
    println!("Plan {} saved for {}", field.name(), year);
    Ok(())
}
