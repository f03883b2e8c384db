use clap::Parser;
use color_eyre::Result;
use planbook::{
    Config, NullAlmanac, Planner, Profile, Storage,
    cli::{self, Cli, Commands},
    utils,
};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Log to stderr, level controlled by RUST_LOG
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")?.start()?;

    // Parse CLI arguments
    let args = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if args.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration with the determined profile
    let config = Config::load_with_profile(profile)?;

    // Open storage and load the planner state
    let storage = Storage::new(&config.get_database_path())?;
    let today = utils::today();
    let mut planner = Planner::open(storage, today)?;

    // The lunar/holiday almanac is an external collaborator; without one
    // configured, days carry no lunar labels or holiday overrides.
    let almanac = NullAlmanac;

    // Dispatch to appropriate command handler
    match args.command {
        Commands::Month { year, month } => {
            cli::handle_month(&mut planner, &almanac, year, month, today)?;
        }
        Commands::AddEvent { date, title, time } => {
            cli::handle_add_event(&mut planner, date, title, time)?;
        }
        Commands::ListEvents { date } => {
            cli::handle_list_events(&planner, date)?;
        }
        Commands::EditEvent {
            id,
            title,
            time,
            completed,
        } => {
            cli::handle_edit_event(&mut planner, id, title, time, completed)?;
        }
        Commands::ToggleEvent { id } => {
            cli::handle_toggle_event(&mut planner, id)?;
        }
        Commands::DeleteEvent { id } => {
            cli::handle_delete_event(&mut planner, id)?;
        }
        Commands::SetSummary {
            year,
            month,
            week,
            content,
        } => {
            cli::handle_set_summary(&mut planner, year, month, week, content)?;
        }
        Commands::Plan { year } => {
            cli::handle_plan(&mut planner, year)?;
        }
        Commands::SetPlan { year, field, value } => {
            cli::handle_set_plan(&mut planner, year, field, value)?;
        }
    }

    Ok(())
}
