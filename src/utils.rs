use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

/// Get the configuration directory path for planbook
/// If profile is Dev, uses "planbook-dev" instead of "planbook"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "planbook-dev",
        Profile::Prod => "planbook",
    };
    ProjectDirs::from("com", "planbook", app_name).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path for planbook
/// If profile is Dev, uses "planbook-dev" instead of "planbook"
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "planbook-dev",
        Profile::Prod => "planbook",
    };
    ProjectDirs::from("com", "planbook", app_name).map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Parse a date string in ISO 8601 format (YYYY-MM-DD)
pub fn parse_date(date_str: &str) -> Result<chrono::NaiveDate, chrono::ParseError> {
    chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
}

/// Format a date as its canonical ISO 8601 string (YYYY-MM-DD), the join
/// key between events and grid cells
pub fn date_key(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Get the current local date
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_only_iso_dates() {
        assert!(parse_date("2024-02-29").is_ok());
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("05/01/2024").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn date_key_zero_pads() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(date_key(date), "2024-05-01");
    }

    #[test]
    fn date_key_round_trips_through_parse() {
        let date = chrono::NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        assert_eq!(parse_date(&date_key(date)).unwrap(), date);
    }
}
