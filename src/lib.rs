pub mod almanac;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod models;
pub mod planner;
pub mod storage;
pub mod utils;

pub use almanac::{Almanac, HolidayStatus, LunarDate, NullAlmanac};
pub use calendar::{DayCell, DayClass, MonthView, WeekRow};
pub use config::Config;
pub use models::{CalendarEvent, PlanField, WeekKey, WeeklySummary, YearlyPlan};
pub use planner::Planner;
pub use storage::Storage;
pub use utils::Profile;
