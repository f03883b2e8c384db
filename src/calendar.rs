use chrono::{Datelike, NaiveDate};

use crate::almanac::{Almanac, HolidayStatus};
use crate::models::CalendarEvent;

pub const DAYS_PER_WEEK: usize = 7;

/// Number of days in a Gregorian month, or None for an invalid month/year.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Build the month grid: week rows of day-of-month slots, with the first
/// row left-padded so that day 1 lands in its weekday column (0 = Sunday).
///
/// Rows are consecutive chunks of 7 cut from the padded sequence, not
/// calendar weeks; the last row is left ragged when days run out.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<Vec<Option<u32>>>> {
    let days = days_in_month(year, month)?;
    let pad = NaiveDate::from_ymd_opt(year, month, 1)?
        .weekday()
        .num_days_from_sunday() as usize;

    let mut cells: Vec<Option<u32>> = vec![None; pad];
    cells.extend((1..=days).map(Some));

    Some(cells.chunks(DAYS_PER_WEEK).map(|row| row.to_vec()).collect())
}

/// Per-day metadata from the almanac.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAnnotation {
    /// The lunar day name, or the lunar month name on the first day of a
    /// lunar month. Empty when the almanac has no data for the date.
    pub lunar_label: String,
    pub holiday: Option<HolidayStatus>,
}

pub fn annotate(almanac: &dyn Almanac, year: i32, month: u32, day: u32) -> DayAnnotation {
    let lunar_label = match almanac.lunar_date(year, month, day) {
        Some(lunar) if lunar.day == 1 => lunar.month_name,
        Some(lunar) => lunar.day_name,
        None => String::new(),
    };
    DayAnnotation {
        lunar_label,
        holiday: almanac.holiday_status(year, month, day),
    }
}

/// The single semantic category a date carries, in precedence order:
/// today > holiday override > weekend column > plain weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayClass {
    Today,
    Holiday { workday: bool },
    Weekend,
    Weekday,
}

pub fn classify(date: NaiveDate, holiday: Option<&HolidayStatus>, today: NaiveDate) -> DayClass {
    if date == today {
        return DayClass::Today;
    }
    if let Some(status) = holiday {
        return DayClass::Holiday {
            workday: status.workday,
        };
    }
    match date.weekday().num_days_from_sunday() {
        0 | 6 => DayClass::Weekend,
        _ => DayClass::Weekday,
    }
}

/// One grid cell of the display contract. Padding cells carry `day: None`
/// and empty metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub day: Option<u32>,
    pub is_today: bool,
    pub class: Option<DayClass>,
    pub lunar_label: String,
    pub holiday: Option<HolidayStatus>,
    pub events: Vec<CalendarEvent>,
}

impl DayCell {
    pub fn empty() -> Self {
        Self {
            day: None,
            is_today: false,
            class: None,
            lunar_label: String::new(),
            holiday: None,
            events: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekRow {
    pub index: u32,
    pub days: Vec<DayCell>,
    /// The week's summary content, "" when none was written.
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<WeekRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::almanac::{Almanac, HolidayStatus, LunarDate, NullAlmanac};

    struct FixtureAlmanac;

    impl Almanac for FixtureAlmanac {
        fn lunar_date(&self, _year: i32, _month: u32, day: u32) -> Option<LunarDate> {
            // 2024-02-10 is the first day of a lunar month in the fixture.
            Some(LunarDate {
                month_name: "正月".into(),
                day_name: "初二".into(),
                day: if day == 10 { 1 } else { 2 },
            })
        }

        fn holiday_status(&self, _year: i32, _month: u32, day: u32) -> Option<HolidayStatus> {
            match day {
                10 => Some(HolidayStatus {
                    workday: false,
                    name: "春节".into(),
                }),
                4 => Some(HolidayStatus {
                    workday: true,
                    name: "调休".into(),
                }),
                _ => None,
            }
        }
    }

    fn flatten_days(grid: &[Vec<Option<u32>>]) -> Vec<u32> {
        grid.iter().flatten().filter_map(|slot| *slot).collect()
    }

    #[test]
    fn grid_restores_day_sequence_once_padding_is_removed() {
        for (year, month) in [(2024, 2), (2023, 2), (2024, 12), (1999, 1), (2024, 6)] {
            let grid = month_grid(year, month).unwrap();
            let expected: Vec<u32> = (1..=days_in_month(year, month).unwrap()).collect();
            assert_eq!(flatten_days(&grid), expected, "{}-{}", year, month);
        }
    }

    #[test]
    fn leading_padding_matches_weekday_of_day_one() {
        for (year, month) in [(2024, 2), (2024, 9), (2023, 10), (2000, 2)] {
            let grid = month_grid(year, month).unwrap();
            let pad = grid[0].iter().take_while(|slot| slot.is_none()).count();
            let weekday = NaiveDate::from_ymd_opt(year, month, 1)
                .unwrap()
                .weekday()
                .num_days_from_sunday() as usize;
            assert_eq!(pad, weekday, "{}-{}", year, month);
            assert_eq!(grid[0][pad], Some(1));
        }
    }

    #[test]
    fn rows_are_seven_wide_except_a_ragged_tail() {
        let grid = month_grid(2024, 5).unwrap();
        for row in &grid[..grid.len() - 1] {
            assert_eq!(row.len(), DAYS_PER_WEEK);
        }
        assert!(grid.last().unwrap().len() <= DAYS_PER_WEEK);
    }

    #[test]
    fn leap_february_has_twenty_nine_days() {
        // 2024-02-01 falls on a Thursday.
        let grid = month_grid(2024, 2).unwrap();
        assert_eq!(flatten_days(&grid).len(), 29);
        let pad = grid[0].iter().take_while(|slot| slot.is_none()).count();
        assert_eq!(pad, 4);
    }

    #[test]
    fn invalid_month_yields_no_grid() {
        assert!(month_grid(2024, 0).is_none());
        assert!(month_grid(2024, 13).is_none());
    }

    #[test]
    fn lunar_label_prefers_month_name_on_first_lunar_day() {
        let almanac = FixtureAlmanac;
        assert_eq!(annotate(&almanac, 2024, 2, 10).lunar_label, "正月");
        assert_eq!(annotate(&almanac, 2024, 2, 11).lunar_label, "初二");
    }

    #[test]
    fn null_almanac_annotates_with_empty_metadata() {
        let annotation = annotate(&NullAlmanac, 2024, 2, 10);
        assert_eq!(annotation.lunar_label, "");
        assert_eq!(annotation.holiday, None);
    }

    #[test]
    fn classification_precedence_today_holiday_weekend_weekday() {
        let almanac = FixtureAlmanac;
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();

        // 2024-02-10 is a Saturday with a holiday override, but today wins.
        let holiday = almanac.holiday_status(2024, 2, 10);
        assert_eq!(classify(today, holiday.as_ref(), today), DayClass::Today);

        // A compensatory workday override beats its Sunday column.
        let sunday = NaiveDate::from_ymd_opt(2024, 2, 4).unwrap();
        let comp = almanac.holiday_status(2024, 2, 4);
        assert_eq!(
            classify(sunday, comp.as_ref(), today),
            DayClass::Holiday { workday: true }
        );

        // No override: Saturday and Sunday columns are weekends.
        let saturday = NaiveDate::from_ymd_opt(2024, 2, 17).unwrap();
        assert_eq!(classify(saturday, None, today), DayClass::Weekend);

        let monday = NaiveDate::from_ymd_opt(2024, 2, 19).unwrap();
        assert_eq!(classify(monday, None, today), DayClass::Weekday);
    }
}
