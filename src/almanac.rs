/// Lunar-calendar and public-holiday lookups, provided by an external
/// almanac. The core only consumes these as pure functions of a Gregorian
/// date; the conversion and holiday tables live behind this trait.
pub trait Almanac {
    /// The lunar date corresponding to a Gregorian (year, month 1-12, day),
    /// or None when the almanac has no data for that date.
    fn lunar_date(&self, year: i32, month: u32, day: u32) -> Option<LunarDate>;

    /// The holiday/workday override for a Gregorian date, or None when no
    /// override exists. None says nothing about weekends.
    fn holiday_status(&self, year: i32, month: u32, day: u32) -> Option<HolidayStatus>;
}

/// One day in the lunar calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LunarDate {
    pub month_name: String,
    pub day_name: String,
    /// 1-based day within the lunar month.
    pub day: u32,
}

/// An externally defined exception to the plain weekend rule: a public
/// holiday (rest day) or a compensatory workday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayStatus {
    pub workday: bool,
    pub name: String,
}

/// Almanac with no lunar or holiday data. Days keep empty lunar labels and
/// no holiday overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAlmanac;

impl Almanac for NullAlmanac {
    fn lunar_date(&self, _year: i32, _month: u32, _day: u32) -> Option<LunarDate> {
        None
    }

    fn holiday_status(&self, _year: i32, _month: u32, _day: u32) -> Option<HolidayStatus> {
        None
    }
}
