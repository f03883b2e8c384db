use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::almanac::Almanac;
use crate::calendar::{self, DayCell, MonthView, WeekRow};
use crate::models::{CalendarEvent, PlanField, WeekKey, WeeklySummary, YearlyPlan};
use crate::storage::{Storage, StorageError};
use crate::utils;

/// Top-level planner state: the three stores plus the view cursor.
///
/// All mutations go through methods here, and every successful mutation is
/// flushed through the storage gateway before returning. Validation
/// failures and unknown-id lookups are silent no-ops; only storage-level
/// failures surface as errors.
pub struct Planner {
    storage: Storage,
    events: Vec<CalendarEvent>,
    summaries: Vec<WeeklySummary>,
    plan: YearlyPlan,
    year: i32,
    month: u32,
    yearly_view: bool,
}

impl Planner {
    /// Load all stores and position the cursor on today's month
    pub fn open(storage: Storage, today: NaiveDate) -> Result<Self, StorageError> {
        let events = storage.load_events()?;
        let summaries = storage.load_summaries()?;
        let plan = storage.load_yearly_plan(today.year())?;

        Ok(Self {
            storage,
            events,
            summaries,
            plan,
            year: today.year(),
            month: today.month(),
            yearly_view: false,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn yearly_view(&self) -> bool {
        self.yearly_view
    }

    pub fn set_yearly_view(&mut self, on: bool) {
        self.yearly_view = on;
    }

    /// Move the cursor. Switching years replaces the active plan with the
    /// persisted (or default) record for the new year. An out-of-range
    /// month is a no-op.
    pub fn set_month(&mut self, year: i32, month: u32) -> Result<(), StorageError> {
        if !(1..=12).contains(&month) {
            return Ok(());
        }
        let year_changed = year != self.year;
        self.year = year;
        self.month = month;
        if year_changed {
            self.plan = self.storage.load_yearly_plan(year)?;
        }
        Ok(())
    }

    pub fn next_month(&mut self) -> Result<(), StorageError> {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        self.set_month(year, month)
    }

    pub fn prev_month(&mut self) -> Result<(), StorageError> {
        let (year, month) = if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };
        self.set_month(year, month)
    }

    /// Add an event. No-op (returns None) when the date is not a valid
    /// YYYY-MM-DD string or the title trims to empty.
    pub fn add_event(
        &mut self,
        date: &str,
        title: &str,
        time: Option<String>,
    ) -> Result<Option<CalendarEvent>, StorageError> {
        if utils::parse_date(date).is_err() {
            return Ok(None);
        }
        let title = title.trim();
        if title.is_empty() {
            return Ok(None);
        }

        let event = CalendarEvent::new(date.to_string(), title.to_string(), time);
        self.events.push(event.clone());
        self.storage.save_events(&self.events)?;
        debug!("added event {} on {}", event.id, event.date);

        Ok(Some(event))
    }

    /// Edit an event's title, time and completion. The date never changes.
    /// No-op on an unknown id or an empty trimmed title.
    pub fn edit_event(
        &mut self,
        id: &str,
        title: &str,
        time: Option<String>,
        completed: bool,
    ) -> Result<Option<CalendarEvent>, StorageError> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(None);
        }
        let Some(event) = self.events.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };

        event.title = title.to_string();
        event.time = time;
        event.completed = completed;
        let updated = event.clone();
        self.storage.save_events(&self.events)?;

        Ok(Some(updated))
    }

    /// Flip an event's completion state; no-op on an unknown id.
    pub fn toggle_event(&mut self, id: &str) -> Result<(), StorageError> {
        let Some(event) = self.events.iter_mut().find(|e| e.id == id) else {
            return Ok(());
        };
        event.completed = !event.completed;
        self.storage.save_events(&self.events)
    }

    /// Remove an event; no-op on an unknown id.
    pub fn delete_event(&mut self, id: &str) -> Result<(), StorageError> {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        if self.events.len() == before {
            return Ok(());
        }
        self.storage.save_events(&self.events)
    }

    /// All events on a date, in insertion order
    pub fn events_on(&self, date: &str) -> Vec<&CalendarEvent> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Upsert the summary for a week of a month: first write creates the
    /// record, later writes replace its content in place.
    pub fn set_summary(
        &mut self,
        year: i32,
        month: u32,
        week: u32,
        content: &str,
    ) -> Result<(), StorageError> {
        let key = WeekKey { year, month, week };
        match self.summaries.iter_mut().find(|s| s.key() == key) {
            Some(existing) => existing.content = content.to_string(),
            None => self
                .summaries
                .push(WeeklySummary::new(key, content.to_string())),
        }
        self.storage.save_summaries(&self.summaries)
    }

    /// The summary content for a week, "" when none was written
    pub fn summary(&self, year: i32, month: u32, week: u32) -> &str {
        let key = WeekKey { year, month, week };
        self.summaries
            .iter()
            .find(|s| s.key() == key)
            .map(|s| s.content.as_str())
            .unwrap_or("")
    }

    /// The plan bound to the cursor year
    pub fn plan(&self) -> &YearlyPlan {
        &self.plan
    }

    /// Write one field of the active plan and flush it under its year key
    pub fn set_plan_field(&mut self, field: PlanField, value: &str) -> Result<(), StorageError> {
        self.plan.set_field(field, value.to_string());
        self.storage.save_yearly_plan(&self.plan)
    }

    /// Build the display contract for the cursor month: annotated week rows
    /// with each day's events and each week's summary attached. None only
    /// for a cursor outside chrono's supported range.
    pub fn month_view(&self, almanac: &dyn Almanac, today: NaiveDate) -> Option<MonthView> {
        let grid = calendar::month_grid(self.year, self.month)?;

        let mut weeks = Vec::with_capacity(grid.len());
        for (index, row) in grid.into_iter().enumerate() {
            let index = index as u32;
            let mut days = Vec::with_capacity(row.len());
            for slot in row {
                days.push(self.day_cell(slot, almanac, today));
            }
            weeks.push(WeekRow {
                index,
                days,
                summary: self.summary(self.year, self.month, index).to_string(),
            });
        }

        Some(MonthView {
            year: self.year,
            month: self.month,
            weeks,
        })
    }

    fn day_cell(&self, slot: Option<u32>, almanac: &dyn Almanac, today: NaiveDate) -> DayCell {
        let Some((day, date)) = slot.and_then(|day| {
            NaiveDate::from_ymd_opt(self.year, self.month, day).map(|date| (day, date))
        }) else {
            return DayCell::empty();
        };

        let annotation = calendar::annotate(almanac, self.year, self.month, day);
        let class = calendar::classify(date, annotation.holiday.as_ref(), today);
        let events = self
            .events_on(&utils::date_key(date))
            .into_iter()
            .cloned()
            .collect();

        DayCell {
            day: Some(day),
            is_today: date == today,
            class: Some(class),
            lunar_label: annotation.lunar_label,
            holiday: annotation.holiday,
            events,
        }
    }
}
