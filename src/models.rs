use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub date: String, // ISO 8601: YYYY-MM-DD, fixed at creation
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl CalendarEvent {
    pub fn new(date: String, title: String, time: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            title,
            time,
            completed: false,
        }
    }
}

/// Identity of a week summary: scoped to the displayed month, not the ISO
/// week. A week that straddles two months owns one slot per month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekKey {
    pub year: i32,
    pub month: u32, // 1-12
    pub week: u32,  // 0-based row index within the month grid
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub year: i32,
    pub month: u32,
    pub week: u32,
    pub content: String,
}

impl WeeklySummary {
    pub fn new(key: WeekKey, content: String) -> Self {
        Self {
            year: key.year,
            month: key.month,
            week: key.week,
            content,
        }
    }

    pub fn key(&self) -> WeekKey {
        WeekKey {
            year: self.year,
            month: self.month,
            week: self.week,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyPlan {
    pub year: i32,
    #[serde(default)]
    pub goals: String,
    #[serde(default)]
    pub work: String,
    #[serde(default)]
    pub life: String,
    #[serde(default)]
    pub other: String,
}

impl YearlyPlan {
    /// The record used for a year with nothing persisted yet.
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            goals: String::new(),
            work: String::new(),
            life: String::new(),
            other: String::new(),
        }
    }

    pub fn field(&self, field: PlanField) -> &str {
        match field {
            PlanField::Goals => &self.goals,
            PlanField::Work => &self.work,
            PlanField::Life => &self.life,
            PlanField::Other => &self.other,
        }
    }

    pub fn set_field(&mut self, field: PlanField, value: String) {
        match field {
            PlanField::Goals => self.goals = value,
            PlanField::Work => self.work = value,
            PlanField::Life => self.life = value,
            PlanField::Other => self.other = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanField {
    Goals,
    Work,
    Life,
    Other,
}

impl PlanField {
    pub const ALL: [PlanField; 4] = [
        PlanField::Goals,
        PlanField::Work,
        PlanField::Life,
        PlanField::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PlanField::Goals => "goals",
            PlanField::Work => "work",
            PlanField::Life => "life",
            PlanField::Other => "other",
        }
    }
}

impl FromStr for PlanField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "goals" => Ok(PlanField::Goals),
            "work" => Ok(PlanField::Work),
            "life" => Ok(PlanField::Life),
            "other" => Ok(PlanField::Other),
            _ => Err(format!("unknown plan field: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_starts_uncompleted_with_fresh_id() {
        let a = CalendarEvent::new("2024-05-01".into(), "Team sync".into(), Some("09:00".into()));
        let b = CalendarEvent::new("2024-05-01".into(), "Team sync".into(), None);
        assert!(!a.completed);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn event_json_omits_absent_time_and_defaults_completed() {
        let json = r#"{"id":"x","date":"2024-05-01","title":"Team sync"}"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.time, None);
        assert!(!event.completed);

        let out = serde_json::to_string(&event).unwrap();
        assert!(!out.contains("\"time\""));
    }

    #[test]
    fn summary_key_projects_its_fields() {
        let key = WeekKey {
            year: 2024,
            month: 5,
            week: 0,
        };
        let summary = WeeklySummary::new(key, "Shipped v1".into());
        assert_eq!(summary.key(), key);
    }

    #[test]
    fn plan_field_round_trips_through_names() {
        for field in PlanField::ALL {
            assert_eq!(field.name().parse::<PlanField>().unwrap(), field);
        }
        assert!("budget".parse::<PlanField>().is_err());
    }

    #[test]
    fn plan_set_field_touches_only_that_field() {
        let mut plan = YearlyPlan::empty(2024);
        plan.set_field(PlanField::Work, "ship the planner".into());
        assert_eq!(plan.field(PlanField::Work), "ship the planner");
        assert_eq!(plan.field(PlanField::Goals), "");
        assert_eq!(plan.year, 2024);
    }
}
