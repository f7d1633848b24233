use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::TimeOfDay;
use crate::errors::{SalonError, SalonResult};

pub const DEFAULT_STEP_MINUTES: u32 = 30;

/// Fifteen daily slots, half-hourly, with a lunch gap between 11:30 and 13:30.
const DEFAULT_HOURS: [(u32, u32); 15] = [
    (9, 30),
    (10, 0),
    (10, 30),
    (11, 0),
    (11, 30),
    (13, 30),
    (14, 0),
    (14, 30),
    (15, 0),
    (15, 30),
    (16, 0),
    (16, 30),
    (17, 0),
    (17, 30),
    (18, 0),
];

const DEFAULT_OPEN_DAYS: [Weekday; 5] = [
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// The salon's bookable day: the master catalog of start times, the slot
/// step used to expand appointments, and the weekdays it opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub hours: Vec<TimeOfDay>,
    pub step_minutes: u32,
    pub open_days: Vec<Weekday>,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            hours: DEFAULT_HOURS
                .iter()
                .map(|&(h, m)| TimeOfDay::from_minutes(h * 60 + m))
                .collect(),
            step_minutes: DEFAULT_STEP_MINUTES,
            open_days: DEFAULT_OPEN_DAYS.to_vec(),
        }
    }
}

impl BusinessHours {
    pub fn is_open(&self, date: NaiveDate) -> bool {
        self.open_days.contains(&date.weekday())
    }

    /// Master catalog for `date`; empty when the salon is closed that weekday.
    pub fn catalog_for(&self, date: NaiveDate) -> &[TimeOfDay] {
        if self.is_open(date) { &self.hours } else { &[] }
    }

    pub fn validate(&self) -> SalonResult<()> {
        if self.hours.is_empty() {
            return Err(SalonError::Validation(
                "Business hours must contain at least one slot".to_string(),
            ));
        }
        if self.step_minutes == 0 {
            return Err(SalonError::Validation(
                "Slot step must be greater than zero".to_string(),
            ));
        }
        if self.hours.windows(2).any(|w| w[0] >= w[1]) {
            return Err(SalonError::Validation(
                "Business hours must be strictly increasing".to_string(),
            ));
        }
        if self.open_days.is_empty() {
            return Err(SalonError::Validation(
                "At least one open weekday is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parses a comma-separated list of `HH:MM` values, e.g. `"09:30, 10:00"`.
pub fn parse_hours(list: &str) -> SalonResult<Vec<TimeOfDay>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

/// Parses a comma-separated list of weekday names, e.g. `"tue,wed,sat"`.
pub fn parse_weekdays(list: &str) -> SalonResult<Vec<Weekday>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Weekday>()
                .map_err(|_| SalonError::Validation(format!("Invalid weekday: {}", s)))
        })
        .collect()
}
