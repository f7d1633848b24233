use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::errors::SalonError;

/// A wall-clock time with minute granularity, stored as minutes since midnight.
///
/// There is no timezone attached; values are always read in the salon's local
/// civil time. Adding minutes never wraps around midnight, so a value past the
/// end of the day displays as `24:30` and still orders after `23:30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Builds a time from an hour in `0..24` and a minute in `0..60`.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(TimeOfDay(hour * 60 + minute))
        } else {
            None
        }
    }

    pub fn from_minutes(minutes: u32) -> Self {
        TimeOfDay(minutes)
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    pub fn add_minutes(self, minutes: u32) -> Self {
        TimeOfDay(self.0.saturating_add(minutes))
    }
}

impl From<NaiveTime> for TimeOfDay {
    /// Truncates to the minute; seconds are dropped.
    fn from(time: NaiveTime) -> Self {
        TimeOfDay(time.hour() * 60 + time.minute())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = SalonError;

    /// Accepts only the zero-padded 24-hour `HH:MM` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SalonError::Validation(format!("Invalid time of day: {:?} (expected HH:MM)", s));

        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        if !bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let time = NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| invalid())?;
        Ok(TimeOfDay::from(time))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
