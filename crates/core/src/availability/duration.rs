use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

static HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*h").expect("hours pattern is valid"));
static MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*min").expect("minutes pattern is valid"));

/// Length of a service in whole minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ServiceDuration(u32);

impl ServiceDuration {
    pub const ZERO: ServiceDuration = ServiceDuration(0);

    pub fn from_minutes(minutes: u32) -> Self {
        ServiceDuration(minutes)
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ServiceDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0 / 60, self.0 % 60) {
            (0, m) => write!(f, "{}min", m),
            (h, 0) => write!(f, "{}h", h),
            (h, m) => write!(f, "{}h{}min", h, m),
        }
    }
}

/// Parses a human-authored duration such as `"1h10min"`, `"2h"` or `"40 min"`.
///
/// The first numeral followed by `h` counts as hours and the first numeral
/// followed by `min` counts as minutes. Either part may be missing. Text with
/// neither part yields zero. This never fails.
pub fn parse_duration(text: &str) -> ServiceDuration {
    let hours = first_number(&HOURS, text);
    let minutes = first_number(&MINUTES, text);

    ServiceDuration(hours.saturating_mul(60).saturating_add(minutes))
}

// A numeral that does not fit in u32 contributes nothing.
fn first_number(pattern: &Regex, text: &str) -> u32 {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
